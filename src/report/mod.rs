pub mod builder;
pub mod table;
pub mod writer;

pub use builder::{build_report, DocumentEvent, ReportBuilder, ReportOutcome, SkippedDocument};
pub use table::{ReportMetadata, ReportRow, ReportTable};
pub use writer::{write_report, ReportWriter};
