pub mod document_scanner;
pub mod file_filter;

pub use document_scanner::{format_bytes, DocumentFile, DocumentScanner, ScanStatistics};
pub use file_filter::FileFilter;
