pub mod text_extractor;

pub use text_extractor::{PdfTextExtractor, TextExtractor};
