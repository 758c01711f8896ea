use crate::error::{Result, WordFreqError};
use lopdf::Document;
use std::path::Path;

/// Source of plain text for a document on disk.
pub trait TextExtractor: Sync {
    fn extract_text(&self, path: &Path) -> Result<String>;
}

/// Extracts text from PDF documents with `lopdf`.
///
/// Pages are visited in page-number order and their text is concatenated
/// as-is. The parsed document lives only for the duration of one call.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String> {
        let document = Document::load(path).map_err(|e| extraction_error(path, e))?;

        let mut text = String::new();
        for (page_number, _page_id) in document.get_pages() {
            let page_text = document
                .extract_text(&[page_number])
                .map_err(|e| extraction_error(path, format!("page {}: {}", page_number, e)))?;
            text.push_str(&page_text);
        }

        tracing::debug!(path = %path.display(), chars = text.len(), "extracted document text");

        Ok(text)
    }
}

fn extraction_error<E: std::fmt::Display>(path: &Path, error: E) -> WordFreqError {
    WordFreqError::Extraction {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
