use crate::config::{ErrorPolicy, InputConfig};
use crate::counter::{FrequencyRecord, KeywordCounter};
use crate::error::{Result, WordFreqError};
use crate::extractor::{PdfTextExtractor, TextExtractor};
use crate::report::table::{ReportMetadata, ReportRow, ReportTable};
use crate::scanner::{DocumentFile, DocumentScanner};
use serde::Serialize;
use std::path::Path;

/// Progress notification for a single document.
#[derive(Debug)]
pub enum DocumentEvent<'a> {
    Counted {
        index: usize,
        document: &'a DocumentFile,
        record: &'a FrequencyRecord,
    },
    Skipped {
        index: usize,
        document: &'a DocumentFile,
        error: &'a WordFreqError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDocument {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    pub table: ReportTable,
    pub skipped: Vec<SkippedDocument>,
}

/// Drives extraction and counting over a folder and assembles the table.
pub struct ReportBuilder<'a> {
    extractor: &'a dyn TextExtractor,
    scanner: DocumentScanner,
    policy: ErrorPolicy,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(extractor: &'a dyn TextExtractor, config: &InputConfig) -> Self {
        Self {
            extractor,
            scanner: DocumentScanner::new(config),
            policy: config.on_error,
        }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn scanner(&self) -> &DocumentScanner {
        &self.scanner
    }

    pub fn build_report(
        &self,
        folder: &Path,
        metadata: &ReportMetadata,
        keywords: &[String],
        on_document: Option<&dyn Fn(&DocumentEvent)>,
    ) -> Result<ReportOutcome> {
        let documents = self.scanner.scan_folder(folder)?;
        self.process_documents(&documents, metadata, keywords, on_document)
    }

    /// Build rows for already scanned documents, preserving their order.
    pub fn process_documents(
        &self,
        documents: &[DocumentFile],
        metadata: &ReportMetadata,
        keywords: &[String],
        on_document: Option<&dyn Fn(&DocumentEvent)>,
    ) -> Result<ReportOutcome> {
        let counter = KeywordCounter::new(keywords)?;
        let mut table = ReportTable::new(keywords.to_vec());
        let mut skipped = Vec::new();

        #[cfg(not(feature = "parallel"))]
        let results = documents
            .iter()
            .map(|document| self.count_document(document, &counter));

        #[cfg(feature = "parallel")]
        let results = {
            use rayon::prelude::*;
            documents
                .par_iter()
                .map(|document| self.count_document(document, &counter))
                .collect::<Vec<_>>()
                .into_iter()
        };

        for (index, (document, result)) in documents.iter().zip(results).enumerate() {
            match result {
                Ok(record) => {
                    if let Some(callback) = on_document {
                        callback(&DocumentEvent::Counted {
                            index,
                            document,
                            record: &record,
                        });
                    }
                    table.push_row(ReportRow::from_record(metadata, &document.file_name, &record));
                }
                Err(error) if self.policy == ErrorPolicy::Skip => {
                    tracing::warn!(
                        file = %document.file_name,
                        error = %error,
                        "skipping unreadable document"
                    );
                    if let Some(callback) = on_document {
                        callback(&DocumentEvent::Skipped {
                            index,
                            document,
                            error: &error,
                        });
                    }
                    skipped.push(SkippedDocument {
                        file_name: document.file_name.clone(),
                        reason: error.to_string(),
                    });
                }
                Err(error) => return Err(error),
            }
        }

        Ok(ReportOutcome { table, skipped })
    }

    fn count_document(
        &self,
        document: &DocumentFile,
        counter: &KeywordCounter,
    ) -> Result<FrequencyRecord> {
        let text = self.extractor.extract_text(&document.path)?;
        let record = counter.count(&text);
        tracing::debug!(file = %document.file_name, total = record.total(), "counted keywords");
        Ok(record)
    }
}

/// Build a report table for every PDF directly inside `folder`.
///
/// Any unreadable document aborts the whole build.
pub fn build_report<P: AsRef<Path>>(
    folder: P,
    theme: &str,
    fiscal_year: &str,
    keywords: &[String],
) -> Result<ReportTable> {
    let extractor = PdfTextExtractor::new();
    let builder = ReportBuilder::new(&extractor, &InputConfig::default())
        .with_policy(ErrorPolicy::Abort);
    let metadata = ReportMetadata::new(theme, fiscal_year);

    let outcome = builder.build_report(folder.as_ref(), &metadata, keywords, None)?;
    Ok(outcome.table)
}
