use crate::config::InputConfig;
use crate::error::{Result, WordFreqError};
use crate::scanner::file_filter::FileFilter;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

impl DocumentFile {
    pub fn new(path: PathBuf, size: u64) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            path,
            file_name,
            size,
        }
    }

    pub fn format_size(&self) -> String {
        format_bytes(self.size)
    }
}

/// Lists the documents directly inside a folder.
///
/// Documents are returned in the order the directory listing yields them,
/// which is platform dependent and not sorted.
pub struct DocumentScanner {
    filter: FileFilter,
}

impl DocumentScanner {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
        }
    }

    pub fn scan_folder<P: AsRef<Path>>(&self, folder: P) -> Result<Vec<DocumentFile>> {
        let folder = folder.as_ref();

        if !folder.exists() {
            return Err(WordFreqError::InvalidPath {
                path: folder.display().to_string(),
            });
        }

        if !folder.is_dir() {
            return Err(WordFreqError::InvalidPath {
                path: format!("{} is not a directory", folder.display()),
            });
        }

        let walker = WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);

        let mut documents = Vec::new();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable folder entry");
                    continue;
                }
            };

            if let Some(document) = self.process_entry(&entry) {
                documents.push(document);
            }
        }

        tracing::debug!(
            folder = %folder.display(),
            documents = documents.len(),
            "folder scan finished"
        );

        Ok(documents)
    }

    fn process_entry(&self, entry: &DirEntry) -> Option<DocumentFile> {
        if !entry.file_type().is_file() {
            return None;
        }

        if !self.filter.is_document_file(entry.path()) {
            return None;
        }

        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(err) => {
                tracing::warn!(path = %entry.path().display(), error = %err, "could not read file metadata");
                0
            }
        };

        Some(DocumentFile::new(entry.path().to_path_buf(), size))
    }

    pub fn get_statistics(&self, documents: &[DocumentFile]) -> ScanStatistics {
        let (largest_file_size, largest_file_name) = documents
            .iter()
            .max_by_key(|d| d.size)
            .map(|d| (d.size, d.file_name.clone()))
            .unwrap_or((0, String::new()));

        ScanStatistics {
            total_files: documents.len(),
            total_size: documents.iter().map(|d| d.size).sum(),
            largest_file_size,
            largest_file_name,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub total_size: u64,
    pub largest_file_size: u64,
    pub largest_file_name: String,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Scan Results:\n  Documents: {}\n  Total size: {}\n",
            self.total_files,
            format_bytes(self.total_size)
        );

        if self.largest_file_size > 0 {
            summary.push_str(&format!(
                "  Largest document: {} ({})\n",
                self.largest_file_name,
                format_bytes(self.largest_file_size)
            ));
        }

        summary
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
