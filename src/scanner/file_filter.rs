use crate::config::InputConfig;
use std::path::Path;

/// Selects documents by an exact, case-sensitive file-name suffix.
///
/// With the default `.pdf` suffix `a.pdf` is selected while `b.PDF` and
/// `c.txt` are not.
pub struct FileFilter {
    extension: String,
}

impl FileFilter {
    pub fn new(config: &InputConfig) -> Self {
        Self::with_extension(config.extension.clone())
    }

    pub fn with_extension<S: Into<String>>(extension: S) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.extension)
    }

    pub fn is_document_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|s| s.to_str())
            .is_some_and(|name| self.matches(name))
    }

    pub fn get_extension(&self) -> &str {
        &self.extension
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_suffix_matching() {
        let filter = FileFilter::default();

        assert!(filter.matches("a.pdf"));
        assert!(filter.matches("annual report 2024.pdf"));
        assert!(!filter.matches("b.PDF"));
        assert!(!filter.matches("b.Pdf"));
        assert!(!filter.matches("c.txt"));
        assert!(!filter.matches("notes.pdf.txt"));
        assert!(!filter.matches("pdf"));
    }

    #[test]
    fn test_path_matching() {
        let filter = FileFilter::default();

        assert!(filter.is_document_file(Path::new("/data/reports/a.pdf")));
        assert!(!filter.is_document_file(Path::new("/data/reports/c.txt")));
        assert!(!filter.is_document_file(Path::new("/")));
    }

    #[test]
    fn test_custom_extension() {
        let filter = FileFilter::with_extension(".PDF");

        assert!(filter.matches("b.PDF"));
        assert!(!filter.matches("a.pdf"));
        assert_eq!(filter.get_extension(), ".PDF");
    }
}
