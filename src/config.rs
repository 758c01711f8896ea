use crate::counter::normalize_keywords;
use crate::error::{Result, WordFreqError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Report labels and search terms. Missing values are asked for interactively.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportConfig {
    pub theme: Option<String>,
    pub fiscal_year: Option<String>,
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub folder: PathBuf,
    pub extension: String,
    pub on_error: ErrorPolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub file_extension: String,
    pub sheet_name: String,
}

/// What to do with a document whose text cannot be extracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    #[default]
    Abort,
    Skip,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("pdf_files"),
            extension: ".pdf".to_string(),
            on_error: ErrorPolicy::Abort,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            file_extension: "xlsx".to_string(),
            sheet_name: "Sheet1".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(WordFreqError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| WordFreqError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| WordFreqError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        if let Some(keywords) = config.report.keywords.take() {
            config.report.keywords = Some(normalize_keywords(keywords));
        }

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["wordfreq.toml", ".wordfreq.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        tracing::debug!(path = default_path, "using configuration file");
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref theme) = cli_args.theme {
            self.report.theme = Some(theme.clone());
        }

        if let Some(ref fiscal_year) = cli_args.fiscal_year {
            self.report.fiscal_year = Some(fiscal_year.clone());
        }

        if let Some(ref keywords) = cli_args.keywords {
            self.report.keywords = Some(keywords.clone());
        }

        if let Some(ref folder) = cli_args.folder {
            self.input.folder = folder.clone();
        }

        if let Some(ref extension) = cli_args.extension {
            self.input.extension = extension.clone();
        }

        if cli_args.skip_errors {
            self.input.on_error = ErrorPolicy::Skip;
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.directory = output_dir.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| WordFreqError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| WordFreqError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.extension.is_empty() {
            return Err(WordFreqError::Config {
                message: "Input file extension must not be empty".to_string(),
            });
        }

        if self.output.file_extension.trim_start_matches('.').is_empty() {
            return Err(WordFreqError::Config {
                message: "Report file extension must not be empty".to_string(),
            });
        }

        let sheet = &self.output.sheet_name;
        if sheet.is_empty() || sheet.chars().count() > 31 {
            return Err(WordFreqError::Config {
                message: "Sheet name must be between 1 and 31 characters".to_string(),
            });
        }

        if sheet.chars().any(|c| matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\')) {
            return Err(WordFreqError::Config {
                message: format!("Sheet name contains invalid characters: {}", sheet),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let mut sample_config = Self::default();
        sample_config.report = ReportConfig {
            theme: Some("Operations".to_string()),
            fiscal_year: Some("2024".to_string()),
            keywords: Some(vec!["risk".to_string(), "mitigation".to_string()]),
        };
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub theme: Option<String>,
    pub fiscal_year: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub folder: Option<PathBuf>,
    pub extension: Option<String>,
    pub skip_errors: bool,
    pub output_dir: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, theme: Option<String>) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_fiscal_year(mut self, fiscal_year: Option<String>) -> Self {
        self.fiscal_year = fiscal_year;
        self
    }

    pub fn with_keywords(mut self, keywords: Option<Vec<String>>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_folder(mut self, folder: Option<PathBuf>) -> Self {
        self.folder = folder;
        self
    }

    pub fn with_extension(mut self, extension: Option<String>) -> Self {
        self.extension = extension;
        self
    }

    pub fn with_skip_errors(mut self, skip: bool) -> Self {
        self.skip_errors = skip;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.folder, PathBuf::from("pdf_files"));
        assert_eq!(config.input.extension, ".pdf");
        assert_eq!(config.input.on_error, ErrorPolicy::Abort);
        assert_eq!(config.output.directory, PathBuf::from("output"));
        assert!(config.report.keywords.is_none());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.input.extension.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.sheet_name = "bad/name".to_string();
        assert!(config.validate().is_err());

        config.output.sheet_name = "x".repeat(32);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.input.on_error = ErrorPolicy::Skip;
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.input.on_error, ErrorPolicy::Skip);
        assert_eq!(loaded_config.output.sheet_name, "Sheet1");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            "[report]\ntheme = \"Ops\"\nkeywords = [\" Risk \", \"Mitigation\"]\n\n[input]\non_error = \"skip\""
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.report.theme.as_deref(), Some("Ops"));
        assert!(config.report.fiscal_year.is_none());
        assert_eq!(
            config.report.keywords,
            Some(vec!["risk".to_string(), "mitigation".to_string()])
        );
        assert_eq!(config.input.on_error, ErrorPolicy::Skip);
        assert_eq!(config.input.extension, ".pdf");
        assert_eq!(config.output.file_extension, "xlsx");
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/nonexistent/wordfreq.toml");
        assert!(matches!(result, Err(WordFreqError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_theme(Some("Ops".to_string()))
            .with_fiscal_year(Some("2024".to_string()))
            .with_keywords(Some(vec!["risk".to_string()]))
            .with_output_dir(Some(PathBuf::from("reports")))
            .with_skip_errors(true);

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.report.theme.as_deref(), Some("Ops"));
        assert_eq!(config.report.fiscal_year.as_deref(), Some("2024"));
        assert_eq!(config.report.keywords, Some(vec!["risk".to_string()]));
        assert_eq!(config.output.directory, PathBuf::from("reports"));
        assert_eq!(config.input.on_error, ErrorPolicy::Skip);
        assert_eq!(config.input.folder, PathBuf::from("pdf_files"));
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[report]"));
        assert!(sample.contains("[input]"));
        assert!(sample.contains("[output]"));
        assert!(sample.contains("on_error = \"abort\""));
    }
}
