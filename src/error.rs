use thiserror::Error;

#[derive(Error, Debug)]
pub enum WordFreqError {
    #[error("Failed to extract text from {path}: {message}")]
    Extraction { path: String, message: String },

    #[error("Failed to write report {path}: {message}")]
    ReportWrite { path: String, message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Missing input: {message}")]
    Prompt { message: String },

    #[error("Invalid keyword '{keyword}': {message}")]
    Pattern { keyword: String, message: String },
}

impl WordFreqError {
    /// Process exit code the binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            WordFreqError::InvalidPath { .. } => 3,
            WordFreqError::Extraction { .. } => 4,
            WordFreqError::ReportWrite { .. } => 5,
            WordFreqError::Config { .. } => 6,
            _ => 1,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for WordFreqError {
    fn user_message(&self) -> String {
        match self {
            WordFreqError::Extraction { path, message } => {
                format!("Could not read document {}: {}", path, message)
            }
            WordFreqError::ReportWrite { path, message } => {
                format!("Could not write report {}: {}", path, message)
            }
            WordFreqError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            WordFreqError::InvalidPath { path } => {
                format!("Invalid input folder: {}", path)
            }
            WordFreqError::Prompt { message } => {
                format!("Input required: {}", message)
            }
            WordFreqError::Pattern { keyword, message } => {
                format!("Keyword '{}' could not be searched for: {}", keyword, message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            WordFreqError::Extraction { .. } => Some(
                "The file may be corrupt, encrypted or not a PDF. Remove it from the folder or rerun with --skip-errors to continue past unreadable documents.".to_string()
            ),
            WordFreqError::ReportWrite { .. } => Some(
                "Ensure the output directory is writable and has free space, or choose another location with --output-dir.".to_string()
            ),
            WordFreqError::Config { .. } => Some(
                "Check your configuration file syntax, or generate a fresh one with --generate-config.".to_string()
            ),
            WordFreqError::InvalidPath { .. } => Some(
                "Pass an existing folder containing PDF documents as the first argument.".to_string()
            ),
            WordFreqError::Prompt { .. } => Some(
                "Provide --theme, --year and --keywords on the command line when running without a terminal.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for WordFreqError {
    fn from(error: toml::de::Error) -> Self {
        WordFreqError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WordFreqError>;
