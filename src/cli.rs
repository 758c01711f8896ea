use crate::config::{CliOverrides, Config};
use crate::counter::parse_keywords;
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pdf-wordfreq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Count keyword frequencies across a folder of PDF documents")]
#[command(
    long_about = "pdf-wordfreq extracts the text of every PDF in a folder, counts whole-word, \
                  case-insensitive occurrences of each keyword, and writes one spreadsheet row \
                  per document to an Excel report."
)]
#[command(after_help = "EXAMPLES:\n  \
    pdf-wordfreq\n  \
    pdf-wordfreq pdf_files --theme Operations --year 2024 --keywords risk,mitigation\n  \
    pdf-wordfreq reports/2024 -o out --skip-errors --no-prompt\n  \
    pdf-wordfreq --config wordfreq.toml --dry-run\n\n\
    Values not given on the command line or in the configuration file are asked for interactively.")]
pub struct Cli {
    /// Folder containing the PDF documents (defaults to pdf_files)
    pub folder: Option<PathBuf>,

    /// Theme label written to every report row
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Fiscal year label written to every report row
    #[arg(short, long, alias = "fiscal-year")]
    pub year: Option<String>,

    /// Keywords to count (comma-separated)
    #[arg(short, long, help = "Comma-separated keywords, e.g. risk,mitigation")]
    pub keywords: Option<String>,

    /// Directory the report is written to (defaults to output)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// File name suffix selecting documents
    #[arg(long, value_parser = validate_extension, help = "Document suffix to select (default: .pdf)")]
    pub extension: Option<String>,

    /// Skip unreadable documents instead of aborting
    #[arg(long, help = "Skip documents whose text cannot be extracted")]
    pub skip_errors: bool,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "List the documents and report path without counting anything")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,

    /// Fail instead of prompting for missing values
    #[arg(long, help = "Never prompt; missing theme, year or keywords are an error")]
    pub no_prompt: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<&OutputFormat> for OutputMode {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_theme(self.theme.clone())
            .with_fiscal_year(self.year.clone())
            .with_keywords(self.keywords.as_deref().map(parse_keywords))
            .with_folder(self.folder.clone())
            .with_extension(self.extension.clone())
            .with_skip_errors(self.skip_errors)
            .with_output_dir(self.output_dir.clone())
    }

    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from(&self.output_format)
    }

    /// Default `tracing` filter for the selected verbosity; `RUST_LOG` takes precedence.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }

        match self.verbose {
            0 => "warn",
            1 => "pdf_wordfreq=info",
            2 => "pdf_wordfreq=debug",
            _ => "pdf_wordfreq=trace,lopdf=debug",
        }
    }
}

pub fn validate_extension(s: &str) -> std::result::Result<String, String> {
    if s.is_empty() {
        return Err("Extension must not be empty".to_string());
    }

    if s.contains('/') || s.contains('\\') {
        return Err("Extension must not contain path separators".to_string());
    }

    Ok(s.to_string())
}
