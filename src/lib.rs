pub mod cli;
pub mod config;
pub mod counter;
pub mod error;
pub mod extractor;
pub mod report;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ErrorPolicy, InputConfig, OutputConfig, ReportConfig};
pub use error::{Result, UserFriendlyError, WordFreqError};

// Core functionality re-exports
pub use counter::{count_frequencies, parse_keywords, FrequencyRecord, KeywordCounter};
pub use extractor::{PdfTextExtractor, TextExtractor};
pub use report::{
    build_report, write_report, DocumentEvent, ReportBuilder, ReportMetadata, ReportOutcome,
    ReportTable, ReportWriter, SkippedDocument,
};
pub use scanner::{DocumentFile, DocumentScanner, FileFilter};
pub use ui::{OutputFormatter, OutputMode, ProgressManager, Prompter};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Labels and keywords for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub metadata: ReportMetadata,
    pub keywords: Vec<String>,
}

/// Result of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub report_path: PathBuf,
    pub metadata: ReportMetadata,
    pub table: ReportTable,
    pub skipped: Vec<SkippedDocument>,
    pub duration: Duration,
    pub generated_at: DateTime<Utc>,
}

impl RunReport {
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// What a run would do, without extracting anything.
#[derive(Debug, Clone, Serialize)]
pub struct RunPlan {
    pub folder: PathBuf,
    pub extension: String,
    pub documents: Vec<String>,
    pub total_size: u64,
    pub keywords: Option<Vec<String>>,
    pub report_path: Option<PathBuf>,
    pub on_error: ErrorPolicy,
}

/// Main library interface for keyword frequency reports
pub struct WordFreq {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl WordFreq {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Quiet instance with progress bars disabled
    #[cfg(test)]
    pub fn new_for_test(config: Config) -> Self {
        Self {
            config,
            output_formatter: OutputFormatter::new(OutputMode::Plain, 0, true),
            progress_manager: ProgressManager::new(false),
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        Ok(Self::new(
            config,
            cli_args.output_mode(),
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Build the request from configuration alone; any missing value is an error.
    pub fn request_from_config(&self) -> Result<ReportRequest> {
        let report = &self.config.report;
        let missing = |what: &str, flag: &str| WordFreqError::Prompt {
            message: format!("no {} given and prompting is disabled (use {})", what, flag),
        };

        let theme = report.theme.clone().ok_or_else(|| missing("theme", "--theme"))?;
        let fiscal_year = report
            .fiscal_year
            .clone()
            .ok_or_else(|| missing("fiscal year", "--year"))?;
        let keywords = report
            .keywords
            .clone()
            .ok_or_else(|| missing("keywords", "--keywords"))?;

        Ok(ReportRequest {
            metadata: ReportMetadata::new(theme, fiscal_year),
            keywords,
        })
    }

    /// Build the request, asking for theme, fiscal year and keywords (in that
    /// order) when the configuration does not provide them.
    pub fn resolve_request<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<ReportRequest> {
        let report = &self.config.report;

        let theme = match &report.theme {
            Some(theme) => theme.clone(),
            None => prompter.ask_theme()?,
        };
        let fiscal_year = match &report.fiscal_year {
            Some(year) => year.clone(),
            None => prompter.ask_fiscal_year()?,
        };
        let keywords = match &report.keywords {
            Some(keywords) => keywords.clone(),
            None => prompter.ask_keywords()?,
        };

        Ok(ReportRequest {
            metadata: ReportMetadata::new(theme, fiscal_year),
            keywords,
        })
    }

    /// Scan, count and write the report for `request`.
    pub fn run(&self, request: &ReportRequest) -> Result<RunReport> {
        self.run_with_extractor(request, &PdfTextExtractor::new())
    }

    pub fn run_with_extractor(
        &self,
        request: &ReportRequest,
        extractor: &dyn TextExtractor,
    ) -> Result<RunReport> {
        let start_time = Instant::now();
        let input = &self.config.input;

        self.output_formatter.start_operation("Scanning for documents");
        let builder = ReportBuilder::new(extractor, input);
        let documents = builder.scanner().scan_folder(&input.folder)?;

        let stats = builder.scanner().get_statistics(&documents);
        self.output_formatter.debug(&stats.display_summary());

        if documents.is_empty() {
            self.output_formatter.warning(&format!(
                "No '{}' documents found in {}",
                input.extension,
                input.folder.display()
            ));
        } else {
            self.output_formatter
                .info(&format!("Found {} documents", documents.len()));
        }

        self.output_formatter.start_operation("Counting keywords");
        let outcome = self.count_documents(&builder, &documents, request)?;

        let writer = ReportWriter::new(&self.config.output);
        let report_path = writer.write_report(&outcome.table, &request.metadata)?;
        self.output_formatter.print_report_written(&report_path);

        Ok(RunReport {
            report_path,
            metadata: request.metadata.clone(),
            table: outcome.table,
            skipped: outcome.skipped,
            duration: start_time.elapsed(),
            generated_at: Utc::now(),
        })
    }

    fn count_documents(
        &self,
        builder: &ReportBuilder,
        documents: &[DocumentFile],
        request: &ReportRequest,
    ) -> Result<ReportOutcome> {
        let progress = self
            .progress_manager
            .create_document_progress(documents.len() as u64);

        let on_document: &dyn Fn(&DocumentEvent) = &|event| {
            ui::progress::update_document_progress(&progress, event);
            self.progress_manager.suspend(|| match event {
                DocumentEvent::Counted {
                    document, record, ..
                } => self
                    .output_formatter
                    .print_document_frequencies(&document.file_name, record),
                DocumentEvent::Skipped {
                    document, error, ..
                } => self
                    .output_formatter
                    .print_skipped_document(&document.file_name, error),
            });
        };

        let outcome = match builder.process_documents(
            documents,
            &request.metadata,
            &request.keywords,
            Some(on_document),
        ) {
            Ok(outcome) => outcome,
            Err(e) => {
                progress.abandon_with_message("Stopped on unreadable document");
                return Err(e);
            }
        };

        ui::progress::finish_progress_with_summary(
            &progress,
            &format!("Counted {} documents", outcome.table.len()),
            progress.elapsed(),
        );

        Ok(outcome)
    }

    /// Describe what `run` would do with the current configuration.
    pub fn plan(&self) -> Result<RunPlan> {
        let input = &self.config.input;
        let scanner = DocumentScanner::new(input);
        let documents = scanner.scan_folder(&input.folder)?;
        let stats = scanner.get_statistics(&documents);

        let report = &self.config.report;
        let report_path = match (&report.theme, &report.fiscal_year) {
            (Some(theme), Some(year)) => Some(
                ReportWriter::new(&self.config.output)
                    .report_path(&ReportMetadata::new(theme.as_str(), year.as_str())),
            ),
            _ => None,
        };

        Ok(RunPlan {
            folder: input.folder.clone(),
            extension: input.extension.clone(),
            documents: documents.into_iter().map(|d| d.file_name).collect(),
            total_size: stats.total_size,
            keywords: report.keywords.clone(),
            report_path,
            on_error: input.on_error,
        })
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &WordFreqError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get build information
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        build_date: option_env!("BUILD_DATE").unwrap_or("unknown"),
        target: std::env::consts::ARCH.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_date: &'static str,
    pub target: String,
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pdf-wordfreq {} ({}) built on {} for {}",
            self.version, self.git_hash, self.build_date, self.target
        )
    }
}
