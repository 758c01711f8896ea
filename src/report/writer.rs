use crate::config::OutputConfig;
use crate::error::{Result, WordFreqError};
use crate::report::table::{ReportMetadata, ReportTable};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Serializes a report table to an `.xlsx` workbook.
///
/// The workbook is rendered in memory and written through a temporary file
/// in the destination directory, which is renamed over the final path only
/// once fully written.
pub struct ReportWriter {
    output_directory: PathBuf,
    file_extension: String,
    sheet_name: String,
}

impl ReportWriter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            output_directory: config.directory.clone(),
            file_extension: config.file_extension.clone(),
            sheet_name: config.sheet_name.clone(),
        }
    }

    pub fn with_output_directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.output_directory = directory.into();
        self
    }

    pub fn report_path(&self, metadata: &ReportMetadata) -> PathBuf {
        self.output_directory
            .join(metadata.report_file_name(&self.file_extension))
    }

    /// Write `table` under the output directory, named after `metadata`.
    pub fn write_report(&self, table: &ReportTable, metadata: &ReportMetadata) -> Result<PathBuf> {
        let destination = self.report_path(metadata);
        self.write_to(table, &destination)?;
        Ok(destination)
    }

    pub fn write_to(&self, table: &ReportTable, destination: &Path) -> Result<()> {
        let parent = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        fs::create_dir_all(parent).map_err(|e| WordFreqError::ReportWrite {
            path: parent.display().to_string(),
            message: format!("cannot create output directory: {}", e),
        })?;

        let buffer = self
            .render_workbook(table)
            .map_err(|e| write_error(destination, e))?;

        let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| write_error(destination, e))?;
        temp_file
            .write_all(&buffer)
            .and_then(|_| temp_file.as_file().sync_all())
            .map_err(|e| write_error(destination, e))?;
        temp_file
            .persist(destination)
            .map_err(|e| write_error(destination, e.error))?;

        tracing::info!(
            path = %destination.display(),
            rows = table.len(),
            "report written"
        );

        Ok(())
    }

    fn render_workbook(&self, table: &ReportTable) -> std::result::Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        let header_format = Format::new().set_bold();
        for (col, title) in table.header().iter().enumerate() {
            worksheet.write_string_with_format(0, column(col)?, title, &header_format)?;
        }

        for (index, row) in table.rows().iter().enumerate() {
            let row_num = u32::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;

            worksheet.write_string(row_num, 0, &row.theme)?;
            worksheet.write_string(row_num, 1, &row.year)?;
            worksheet.write_string(row_num, 2, &row.file_name)?;

            for (offset, count) in row.counts.iter().enumerate() {
                worksheet.write_number(row_num, column(3 + offset)?, *count as f64)?;
            }
            worksheet.write_number(row_num, column(3 + row.counts.len())?, row.total as f64)?;
        }

        worksheet.autofit();

        workbook.save_to_buffer()
    }
}

/// Write `table` to `destination` with the default sheet layout.
pub fn write_report(table: &ReportTable, destination: &Path) -> Result<()> {
    ReportWriter::new(&OutputConfig::default()).write_to(table, destination)
}

fn column(index: usize) -> std::result::Result<u16, XlsxError> {
    u16::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn write_error<E: std::fmt::Display>(path: &Path, error: E) -> WordFreqError {
    WordFreqError::ReportWrite {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
