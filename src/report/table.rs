use crate::counter::FrequencyRecord;
use serde::{Deserialize, Serialize};

pub const THEME_COLUMN: &str = "Theme";
pub const YEAR_COLUMN: &str = "Year";
pub const FILE_NAME_COLUMN: &str = "File Name";
pub const TOTAL_COLUMN: &str = "Keyword total";

/// Labels attached to every row and used to name the report file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub theme: String,
    pub fiscal_year: String,
}

impl ReportMetadata {
    pub fn new<T: Into<String>, Y: Into<String>>(theme: T, fiscal_year: Y) -> Self {
        Self {
            theme: theme.into(),
            fiscal_year: fiscal_year.into(),
        }
    }

    /// `{theme}_{fiscal_year}_word_frequency_report.{extension}`
    pub fn report_file_name(&self, extension: &str) -> String {
        let stem = format!("{}_{}_word_frequency_report", self.theme, self.fiscal_year);
        format!(
            "{}.{}",
            sanitize_file_stem(&stem),
            extension.trim_start_matches('.')
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub theme: String,
    pub year: String,
    pub file_name: String,
    pub counts: Vec<usize>,
    pub total: usize,
}

impl ReportRow {
    pub fn from_record(metadata: &ReportMetadata, file_name: &str, record: &FrequencyRecord) -> Self {
        let counts = record.counts();
        let total = counts.iter().sum();

        Self {
            theme: metadata.theme.clone(),
            year: metadata.fiscal_year.clone(),
            file_name: file_name.to_string(),
            counts,
            total,
        }
    }

    pub fn column_count(&self) -> usize {
        3 + self.counts.len() + 1
    }
}

/// Ordered report rows under a fixed header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTable {
    keywords: Vec<String>,
    rows: Vec<ReportRow>,
}

impl ReportTable {
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords,
            rows: Vec::new(),
        }
    }

    /// `[Theme, Year, File Name, <keywords...>, Keyword total]`
    pub fn header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.keywords.len() + 4);
        header.push(THEME_COLUMN.to_string());
        header.push(YEAR_COLUMN.to_string());
        header.push(FILE_NAME_COLUMN.to_string());
        header.extend(self.keywords.iter().cloned());
        header.push(TOTAL_COLUMN.to_string());
        header
    }

    /// Append a row. Rows come from `ReportRow::from_record` over this
    /// table's keywords, so widths and totals always line up.
    pub(crate) fn push_row(&mut self, row: ReportRow) {
        debug_assert_eq!(
            row.counts.len(),
            self.keywords.len(),
            "row for {} has {} counts for {} keywords",
            row.file_name,
            row.counts.len(),
            self.keywords.len()
        );
        debug_assert_eq!(
            row.total,
            row.counts.iter().sum::<usize>(),
            "row total for {} does not match its counts",
            row.file_name
        );
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        3 + self.keywords.len() + 1
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn grand_total(&self) -> usize {
        self.rows.iter().map(|row| row.total).sum()
    }
}

fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|ch| match ch {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' | '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
