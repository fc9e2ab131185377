use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::TableError;

/// Tokens read as "no score"
const MISSING_TOKENS: &[&str] = &["", "NA", "NaN", "nan", "None", "N/A"];

/// A tab-delimited table exactly as a predictor wrote it.
#[derive(Debug, Clone)]
pub struct RawTable {
    source: String,
    headers: Vec<String>,
    records: Vec<csv::StringRecord>,
}

impl RawTable {
    /// Read a tab-delimited file with a header row
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), path.display().to_string())
    }

    /// Read tab-delimited text from a reader; `source` names it in errors
    pub fn from_reader<R: Read>(reader: R, source: impl Into<String>) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let records = csv_reader
            .records()
            .collect::<Result<Vec<_>, csv::Error>>()?;

        Ok(Self {
            source: source.into(),
            headers,
            records,
        })
    }

    /// Where this table came from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Header row
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of body rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if there are no body rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of the first column named like any of `names`, in `names` order
    pub fn find_column(&self, names: &[&str]) -> Option<usize> {
        names
            .iter()
            .find_map(|name| self.headers.iter().position(|h| h == name))
    }

    /// Like [`find_column`](Self::find_column) but a missing column is an error
    pub fn require_column(&self, names: &[&str]) -> Result<usize, TableError> {
        self.find_column(names)
            .ok_or_else(|| TableError::MissingColumn {
                table: self.source.clone(),
                column: names.join("|"),
            })
    }

    /// Body rows; short rows yield empty cells through [`cell`]
    pub fn records(&self) -> impl Iterator<Item = &csv::StringRecord> {
        self.records.iter()
    }
}

/// Cell `index` of `record`, trimmed; missing trailing cells read as empty
pub fn cell(record: &csv::StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("").trim()
}

/// Parse a score cell. Missing-value tokens and NaN become `None`.
pub fn parse_score(value: &str) -> Option<Option<f64>> {
    let value = value.trim();
    if MISSING_TOKENS.contains(&value) {
        return Some(None);
    }
    let score: f64 = value.parse().ok()?;
    if score.is_nan() {
        Some(None)
    } else {
        Some(Some(score))
    }
}
