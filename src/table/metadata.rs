use std::io::Read;
use std::path::Path;

use crate::predictor::KEY_COLUMNS;

use super::raw::{cell, RawTable};
use super::TableError;

/// Per-peptide annotations supplied alongside the predictions.
///
/// Rows keep their file order; that order breaks ties when the merged
/// output is sorted by sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataTable {
    source: String,
    columns: Vec<String>,
    key_index: usize,
    rows: Vec<Vec<String>>,
}

impl MetadataTable {
    /// Read the metadata TSV
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        Self::from_raw(RawTable::from_path(path)?)
    }

    /// Read metadata TSV text from a reader
    pub fn from_reader<R: Read>(reader: R, source: impl Into<String>) -> Result<Self, TableError> {
        Self::from_raw(RawTable::from_reader(reader, source)?)
    }

    fn from_raw(raw: RawTable) -> Result<Self, TableError> {
        let key_index = raw.require_column(KEY_COLUMNS)?;
        let width = raw.headers().len();
        let rows = raw
            .records()
            .map(|record| (0..width).map(|i| cell(record, i).to_string()).collect())
            .collect();

        Ok(Self {
            source: raw.source().to_string(),
            columns: raw.headers().to_vec(),
            key_index,
            rows,
        })
    }

    /// Remove annotation columns by name. The key column is never removed.
    /// Returns the names actually removed.
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<String> {
        let key = self.columns[self.key_index].clone();
        let drop: Vec<bool> = self
            .columns
            .iter()
            .map(|c| *c != key && names.iter().any(|n| n.as_ref() == c))
            .collect();
        if !drop.contains(&true) {
            return Vec::new();
        }

        let removed = self
            .columns
            .iter()
            .zip(&drop)
            .filter(|(_, d)| **d)
            .map(|(c, _)| c.clone())
            .collect();

        let keep = |values: &[String]| -> Vec<String> {
            values
                .iter()
                .zip(&drop)
                .filter(|(_, d)| !**d)
                .map(|(v, _)| v.clone())
                .collect()
        };
        self.columns = keep(&self.columns);
        self.rows = self.rows.iter().map(|row| keep(row)).collect();
        self.key_index = self
            .columns
            .iter()
            .position(|c| *c == key)
            .unwrap_or_default();

        removed
    }

    /// Where the metadata came from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Column names in file order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in file order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Peptide key of `row`
    pub fn sequence<'a>(&self, row: &'a [String]) -> &'a str {
        &row[self.key_index]
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
