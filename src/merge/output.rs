use log::info;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::HarmonizeError;

/// One output row: metadata values followed by prediction scores
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    /// Metadata values, in metadata column order
    pub metadata: Vec<String>,
    /// Scores, in prediction column order; `None` renders as an empty field
    pub scores: Vec<Option<f64>>,
}

/// The merged per-peptide table
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTable {
    metadata_columns: Vec<String>,
    prediction_columns: Vec<String>,
    rows: Vec<MergedRow>,
}

impl MergedTable {
    pub(crate) fn new(
        metadata_columns: Vec<String>,
        prediction_columns: Vec<String>,
        rows: Vec<MergedRow>,
    ) -> Self {
        Self {
            metadata_columns,
            prediction_columns,
            rows,
        }
    }

    /// Metadata column names
    pub fn metadata_columns(&self) -> &[String] {
        &self.metadata_columns
    }

    /// Prediction column names
    pub fn prediction_columns(&self) -> &[String] {
        &self.prediction_columns
    }

    /// Full header: metadata columns then prediction columns
    pub fn header(&self) -> Vec<&str> {
        self.metadata_columns
            .iter()
            .chain(&self.prediction_columns)
            .map(String::as_str)
            .collect()
    }

    /// Rows in output order
    pub fn rows(&self) -> &[MergedRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of metadata column `column` in `row`
    pub fn metadata_value<'a>(&self, row: &'a MergedRow, column: &str) -> Option<&'a str> {
        let index = self.metadata_columns.iter().position(|c| c == column)?;
        row.metadata.get(index).map(String::as_str)
    }

    /// Score of prediction column `column` in `row`
    pub fn score(&self, row: &MergedRow, column: &str) -> Option<f64> {
        let index = self.prediction_columns.iter().position(|c| c == column)?;
        row.scores.get(index).copied().flatten()
    }

    /// Write as tab-delimited text with a header row
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), HarmonizeError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);

        csv_writer.write_record(self.header()).map_err(std::io::Error::from)?;
        for row in &self.rows {
            let scores = row.scores.iter().map(|score| match score {
                Some(value) => value.to_string(),
                None => String::new(),
            });
            let record: Vec<String> = row.metadata.iter().cloned().chain(scores).collect();
            csv_writer.write_record(&record).map_err(std::io::Error::from)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write to `path`. The file appears only once completely written.
    pub fn write_tsv<P: AsRef<Path>>(&self, path: P) -> Result<(), HarmonizeError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        self.write_to(temp.as_file_mut())?;
        temp.persist(path).map_err(|e| e.error)?;

        info!(
            "Wrote {} rows x {} columns to {}",
            self.rows.len(),
            self.metadata_columns.len() + self.prediction_columns.len(),
            path.display()
        );
        Ok(())
    }
}
