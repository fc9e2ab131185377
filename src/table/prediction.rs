use std::collections::HashSet;

use crate::allele::CanonicalAllele;
use crate::predictor::Predictor;

use super::TableError;

/// Scores of one peptide, one entry per allele column
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    /// Peptide sequence (join key)
    pub sequence: String,
    /// Score per allele column; `None` means no score
    pub scores: Vec<Option<f64>>,
}

impl PredictionRow {
    /// Create a row
    pub fn new(sequence: impl Into<String>, scores: Vec<Option<f64>>) -> Self {
        Self {
            sequence: sequence.into(),
            scores,
        }
    }
}

/// One predictor's output in canonical shape: one row per peptide and one
/// `{predictor}_{metric}_{allele}` column per canonical allele.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionTable {
    predictor: Predictor,
    alleles: Vec<CanonicalAllele>,
    columns: Vec<String>,
    rows: Vec<PredictionRow>,
}

impl PredictionTable {
    /// Build a table, checking peptide uniqueness and row widths.
    pub fn new(
        predictor: Predictor,
        alleles: Vec<CanonicalAllele>,
        rows: Vec<PredictionRow>,
    ) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            if row.scores.len() != alleles.len() {
                return Err(TableError::RowWidth {
                    table: predictor.to_string(),
                    sequence: row.sequence.clone(),
                    expected: alleles.len(),
                    found: row.scores.len(),
                });
            }
            if !seen.insert(row.sequence.as_str()) {
                return Err(TableError::DuplicateKey {
                    table: predictor.to_string(),
                    sequence: row.sequence.clone(),
                });
            }
        }

        let columns = alleles
            .iter()
            .map(|allele| column_name(predictor, allele))
            .collect();

        Ok(Self {
            predictor,
            alleles,
            columns,
            rows,
        })
    }

    /// Predictor that produced the table
    pub fn predictor(&self) -> Predictor {
        self.predictor
    }

    /// Canonical alleles, in column order
    pub fn alleles(&self) -> &[CanonicalAllele] {
        &self.alleles
    }

    /// Output column names, in column order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in input order
    pub fn rows(&self) -> &[PredictionRow] {
        &self.rows
    }

    /// Number of peptides
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if no peptides
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for `sequence`, if present
    pub fn row(&self, sequence: &str) -> Option<&PredictionRow> {
        self.rows.iter().find(|row| row.sequence == sequence)
    }

    /// Score of `sequence` in the column named `column`
    pub fn score(&self, sequence: &str, column: &str) -> Option<f64> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.row(sequence)?.scores[index]
    }

    /// Keep only rows matching `keep`; uniqueness is preserved
    pub fn retain<F: FnMut(&PredictionRow) -> bool>(&mut self, keep: F) {
        self.rows.retain(keep);
    }
}

/// Output column name for an allele reported by `predictor`
pub fn column_name(predictor: Predictor, allele: &CanonicalAllele) -> String {
    format!("{}_{}_{}", predictor.name(), predictor.spec().metric, allele)
}
