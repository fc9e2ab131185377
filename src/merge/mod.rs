//! # Table Merging
//!
//! Joins adapted, filtered prediction tables with the metadata table:
//!
//! 1. Prediction tables are folded pairwise with a **full outer join** on
//!    the peptide sequence. The joined row set is the union of every
//!    table's peptides; a peptide absent from a table gets "no score" in
//!    that table's columns. Tables are never aligned by row position.
//! 2. The joined predictions are **inner joined** with the metadata: only
//!    metadata peptides present in at least one prediction table survive.
//! 3. Rows are sorted by sequence, ties kept in metadata order.

mod output;


use log::debug;
use std::collections::{BTreeMap, HashSet};

use crate::error::HarmonizeError;
use crate::table::{MetadataTable, PredictionTable};

pub use output::{MergedRow, MergedTable};

/// Union of prediction tables keyed by peptide
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinedPredictions {
    columns: Vec<String>,
    rows: BTreeMap<String, Vec<Option<f64>>>,
}

impl JoinedPredictions {
    /// Full outer join of `table` onto the current union.
    ///
    /// Fails if one of `table`'s columns is already present.
    pub fn outer_join(mut self, table: &PredictionTable) -> Result<Self, HarmonizeError> {
        let existing: HashSet<&str> = self.columns.iter().map(String::as_str).collect();
        if let Some(column) = table.columns().iter().find(|c| existing.contains(c.as_str())) {
            return Err(HarmonizeError::DuplicateColumn {
                column: column.clone(),
            });
        }

        let offset = self.columns.len();
        let width = offset + table.columns().len();
        self.columns.extend(table.columns().iter().cloned());

        for row in table.rows() {
            let scores = self
                .rows
                .entry(row.sequence.clone())
                .or_insert_with(|| vec![None; offset]);
            scores.extend(row.scores.iter().copied());
        }
        // Peptides missing from `table` get empty cells for its columns
        for scores in self.rows.values_mut() {
            scores.resize(width, None);
        }

        Ok(self)
    }

    /// Column names in join order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Scores for `sequence`
    pub fn get(&self, sequence: &str) -> Option<&[Option<f64>]> {
        self.rows.get(sequence).map(Vec::as_slice)
    }

    /// Number of distinct peptides
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if no peptides
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Peptides in sorted order
    pub fn sequences(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }
}

/// Outer join all prediction tables on peptide sequence.
pub fn join_predictions(tables: &[PredictionTable]) -> Result<JoinedPredictions, HarmonizeError> {
    tables
        .iter()
        .try_fold(JoinedPredictions::default(), |joined, table| joined.outer_join(table))
}

/// Merge metadata with prediction tables into the final output table.
pub fn merge(
    metadata: &MetadataTable,
    tables: &[PredictionTable],
) -> Result<MergedTable, HarmonizeError> {
    let joined = join_predictions(tables)?;
    debug!(
        "Joined {} prediction tables: {} peptides, {} columns",
        tables.len(),
        joined.len(),
        joined.columns().len()
    );

    let mut matched: Vec<&Vec<String>> = metadata
        .rows()
        .iter()
        .filter(|row| joined.get(metadata.sequence(row)).is_some())
        .collect();
    // Stable sort keeps metadata order among equal sequences
    matched.sort_by(|a, b| metadata.sequence(a).cmp(metadata.sequence(b)));

    let rows = matched
        .into_iter()
        .map(|row| MergedRow {
            metadata: row.clone(),
            scores: joined
                .get(metadata.sequence(row))
                .map(<[Option<f64>]>::to_vec)
                .unwrap_or_default(),
        })
        .collect();

    Ok(MergedTable::new(
        metadata.columns().to_vec(),
        joined.columns().to_vec(),
        rows,
    ))
}
