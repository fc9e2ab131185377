//! # Predictor Adapters
//!
//! Converts a predictor's [`RawTable`] into a [`PredictionTable`]: one row per
//! peptide, one `{predictor}_{metric}_{allele}` column per canonical allele.
//!
//! The strategy is chosen by the predictor's [`Layout`]:
//!
//! - [`Layout::WideScore`] / [`Layout::WideRank`]: allele columns are
//!   selected (by metric prefix for rank tables), stripped of the prefix and
//!   canonicalized. See `wide.rs`.
//! - [`Layout::LongRank`]: allele values are canonicalized, repeated
//!   (peptide, allele) pairs are resolved by keeping the first occurrence,
//!   and the table is pivoted to wide form. See `long.rs`.
//!
//! Alleles that cannot be canonicalized are dropped and reported through
//! the run's [`Diagnostics`](crate::context::Diagnostics); structural
//! problems (missing key/allele/score columns, non-numeric scores) are
//! returned as errors.

mod long;
mod wide;


use log::debug;

use crate::allele::{canonicalize, CanonicalAllele};
use crate::context::{DiagnosticKind, RunContext};
use crate::error::HarmonizeError;
use crate::predictor::{Layout, Predictor};
use crate::table::{parse_score, PredictionTable, RawTable, TableError};

/// Adapt `raw`, known to come from `predictor`, into canonical shape.
pub fn adapt(
    raw: &RawTable,
    predictor: Predictor,
    ctx: &RunContext,
) -> Result<PredictionTable, HarmonizeError> {
    debug!(
        "Adapting {} ({} rows) as {} output",
        raw.source(),
        raw.len(),
        predictor
    );

    let table = match predictor.spec().layout {
        Layout::WideScore => wide::adapt_wide(raw, predictor, None, ctx)?,
        Layout::WideRank { metric_prefix } => {
            wide::adapt_wide(raw, predictor, Some(metric_prefix), ctx)?
        }
        Layout::LongRank {
            allele_column,
            score_column,
        } => long::adapt_long(raw, predictor, allele_column, score_column, ctx)?,
    };

    if table.alleles().is_empty() {
        ctx.diagnostics().warn(
            DiagnosticKind::NoAlleleColumns,
            raw.source(),
            format!("no usable {} allele columns", predictor),
        );
    }

    debug!(
        "{}: {} peptides x {} alleles",
        raw.source(),
        table.len(),
        table.alleles().len()
    );
    Ok(table)
}

/// Canonicalize `raw_allele`, recording a diagnostic and returning `None`
/// when it cannot be parsed.
fn canonicalize_or_drop(
    raw_allele: &str,
    predictor: Predictor,
    source: &str,
    ctx: &RunContext,
) -> Option<CanonicalAllele> {
    match canonicalize(raw_allele, predictor) {
        Ok(allele) => Some(allele),
        Err(e) => {
            ctx.diagnostics()
                .warn(DiagnosticKind::DroppedAllele, source, e.to_string());
            None
        }
    }
}

fn score_cell(
    raw: &RawTable,
    value: &str,
    sequence: &str,
    column: usize,
) -> Result<Option<f64>, TableError> {
    parse_score(value).ok_or_else(|| TableError::InvalidScore {
        table: raw.source().to_string(),
        sequence: sequence.to_string(),
        column: raw.headers().get(column).cloned().unwrap_or_default(),
        value: value.to_string(),
    })
}
