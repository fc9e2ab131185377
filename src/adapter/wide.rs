use log::debug;
use std::collections::HashSet;

use crate::allele::CanonicalAllele;
use crate::context::{DiagnosticKind, RunContext};
use crate::error::HarmonizeError;
use crate::predictor::{Predictor, KEY_COLUMNS};
use crate::table::{cell, PredictionRow, PredictionTable, RawTable, TableError};

use super::{canonicalize_or_drop, score_cell};

/// Adapt a table that already has one row per peptide.
///
/// With a `metric_prefix`, only columns carrying that prefix are kept and the
/// prefix is removed before canonicalization; otherwise every non-key column
/// is an allele.
pub(super) fn adapt_wide(
    raw: &RawTable,
    predictor: Predictor,
    metric_prefix: Option<&str>,
    ctx: &RunContext,
) -> Result<PredictionTable, HarmonizeError> {
    let key = raw.require_column(KEY_COLUMNS)?;
    let selected = select_allele_columns(raw, key, predictor, metric_prefix, ctx);

    let mut seen = HashSet::with_capacity(raw.len());
    let mut rows = Vec::with_capacity(raw.len());
    for (line, record) in raw.records().enumerate() {
        let sequence = cell(record, key);
        if sequence.is_empty() {
            ctx.diagnostics().warn(
                DiagnosticKind::SkippedRow,
                raw.source(),
                format!("data row {} has no peptide sequence", line + 1),
            );
            continue;
        }
        // No tie-break for wide layouts
        if !seen.insert(sequence.to_string()) {
            return Err(TableError::DuplicateKey {
                table: raw.source().to_string(),
                sequence: sequence.to_string(),
            }
            .into());
        }

        let scores = selected
            .iter()
            .map(|(index, _)| score_cell(raw, cell(record, *index), sequence, *index))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(PredictionRow::new(sequence, scores));
    }

    let alleles = selected.into_iter().map(|(_, allele)| allele).collect();
    Ok(PredictionTable::new(predictor, alleles, rows)?)
}

fn select_allele_columns(
    raw: &RawTable,
    key: usize,
    predictor: Predictor,
    metric_prefix: Option<&str>,
    ctx: &RunContext,
) -> Vec<(usize, CanonicalAllele)> {
    let mut selected: Vec<(usize, CanonicalAllele)> = Vec::new();

    for (index, header) in raw.headers().iter().enumerate() {
        if index == key {
            continue;
        }
        let allele_text = match metric_prefix {
            Some(prefix) => match header.strip_prefix(prefix) {
                Some(rest) => rest,
                None => continue,
            },
            None => header.as_str(),
        };
        // Unnamed index columns left behind by dataframe exports
        if allele_text.is_empty() || allele_text.starts_with("Unnamed") {
            debug!("{}: skipping unnamed column {}", raw.source(), index);
            continue;
        }

        let Some(allele) = canonicalize_or_drop(allele_text, predictor, raw.source(), ctx) else {
            continue;
        };
        if let Some((first, _)) = selected.iter().find(|(_, a)| *a == allele) {
            ctx.diagnostics().warn(
                DiagnosticKind::AlleleCollision,
                raw.source(),
                format!(
                    "column '{}' and column '{}' both name {}; keeping '{}'",
                    raw.headers()[*first],
                    header,
                    allele,
                    raw.headers()[*first]
                ),
            );
            continue;
        }
        selected.push((index, allele));
    }

    selected
}
