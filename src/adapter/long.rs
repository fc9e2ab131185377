use log::debug;
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use crate::allele::CanonicalAllele;
use crate::context::{DiagnosticKind, RunContext};
use crate::error::HarmonizeError;
use crate::predictor::{Predictor, KEY_COLUMNS};
use crate::table::{cell, PredictionRow, PredictionTable, RawTable};

use super::{canonicalize_or_drop, score_cell};

/// Pivot a one-row-per-(peptide, allele) table to one row per peptide.
///
/// Alleles are canonicalized before duplicate detection, so `HLA-A02:01` and
/// `HLA-A*02:01` for the same peptide count as one pair. The first
/// occurrence of a pair wins. Peptides keep first-seen order; allele columns
/// are sorted by canonical name.
pub(super) fn adapt_long(
    raw: &RawTable,
    predictor: Predictor,
    allele_column: &str,
    score_column: &str,
    ctx: &RunContext,
) -> Result<PredictionTable, HarmonizeError> {
    let key = raw.require_column(KEY_COLUMNS)?;
    let allele_index = raw.require_column(&[allele_column])?;
    let score_index = raw.require_column(&[score_column])?;

    // Raw allele text -> canonical form, or None once it failed
    let mut resolved: HashMap<String, Option<CanonicalAllele>> = HashMap::new();
    let mut peptides: Vec<String> = Vec::new();
    let mut peptide_index: HashMap<String, usize> = HashMap::new();
    let mut alleles: BTreeSet<CanonicalAllele> = BTreeSet::new();
    let mut cells: HashMap<(usize, CanonicalAllele), Option<f64>> = HashMap::new();
    let mut duplicates = 0usize;

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

        let peptide = match peptide_index.get(sequence) {
            Some(&index) => index,
            None => {
                peptides.push(sequence.to_string());
                peptide_index.insert(sequence.to_string(), peptides.len() - 1);
                peptides.len() - 1
            }
        };

        let raw_allele = cell(record, allele_index);
        let allele = match resolved.get(raw_allele) {
            Some(known) => known.clone(),
            None => {
                let allele = canonicalize_or_drop(raw_allele, predictor, raw.source(), ctx);
                resolved.insert(raw_allele.to_string(), allele.clone());
                allele
            }
        };
        let Some(allele) = allele else {
            continue;
        };

        let score = score_cell(raw, cell(record, score_index), sequence, score_index)?;
        match cells.entry((peptide, allele)) {
            Entry::Occupied(entry) => {
                duplicates += 1;
                debug!(
                    "{}: repeated pair ({}, {}), keeping first score",
                    raw.source(),
                    sequence,
                    entry.key().1
                );
            }
            Entry::Vacant(entry) => {
                alleles.insert(entry.key().1.clone());
                entry.insert(score);
            }
        }
    }

    if duplicates > 0 {
        ctx.diagnostics().warn(
            DiagnosticKind::DuplicatePair,
            raw.source(),
            format!(
                "{} repeated (peptide, allele) rows resolved by keeping the first occurrence",
                duplicates
            ),
        );
    }

    let alleles: Vec<CanonicalAllele> = alleles.into_iter().collect();
    let rows = peptides
        .into_iter()
        .enumerate()
        .map(|(peptide, sequence)| {
            let scores = alleles
                .iter()
                .map(|allele| {
                    cells
                        .get(&(peptide, allele.clone()))
                        .copied()
                        .flatten()
                })
                .collect();
            PredictionRow::new(sequence, scores)
        })
        .collect();

    Ok(PredictionTable::new(predictor, alleles, rows)?)
}
