//! Property tests for canonicalization, filtering and merging

use pepmerge::allele::canonicalize;
use pepmerge::filter::{any_allele_qualifies, apply_threshold};
use pepmerge::merge::{merge, MergedTable};
use pepmerge::predictor::{Predictor, ScoreDirection};
use pepmerge::table::{MetadataTable, PredictionRow, PredictionTable};
use proptest::prelude::*;
use std::collections::BTreeMap;

const PEPTIDES: usize = 8;

fn gene() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["A", "B", "C", "E", "G"])
}

fn scores() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::of(0.0f64..100.0), 0..6)
}

fn peptide_scores() -> impl Strategy<Value = BTreeMap<usize, Option<f64>>> {
    prop::collection::btree_map(0..PEPTIDES, prop::option::of(0.0f64..100.0), 0..PEPTIDES)
}

fn table(predictor: Predictor, allele: &str, scores: &BTreeMap<usize, Option<f64>>) -> PredictionTable {
    let allele = canonicalize(allele, predictor).unwrap();
    let rows = scores
        .iter()
        .map(|(i, score)| PredictionRow::new(format!("PEP{}", i), vec![*score]))
        .collect();
    PredictionTable::new(predictor, vec![allele], rows).unwrap()
}

fn metadata() -> MetadataTable {
    let mut text = String::from("sequence\tgene\n");
    for i in (0..PEPTIDES).rev() {
        text.push_str(&format!("PEP{}\tG{}\n", i, i));
    }
    MetadataTable::from_reader(text.as_bytes(), "metadata.tsv").unwrap()
}

/// (sequence, column, score) triples of a merged table
fn cells(merged: &MergedTable) -> Vec<(String, String, Option<f64>)> {
    let mut cells: Vec<_> = merged
        .rows()
        .iter()
        .flat_map(|row| {
            let sequence = merged.metadata_value(row, "sequence").unwrap().to_string();
            merged
                .prediction_columns()
                .iter()
                .map(move |column| (sequence.clone(), column.clone(), merged.score(row, column)))
        })
        .collect();
    cells.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
    cells
}

proptest! {
    /// Canonical names map to themselves for every predictor
    #[test]
    fn test_canonicalize_idempotent(gene in gene(), f1 in 1u32..100, f2 in 1u32..100) {
        let raw = format!("HLA-{}{:02}:{:02}", gene, f1, f2);
        let canonical = canonicalize(&raw, Predictor::NetMhcPan).unwrap();
        prop_assert_eq!(canonical.as_str(), format!("HLA-{}*{:02}:{:02}", gene, f1, f2));

        for predictor in Predictor::ALL {
            let again = canonicalize(canonical.as_str(), predictor).unwrap();
            prop_assert_eq!(&again, &canonical);
        }
    }

    /// A row passes iff some present score passes
    #[test]
    fn test_any_allele_semantics(scores in scores(), threshold in 0.0f64..100.0) {
        let lower = scores.iter().flatten().any(|&s| s <= threshold);
        let higher = scores.iter().flatten().any(|&s| s >= threshold);
        prop_assert_eq!(any_allele_qualifies(&scores, threshold, ScoreDirection::LowerIsBetter), lower);
        prop_assert_eq!(any_allele_qualifies(&scores, threshold, ScoreDirection::HigherIsBetter), higher);
    }

    /// Filtering only removes rows and never reorders them
    #[test]
    fn test_filter_keeps_order(scores in peptide_scores(), threshold in 0.0f64..100.0) {
        let original = table(Predictor::Mhcflurry, "HLA-A*02:01", &scores);
        let filtered = apply_threshold(original.clone(), Some(threshold), ScoreDirection::LowerIsBetter);

        let kept: Vec<&str> = filtered.rows().iter().map(|r| r.sequence.as_str()).collect();
        let expected: Vec<&str> = original
            .rows()
            .iter()
            .filter(|r| r.scores[0].is_some_and(|s| s <= threshold))
            .map(|r| r.sequence.as_str())
            .collect();
        prop_assert_eq!(kept, expected);
    }

    /// Table order changes column order only
    #[test]
    fn test_merge_commutative(a in peptide_scores(), b in peptide_scores()) {
        let meta = metadata();
        let first = table(Predictor::NetMhcPan, "HLA-A02:01", &a);
        let second = table(Predictor::Syfpeithi, "HLA-A*02:01", &b);

        let ab = merge(&meta, &[first.clone(), second.clone()]).unwrap();
        let ba = merge(&meta, &[second, first]).unwrap();

        prop_assert_eq!(ab.len(), ba.len());
        prop_assert_eq!(cells(&ab), cells(&ba));

        let expected_rows = (0..PEPTIDES)
            .filter(|i| a.contains_key(i) || b.contains_key(i))
            .count();
        prop_assert_eq!(ab.len(), expected_rows);
    }
}
