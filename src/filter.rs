//! Threshold filtering of adapted prediction tables.
//!
//! A peptide survives if **any** of its allele scores passes the threshold
//! in the predictor's direction. Missing scores never pass, but they do not
//! disqualify a peptide that passes on another allele.

use log::debug;

use crate::predictor::ScoreDirection;
use crate::table::PredictionTable;

/// Whether any score in `scores` passes `threshold`.
pub fn any_allele_qualifies(
    scores: &[Option<f64>],
    threshold: f64,
    direction: ScoreDirection,
) -> bool {
    scores
        .iter()
        .flatten()
        .any(|&score| direction.qualifies(score, threshold))
}

/// Keep peptides with at least one qualifying allele score.
///
/// Without a threshold the table is returned unchanged.
pub fn apply_threshold(
    mut table: PredictionTable,
    threshold: Option<f64>,
    direction: ScoreDirection,
) -> PredictionTable {
    let Some(threshold) = threshold else {
        return table;
    };

    let before = table.len();
    table.retain(|row| any_allele_qualifies(&row.scores, threshold, direction));
    debug!(
        "{} threshold {} ({:?}): kept {} of {} peptides",
        table.predictor(),
        threshold,
        direction,
        table.len(),
        before
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allele::canonicalize;
    use crate::predictor::Predictor;
    use crate::table::PredictionRow;

    fn two_allele_table(predictor: Predictor, rows: Vec<(&str, [Option<f64>; 2])>) -> PredictionTable {
        let alleles = vec![
            canonicalize("HLA-A*02:01", predictor).unwrap(),
            canonicalize("HLA-B*07:02", predictor).unwrap(),
        ];
        let rows = rows
            .into_iter()
            .map(|(seq, scores)| PredictionRow::new(seq, scores.to_vec()))
            .collect();
        PredictionTable::new(predictor, alleles, rows).unwrap()
    }

    fn sequences(table: &PredictionTable) -> Vec<&str> {
        table.rows().iter().map(|r| r.sequence.as_str()).collect()
    }

    #[test]
    fn test_lower_is_better() {
        let table = two_allele_table(
            Predictor::NetMhcPan,
            vec![
                ("PEPA", [Some(1.5), Some(3.0)]),
                ("PEPB", [Some(5.0), Some(4.0)]),
                ("PEPC", [None, Some(1.0)]),
            ],
        );
        let filtered = apply_threshold(table, Some(2.0), ScoreDirection::LowerIsBetter);
        assert_eq!(sequences(&filtered), ["PEPA", "PEPC"]);
    }

    #[test]
    fn test_higher_is_better() {
        let table = two_allele_table(
            Predictor::Syfpeithi,
            vec![
                ("PEPA", [Some(70.0), Some(10.0)]),
                ("PEPB", [Some(10.0), Some(20.0)]),
            ],
        );
        let filtered = apply_threshold(table, Some(60.0), ScoreDirection::HigherIsBetter);
        assert_eq!(sequences(&filtered), ["PEPA"]);
    }

    #[test]
    fn test_no_threshold_passes_everything() {
        let table = two_allele_table(
            Predictor::Mhcflurry,
            vec![("PEPA", [None, None]), ("PEPB", [Some(99.0), Some(99.0)])],
        );
        let filtered = apply_threshold(table.clone(), None, ScoreDirection::LowerIsBetter);
        assert_eq!(filtered, table);
    }

    #[test]
    fn test_all_missing_never_qualifies() {
        assert!(!any_allele_qualifies(&[None, None], 100.0, ScoreDirection::LowerIsBetter));
        assert!(!any_allele_qualifies(&[], 0.0, ScoreDirection::HigherIsBetter));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(any_allele_qualifies(&[Some(2.0)], 2.0, ScoreDirection::LowerIsBetter));
        assert!(any_allele_qualifies(&[Some(60.0)], 60.0, ScoreDirection::HigherIsBetter));
    }
}
