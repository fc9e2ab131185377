//! Per-run context passed explicitly to every step.
//!
//! A [`RunContext`] carries the run's thresholds and required predictors,
//! plus a [`Diagnostics`] sink collecting recoverable problems (dropped
//! allele columns, skipped optional inputs) for the run summary. It is
//! `Sync`, so adapters running on worker threads can share it.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use crate::predictor::Predictor;

/// Optional score threshold per predictor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Thresholds(BTreeMap<Predictor, f64>);

impl Thresholds {
    /// No thresholds; nothing is filtered
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the threshold for `predictor`
    pub fn set(&mut self, predictor: Predictor, threshold: f64) {
        self.0.insert(predictor, threshold);
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, predictor: Predictor, threshold: f64) -> Self {
        self.set(predictor, threshold);
        self
    }

    /// Threshold for `predictor`, if configured
    pub fn get(&self, predictor: Predictor) -> Option<f64> {
        self.0.get(&predictor).copied()
    }
}

/// Category of a recoverable problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Allele could not be canonicalized; its column was dropped
    DroppedAllele,
    /// Two raw alleles canonicalized to the same name; the later one was dropped
    AlleleCollision,
    /// Repeated (peptide, allele) pair in long-format input; first kept
    DuplicatePair,
    /// Row without a peptide sequence was skipped
    SkippedRow,
    /// Predictor output had no usable allele columns
    NoAlleleColumns,
    /// Optional prediction file was not found
    MissingPredictionFile,
}

/// A recoverable problem recorded during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Problem category
    pub kind: DiagnosticKind,
    /// File or table the problem was found in
    pub source: String,
    /// Human-readable description naming the allele or peptide involved
    pub message: String,
}

/// Thread-safe collector of [`Diagnostic`]s. Every entry is also logged.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl Diagnostics {
    /// Empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a warning and record it
    pub fn warn(&self, kind: DiagnosticKind, source: impl Into<String>, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            kind,
            source: source.into(),
            message: message.into(),
        };
        warn!("{}: {}", diagnostic.source, diagnostic.message);
        self.lock().push(diagnostic);
    }

    /// Snapshot of everything recorded so far
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Number of entries of `kind`
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.lock().iter().filter(|d| d.kind == kind).count()
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Settings and diagnostics for one merge run
#[derive(Debug, Default)]
pub struct RunContext {
    thresholds: Thresholds,
    required: BTreeSet<Predictor>,
    drop_metadata_columns: Vec<String>,
    diagnostics: Diagnostics,
}

impl RunContext {
    /// Context with the given thresholds, nothing required
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            ..Default::default()
        }
    }

    /// Mark predictors whose output must be present
    pub fn with_required(mut self, required: impl IntoIterator<Item = Predictor>) -> Self {
        self.required.extend(required);
        self
    }

    /// Metadata columns removed before merging (e.g. `id`)
    pub fn with_dropped_metadata_columns(
        mut self,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.drop_metadata_columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// Configured thresholds
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Threshold for `predictor`
    pub fn threshold(&self, predictor: Predictor) -> Option<f64> {
        self.thresholds.get(predictor)
    }

    /// Whether `predictor` output is mandatory
    pub fn is_required(&self, predictor: Predictor) -> bool {
        self.required.contains(&predictor)
    }

    /// Mandatory predictors
    pub fn required(&self) -> impl Iterator<Item = Predictor> + '_ {
        self.required.iter().copied()
    }

    /// Metadata columns to drop
    pub fn dropped_metadata_columns(&self) -> &[String] {
        &self.drop_metadata_columns
    }

    /// Diagnostic sink for this run
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        let thresholds = Thresholds::new()
            .with(Predictor::NetMhcPan, 2.0)
            .with(Predictor::Syfpeithi, 50.0);
        assert_eq!(thresholds.get(Predictor::NetMhcPan), Some(2.0));
        assert_eq!(thresholds.get(Predictor::Mhcflurry), None);
    }

    #[test]
    fn test_diagnostics_shared_across_threads() {
        let ctx = RunContext::new(Thresholds::new());
        std::thread::scope(|scope| {
            for i in 0..4 {
                let ctx = &ctx;
                scope.spawn(move || {
                    ctx.diagnostics().warn(
                        DiagnosticKind::DroppedAllele,
                        format!("file{i}.tsv"),
                        "allele dropped",
                    );
                });
            }
        });
        assert_eq!(ctx.diagnostics().len(), 4);
        assert_eq!(ctx.diagnostics().count(DiagnosticKind::DroppedAllele), 4);
        assert_eq!(ctx.diagnostics().count(DiagnosticKind::SkippedRow), 0);
    }

    #[test]
    fn test_required_predictors() {
        let ctx = RunContext::new(Thresholds::new())
            .with_required([Predictor::NetMhcPan])
            .with_dropped_metadata_columns(["id"]);
        assert!(ctx.is_required(Predictor::NetMhcPan));
        assert!(!ctx.is_required(Predictor::Mhcflurry));
        assert_eq!(ctx.dropped_metadata_columns(), ["id".to_string()]);
    }
}
