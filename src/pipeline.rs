//! # Merge Pipeline
//!
//! Drives one run end to end:
//!
//! ```text
//! prediction files ──> classify ──> adapt ──> threshold ──┐
//!                                                          ├──> merge ──> MergedTable
//! metadata file ──────────────────────> drop columns ─────┘
//! ```
//!
//! Each prediction file is handled in isolation; with the `parallel`
//! feature the files are adapted on the rayon pool. Results are joined only
//! in the merge step.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pepmerge::context::{RunContext, Thresholds};
//! use pepmerge::pipeline::{run, PredictionInput};
//! use pepmerge::predictor::Predictor;
//! use std::path::Path;
//!
//! let ctx = RunContext::new(Thresholds::new().with(Predictor::NetMhcPan, 2.0));
//! let inputs = vec![
//!     PredictionInput::new("sample_netmhcpan.tsv"),
//!     PredictionInput::declared(Predictor::Syfpeithi, "scores.tsv"),
//! ];
//! let output = run(&inputs, Path::new("peptides.tsv"), &ctx)?;
//! output.table.write_tsv("sample_predictions.tsv")?;
//! # Ok::<(), pepmerge::HarmonizeError>(())
//! ```

use log::info;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::adapter::adapt;
use crate::context::{DiagnosticKind, RunContext};
use crate::error::HarmonizeError;
use crate::filter::apply_threshold;
use crate::merge::{merge, MergedTable};
use crate::predictor::Predictor;
use crate::summary::{PredictorSummary, RunSummary};
use crate::table::{MetadataTable, PredictionTable, RawTable};

/// A prediction file, optionally with its predictor declared up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionInput {
    /// Path to the predictor's TSV output
    pub path: PathBuf,
    /// Declared predictor; inferred from file name or columns when `None`
    pub predictor: Option<Predictor>,
}

impl PredictionInput {
    /// Input whose predictor will be inferred
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            predictor: None,
        }
    }

    /// Input with a declared predictor
    pub fn declared(predictor: Predictor, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            predictor: Some(predictor),
        }
    }
}

/// Parses `path` or `predictor=path`.
impl FromStr for PredictionInput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, path)) => {
                if path.is_empty() {
                    return Err(format!("Missing path in '{}'", s));
                }
                Ok(Self::declared(Predictor::from_str(name)?, path))
            }
            None => Ok(Self::new(s)),
        }
    }
}

impl fmt::Display for PredictionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.predictor {
            Some(predictor) => write!(f, "{}={}", predictor, self.path.display()),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

/// An adapted, filtered prediction table and its bookkeeping
#[derive(Debug, Clone)]
pub struct Contribution {
    /// Table ready for merging
    pub table: PredictionTable,
    /// Row counts and columns for the run summary
    pub summary: PredictorSummary,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct MergeOutput {
    /// Merged table, ready to write
    pub table: MergedTable,
    /// What happened along the way
    pub summary: RunSummary,
}

/// Classify, adapt and filter one prediction file.
///
/// Returns `Ok(None)` when the file is absent and its predictor is not
/// required.
pub fn process_input(
    input: &PredictionInput,
    ctx: &RunContext,
) -> Result<Option<Contribution>, HarmonizeError> {
    let path = input.path.display().to_string();
    let named = input
        .predictor
        .or_else(|| Predictor::from_file_name(&input.path));

    if !input.path.is_file() {
        return match named {
            Some(predictor) if ctx.is_required(predictor) => {
                Err(HarmonizeError::MissingPredictionFile { predictor, path })
            }
            _ => {
                ctx.diagnostics().warn(
                    DiagnosticKind::MissingPredictionFile,
                    path,
                    "prediction file not found; its predictor is not required, skipping",
                );
                Ok(None)
            }
        };
    }

    let raw = RawTable::from_path(&input.path)?;
    let predictor = named
        .or_else(|| Predictor::from_columns(raw.headers()))
        .ok_or_else(|| HarmonizeError::UnsupportedPredictor { path: path.clone() })?;
    info!("{}: {} output, {} rows", path, predictor, raw.len());

    let table = adapt(&raw, predictor, ctx)?;
    let adapted_rows = table.len();
    let threshold = ctx.threshold(predictor);
    let table = apply_threshold(table, threshold, predictor.direction());

    let summary = PredictorSummary {
        predictor,
        source: path,
        raw_rows: raw.len(),
        adapted_rows,
        retained_rows: table.len(),
        threshold,
        columns: table.columns().to_vec(),
    };
    Ok(Some(Contribution { table, summary }))
}

/// Process every input, in input order.
pub fn collect_contributions(
    inputs: &[PredictionInput],
    ctx: &RunContext,
) -> Result<Vec<Contribution>, HarmonizeError> {
    #[cfg(feature = "parallel")]
    let results: Vec<Result<Option<Contribution>, HarmonizeError>> = {
        use rayon::prelude::*;
        inputs
            .par_iter()
            .map(|input| process_input(input, ctx))
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<Option<Contribution>, HarmonizeError>> = inputs
        .iter()
        .map(|input| process_input(input, ctx))
        .collect();

    let contributions: Vec<Contribution> = results
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect();

    for predictor in ctx.required() {
        if !contributions.iter().any(|c| c.summary.predictor == predictor) {
            return Err(HarmonizeError::MissingPredictionFile {
                predictor,
                path: "<not supplied>".to_string(),
            });
        }
    }

    Ok(contributions)
}

/// Merge already-loaded metadata with the given prediction files.
pub fn run_with_metadata(
    inputs: &[PredictionInput],
    mut metadata: MetadataTable,
    ctx: &RunContext,
) -> Result<MergeOutput, HarmonizeError> {
    let contributions = collect_contributions(inputs, ctx)?;
    if contributions.is_empty() {
        return Err(HarmonizeError::NoPredictions);
    }

    let removed = metadata.drop_columns(ctx.dropped_metadata_columns());
    if !removed.is_empty() {
        info!("Dropped metadata columns: {}", removed.join(", "));
    }

    let (tables, predictors): (Vec<PredictionTable>, Vec<PredictorSummary>) = contributions
        .into_iter()
        .map(|c| (c.table, c.summary))
        .unzip();
    let table = merge(&metadata, &tables)?;
    info!(
        "Merged {} prediction tables with {} metadata rows: {} rows out",
        tables.len(),
        metadata.len(),
        table.len()
    );

    let summary = RunSummary {
        generated_at: chrono::Utc::now(),
        metadata_source: metadata.source().to_string(),
        metadata_rows: metadata.len(),
        predictors,
        merged_rows: table.len(),
        merged_columns: table.header().len(),
        diagnostics: ctx.diagnostics().entries(),
    };

    Ok(MergeOutput { table, summary })
}

/// Run the full pipeline: read metadata from `metadata_path`, process the
/// prediction files and merge.
pub fn run(
    inputs: &[PredictionInput],
    metadata_path: &Path,
    ctx: &RunContext,
) -> Result<MergeOutput, HarmonizeError> {
    let metadata = MetadataTable::from_path(metadata_path)?;
    run_with_metadata(inputs, metadata, ctx)
}
