use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use pepmerge::context::RunContext;
use pepmerge::pipeline;
use pepmerge::predictor::Predictor;

use super::config::Config;
use super::MergeArgs;

/// Merge prediction outputs with peptide metadata
pub fn run(args: MergeArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if !args.metadata.exists() {
        anyhow::bail!("Metadata file does not exist: {}", args.metadata.display());
    }

    let mut thresholds = config.thresholds.to_thresholds();
    for (predictor, value) in args.threshold_overrides() {
        thresholds.set(predictor, value);
    }
    let required: Vec<Predictor> = config
        .inputs
        .required
        .iter()
        .copied()
        .chain(args.required.iter().map(|&arg| Predictor::from(arg)))
        .collect();
    let dropped: Vec<String> = config
        .inputs
        .drop_metadata_columns
        .iter()
        .chain(&args.drop_columns)
        .cloned()
        .collect();

    let output = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(match &args.sample_id {
            Some(sample) => format!("{}_predictions.tsv", sample),
            None => "merged_predictions.tsv".to_string(),
        })
    });

    info!("pepmerge - prediction merge");
    info!("===========================");
    info!("Metadata: {}", args.metadata.display());
    for input in &args.inputs {
        info!("Input:    {}", input);
    }
    info!("Output:   {}", output.display());
    for predictor in Predictor::ALL {
        if let Some(threshold) = thresholds.get(predictor) {
            info!(
                "Threshold {}: {} ({:?})",
                predictor,
                threshold,
                predictor.direction()
            );
        }
    }

    let ctx = RunContext::new(thresholds)
        .with_required(required)
        .with_dropped_metadata_columns(dropped);

    let result = pipeline::run(&args.inputs, &args.metadata, &ctx).context("Merge failed")?;
    result
        .table
        .write_tsv(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if let Some(summary_path) = &args.summary {
        result
            .summary
            .write_json(summary_path)
            .with_context(|| format!("Failed to write summary {}", summary_path.display()))?;
        info!("Summary: {}", summary_path.display());
    }

    info!("Merge complete!");
    for contribution in &result.summary.predictors {
        info!(
            "  {} ({}): {} peptides, {} after threshold, {} columns",
            contribution.predictor,
            contribution.source,
            contribution.adapted_rows,
            contribution.retained_rows,
            contribution.columns.len()
        );
    }
    info!(
        "  Output rows: {} of {} metadata rows",
        result.summary.merged_rows, result.summary.metadata_rows
    );
    if !result.summary.diagnostics.is_empty() {
        warn!(
            "{} warnings recorded during the run",
            result.summary.diagnostics.len()
        );
    }

    Ok(())
}
