//! # pepmerge - Peptide Binding Prediction Harmonizer
//!
//! `pepmerge` merges the outputs of several peptide-MHC binding predictors
//! into one per-peptide table. Each predictor writes its own column layout,
//! its own allele spelling and its own score semantics; `pepmerge` brings
//! them to a common shape and joins them on the peptide sequence.
//!
//! ## Key Features
//!
//! - **Allele Canonicalization**: `HLA-A02:01`, `HLA-A*02:01` and `A0201`
//!   all become `HLA-A*02:01`, so columns line up across predictors.
//!
//! - **Predictor Adapters**: long-format rank tables are deduplicated and
//!   pivoted; wide tables are pruned to the metric of interest and renamed.
//!
//! - **Directional Thresholds**: rank predictors keep peptides at or below
//!   the threshold, score predictors at or above; one qualifying allele is
//!   enough.
//!
//! - **Key-Based Merge**: prediction tables are outer joined on the peptide
//!   sequence, then inner joined with the input metadata.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pepmerge::prelude::*;
//! use std::path::Path;
//!
//! let thresholds = Thresholds::new()
//!     .with(Predictor::NetMhcPan, 2.0)
//!     .with(Predictor::Syfpeithi, 50.0);
//! let ctx = RunContext::new(thresholds).with_dropped_metadata_columns(["id"]);
//!
//! let inputs = vec![
//!     PredictionInput::new("sample1_predicted_netmhcpan.tsv"),
//!     PredictionInput::new("sample1_predicted_syfpeithi.tsv"),
//! ];
//! let output = run(&inputs, Path::new("sample1_peptides.tsv"), &ctx)?;
//! output.table.write_tsv("sample1_predictions.tsv")?;
//! # Ok::<(), pepmerge::HarmonizeError>(())
//! ```
//!
//! ## Supported Predictors
//!
//! | Predictor | Layout | Output metric | Better |
//! |-----------|--------|---------------|--------|
//! | SYFPEITHI | wide scores | `relMaxScore` | higher |
//! | MHCflurry | wide, `presentation_percentile_*` | `percentile` | lower |
//! | MHCnuggets | wide, `human_proteome_rank_*` | `rank` | lower |
//! | NetMHCpan | long, `EL_Rank` | `rank` | lower |
//! | NetMHCIIpan | long, `Rank` | `rank` | lower |
//!
//! Output columns are named `{predictor}_{metric}_{allele}`, for example
//! `netmhcpan_rank_HLA-A*02:01`.
//!
//! ## Architecture
//!
//! - [`allele`]: MHC nomenclature parsing and canonical rendering
//! - [`predictor`]: supported predictors and their adapter configuration
//! - [`table`]: raw, prediction and metadata tables
//! - [`adapter`]: per-layout conversion to canonical shape
//! - [`filter`]: directional, any-allele threshold filter
//! - [`merge`]: key-based joins and TSV output
//! - [`context`]: per-run thresholds and diagnostics
//! - [`pipeline`]: end-to-end run over files
//! - [`summary`]: JSON run summary

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod adapter;
pub mod allele;
pub mod context;
pub mod filter;
pub mod merge;
pub mod pipeline;
pub mod predictor;
pub mod summary;
pub mod table;

mod error;

pub use error::HarmonizeError;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::adapter::adapt;
    pub use crate::allele::{canonicalize, CanonicalAllele, CanonicalizationError, MhcAllele};
    pub use crate::context::{Diagnostic, DiagnosticKind, Diagnostics, RunContext, Thresholds};
    pub use crate::error::HarmonizeError;
    pub use crate::filter::apply_threshold;
    pub use crate::merge::{merge, MergedTable};
    pub use crate::pipeline::{run, run_with_metadata, MergeOutput, PredictionInput};
    pub use crate::predictor::{Predictor, ScoreDirection};
    pub use crate::summary::RunSummary;
    pub use crate::table::{MetadataTable, PredictionRow, PredictionTable, RawTable, TableError};
}
