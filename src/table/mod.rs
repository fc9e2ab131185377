//! # Tables
//!
//! In-memory tables flowing through a merge run:
//!
//! - [`RawTable`]: a predictor's TSV output as written, header plus string cells
//! - [`PredictionTable`]: one predictor's scores in canonical shape, unique per peptide
//! - [`MetadataTable`]: per-peptide annotations keyed by `sequence`
//!
//! All tables are built once per run and owned by whichever step is
//! processing them.

mod error;
mod metadata;
mod prediction;
mod raw;


pub use error::TableError;
pub use metadata::MetadataTable;
pub use prediction::{column_name, PredictionRow, PredictionTable};
pub use raw::{cell, parse_score, RawTable};
