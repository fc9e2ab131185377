use crate::predictor::Predictor;
use crate::table::TableError;

/// Errors that abort a merge run
#[derive(Debug, thiserror::Error)]
pub enum HarmonizeError {
    /// Input cannot be attributed to a known predictor
    #[error("Cannot determine predictor for {path}: no predictor declared, recognized in the file name, or matched by its columns")]
    UnsupportedPredictor {
        /// Offending input file
        path: String,
    },

    /// A required prediction file is absent
    #[error("Prediction file for required predictor {predictor} not found: {path}")]
    MissingPredictionFile {
        /// Predictor whose output is missing
        predictor: Predictor,
        /// Expected path, or `<not supplied>` when no input named it
        path: String,
    },

    /// Reading or building a table failed
    #[error("Table error: {0}")]
    TableError(#[from] TableError),

    /// Two prediction tables produce the same output column
    #[error("Column '{column}' is produced by more than one prediction table")]
    DuplicateColumn {
        /// Colliding column name
        column: String,
    },

    /// No prediction file contributed to the run
    #[error("No prediction tables to merge")]
    NoPredictions,

    /// Writing the merged output failed
    #[error("Failed to write output: {0}")]
    OutputError(#[from] std::io::Error),

    /// Serializing the run summary failed
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
