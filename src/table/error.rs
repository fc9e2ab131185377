/// Errors that can occur while reading or building tables
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// I/O error reading or writing a table file
    #[error("Failed to access table file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV/TSV parsing error
    #[error("TSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// A column the table layout requires is absent
    #[error("Missing required column '{column}' in {table}")]
    MissingColumn {
        /// Table (usually a file path) being read
        table: String,
        /// Name of the absent column
        column: String,
    },

    /// A score cell is neither a number nor a missing-value token
    #[error("Invalid score '{value}' for peptide {sequence} in column '{column}' of {table}")]
    InvalidScore {
        /// Table being read
        table: String,
        /// Peptide of the offending row
        sequence: String,
        /// Column of the offending cell
        column: String,
        /// Raw cell text
        value: String,
    },

    /// A peptide occurs more than once in a table that must be keyed by peptide
    #[error("Duplicate peptide {sequence} in {table}")]
    DuplicateKey {
        /// Table being built
        table: String,
        /// Repeated peptide
        sequence: String,
    },

    /// A row does not have one score per column
    #[error("Row for peptide {sequence} in {table} has {found} scores, expected {expected}")]
    RowWidth {
        /// Table being built
        table: String,
        /// Peptide of the offending row
        sequence: String,
        /// Number of columns
        expected: usize,
        /// Number of scores in the row
        found: usize,
    },
}
