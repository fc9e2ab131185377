use crate::predictor::Predictor;

/// Reasons an allele string cannot be read as MHC nomenclature
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlleleParseError {
    /// Nothing left after trimming
    #[error("empty allele name")]
    Empty,

    /// Leading locus is not a known HLA or H2 gene
    #[error("unknown MHC gene in '{0}'")]
    UnknownGene(String),

    /// Gene is present but no allele fields follow it
    #[error("no allele fields after gene in '{0}'")]
    MissingFields(String),

    /// A field is not a 2-3 digit number, or compact digits cannot be split
    #[error("malformed allele fields '{0}'")]
    InvalidFields(String),

    /// Two chains that do not form a class II alpha/beta pair
    #[error("'{0}' is not a class II alpha/beta pair")]
    InvalidPair(String),

    /// More than two chains
    #[error("too many chains in '{0}'")]
    TooManyChains(String),
}

/// An allele reported by a predictor could not be canonicalized.
///
/// Callers drop the affected column and keep going.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cannot canonicalize allele '{raw}' reported by {predictor}: {source}")]
pub struct CanonicalizationError {
    /// The allele string as it appeared in the predictor output
    pub raw: String,
    /// Predictor that reported the allele
    pub predictor: Predictor,
    /// Underlying nomenclature problem
    pub source: AlleleParseError,
}
