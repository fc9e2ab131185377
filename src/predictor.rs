//! Supported prediction tools and the layout of their output tables.
//!
//! Every predictor is classified exactly once per input file. The resulting
//! [`Predictor`] carries everything downstream steps need to know about it:
//! how its raw table is shaped, which metric it reports and in which
//! direction a score improves.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Column names accepted as the shared peptide key.
pub const KEY_COLUMNS: &[&str] = &["sequence", "peptide", "Peptide"];

/// A peptide-MHC binding predictor whose output can be harmonized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Predictor {
    /// SYFPEITHI matrix scores relative to the matrix maximum
    Syfpeithi,
    /// MHCflurry presentation percentiles
    Mhcflurry,
    /// MHCnuggets human proteome ranks
    Mhcnuggets,
    /// NetMHCpan eluted-ligand ranks (class I)
    NetMhcPan,
    /// NetMHCIIpan ranks (class II)
    NetMhcIIPan,
}

/// Which way a score moves for a stronger binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDirection {
    /// Larger scores indicate stronger binders
    HigherIsBetter,
    /// Smaller scores (ranks, percentiles) indicate stronger binders
    LowerIsBetter,
}

impl ScoreDirection {
    /// Whether `score` passes `threshold` in this direction (inclusive).
    pub fn qualifies(self, score: f64, threshold: f64) -> bool {
        match self {
            ScoreDirection::HigherIsBetter => score >= threshold,
            ScoreDirection::LowerIsBetter => score <= threshold,
        }
    }
}

/// Shape of a predictor's raw output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One row per peptide, each remaining column is an allele holding a score.
    WideScore,
    /// One row per peptide, allele columns decorated with a metric prefix.
    /// Only columns starting with `metric_prefix` are kept.
    WideRank {
        /// Prefix of the columns carrying the metric of interest
        metric_prefix: &'static str,
    },
    /// One row per (peptide, allele) pair.
    LongRank {
        /// Column holding the allele name
        allele_column: &'static str,
        /// Column holding the score
        score_column: &'static str,
    },
}

/// Adapter configuration attached to a [`Predictor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterSpec {
    /// Raw table shape
    pub layout: Layout,
    /// Metric label used in output column names
    pub metric: &'static str,
    /// Score directionality used by the threshold filter
    pub direction: ScoreDirection,
}

impl Predictor {
    /// All supported predictors.
    pub const ALL: [Predictor; 5] = [
        Predictor::Syfpeithi,
        Predictor::Mhcflurry,
        Predictor::Mhcnuggets,
        Predictor::NetMhcPan,
        Predictor::NetMhcIIPan,
    ];

    /// Lowercase tool name, used in file names and output column prefixes.
    pub fn name(self) -> &'static str {
        match self {
            Predictor::Syfpeithi => "syfpeithi",
            Predictor::Mhcflurry => "mhcflurry",
            Predictor::Mhcnuggets => "mhcnuggets",
            Predictor::NetMhcPan => "netmhcpan",
            Predictor::NetMhcIIPan => "netmhciipan",
        }
    }

    /// Adapter configuration for this predictor.
    pub fn spec(self) -> AdapterSpec {
        match self {
            Predictor::Syfpeithi => AdapterSpec {
                layout: Layout::WideScore,
                metric: "relMaxScore",
                direction: ScoreDirection::HigherIsBetter,
            },
            Predictor::Mhcflurry => AdapterSpec {
                layout: Layout::WideRank {
                    metric_prefix: "presentation_percentile_",
                },
                metric: "percentile",
                direction: ScoreDirection::LowerIsBetter,
            },
            Predictor::Mhcnuggets => AdapterSpec {
                layout: Layout::WideRank {
                    metric_prefix: "human_proteome_rank_",
                },
                metric: "rank",
                direction: ScoreDirection::LowerIsBetter,
            },
            Predictor::NetMhcPan => AdapterSpec {
                layout: Layout::LongRank {
                    allele_column: "allele",
                    score_column: "EL_Rank",
                },
                metric: "rank",
                direction: ScoreDirection::LowerIsBetter,
            },
            Predictor::NetMhcIIPan => AdapterSpec {
                layout: Layout::LongRank {
                    allele_column: "allele",
                    score_column: "Rank",
                },
                metric: "rank",
                direction: ScoreDirection::LowerIsBetter,
            },
        }
    }

    /// Score directionality shortcut.
    pub fn direction(self) -> ScoreDirection {
        self.spec().direction
    }

    /// Identify a predictor from its file name.
    ///
    /// Returns `None` when no predictor name, or more than one, appears in
    /// the file name. Parent directories are ignored.
    pub fn from_file_name(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_string_lossy().to_lowercase();
        let mut matches = Self::ALL
            .iter()
            .copied()
            .filter(|p| file_name.contains(p.name()));
        let first = matches.next()?;
        match matches.next() {
            Some(_) => None,
            None => Some(first),
        }
    }

    /// Identify a predictor from the header row of its output table.
    ///
    /// SYFPEITHI tables have no distinguishing column and are never
    /// recognized this way.
    pub fn from_columns<S: AsRef<str>>(headers: &[S]) -> Option<Self> {
        let has = |name: &str| headers.iter().any(|h| h.as_ref() == name);
        let has_prefix = |prefix: &str| headers.iter().any(|h| h.as_ref().starts_with(prefix));

        if has_prefix("presentation_percentile_") {
            Some(Predictor::Mhcflurry)
        } else if has_prefix("human_proteome_rank_") {
            Some(Predictor::Mhcnuggets)
        } else if has("allele") && has("EL_Rank") {
            Some(Predictor::NetMhcPan)
        } else if has("allele") && has("Rank") {
            Some(Predictor::NetMhcIIPan)
        } else {
            None
        }
    }

    /// Undo the allele rewriting this predictor applies to its input alleles.
    ///
    /// NetMHCIIpan writes DR alleles as `DRB1_0101`, replacing the asterisk
    /// with an underscore and dropping colons.
    pub fn clean_allele(self, raw: &str) -> Cow<'_, str> {
        let trimmed = raw.trim().trim_matches('"');
        match self {
            Predictor::NetMhcIIPan if trimmed.contains('_') => {
                Cow::Owned(trimmed.replace('_', "*"))
            }
            _ => Cow::Borrowed(trimmed),
        }
    }
}

impl fmt::Display for Predictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Predictor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == lowered)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|p| p.name()).collect();
                format!(
                    "Unknown predictor '{}'. Valid options: {}",
                    s,
                    names.join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_name() {
        assert_eq!(
            Predictor::from_file_name(Path::new("/work/sample1_predicted_netmhcpan.tsv")),
            Some(Predictor::NetMhcPan)
        );
        assert_eq!(
            Predictor::from_file_name(Path::new("sample1_netmhciipan.tsv")),
            Some(Predictor::NetMhcIIPan)
        );
        assert_eq!(
            Predictor::from_file_name(Path::new("SAMPLE_MHCflurry.tsv")),
            Some(Predictor::Mhcflurry)
        );
        assert_eq!(Predictor::from_file_name(Path::new("predictions.tsv")), None);
    }

    #[test]
    fn test_from_file_name_ignores_directories_and_rejects_ambiguity() {
        assert_eq!(
            Predictor::from_file_name(Path::new("mhcflurry/out/sample_syfpeithi.tsv")),
            Some(Predictor::Syfpeithi)
        );
        assert_eq!(
            Predictor::from_file_name(Path::new("syfpeithi_vs_mhcflurry.tsv")),
            None
        );
    }

    #[test]
    fn test_from_columns() {
        assert_eq!(
            Predictor::from_columns(&["peptide", "presentation_percentile_HLA-A*02:01"]),
            Some(Predictor::Mhcflurry)
        );
        assert_eq!(
            Predictor::from_columns(&["peptide", "human_proteome_rank_HLA-A02:01"]),
            Some(Predictor::Mhcnuggets)
        );
        assert_eq!(
            Predictor::from_columns(&["Pos", "Peptide", "EL_Rank", "Rank", "allele"]),
            Some(Predictor::NetMhcPan)
        );
        assert_eq!(
            Predictor::from_columns(&["Peptide", "Rank", "allele"]),
            Some(Predictor::NetMhcIIPan)
        );
        assert_eq!(Predictor::from_columns(&["peptide", "HLA-A*02:01"]), None);
    }

    #[test]
    fn test_directions() {
        assert_eq!(Predictor::Syfpeithi.direction(), ScoreDirection::HigherIsBetter);
        for predictor in [
            Predictor::Mhcflurry,
            Predictor::Mhcnuggets,
            Predictor::NetMhcPan,
            Predictor::NetMhcIIPan,
        ] {
            assert_eq!(predictor.direction(), ScoreDirection::LowerIsBetter);
        }
        assert!(ScoreDirection::LowerIsBetter.qualifies(2.0, 2.0));
        assert!(ScoreDirection::HigherIsBetter.qualifies(60.0, 60.0));
        assert!(!ScoreDirection::HigherIsBetter.qualifies(59.9, 60.0));
    }

    #[test]
    fn test_from_str_roundtrip() {
        for predictor in Predictor::ALL {
            assert_eq!(Predictor::from_str(predictor.name()).unwrap(), predictor);
        }
        assert_eq!(Predictor::from_str("NetMHCpan").unwrap(), Predictor::NetMhcPan);
        assert!(Predictor::from_str("netchop").is_err());
    }

    #[test]
    fn test_clean_allele() {
        assert_eq!(Predictor::NetMhcIIPan.clean_allele("DRB1_0101"), "DRB1*0101");
        assert_eq!(Predictor::NetMhcPan.clean_allele(" HLA-A02:01 "), "HLA-A02:01");
    }
}
