//! JSON run summary: what each predictor contributed and what was dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::context::Diagnostic;
use crate::error::HarmonizeError;
use crate::predictor::Predictor;

/// Contribution of a single prediction file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorSummary {
    /// Predictor the file was attributed to
    pub predictor: Predictor,
    /// Input file
    pub source: String,
    /// Body rows in the raw file
    pub raw_rows: usize,
    /// Distinct peptides after adaptation
    pub adapted_rows: usize,
    /// Peptides left after threshold filtering
    pub retained_rows: usize,
    /// Threshold applied, if any
    pub threshold: Option<f64>,
    /// Output columns contributed
    pub columns: Vec<String>,
}

/// Summary of a whole merge run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// When the summary was produced
    pub generated_at: DateTime<Utc>,
    /// Metadata file
    pub metadata_source: String,
    /// Metadata rows read
    pub metadata_rows: usize,
    /// Per-file contributions, in input order
    pub predictors: Vec<PredictorSummary>,
    /// Rows in the merged output
    pub merged_rows: usize,
    /// Columns in the merged output
    pub merged_columns: usize,
    /// Recoverable problems recorded during the run
    pub diagnostics: Vec<Diagnostic>,
}

impl RunSummary {
    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, HarmonizeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, HarmonizeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the JSON summary to `path`
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), HarmonizeError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DiagnosticKind;

    #[test]
    fn test_summary_json_roundtrip() {
        let summary = RunSummary {
            generated_at: Utc::now(),
            metadata_source: "peptides.tsv".to_string(),
            metadata_rows: 3,
            predictors: vec![PredictorSummary {
                predictor: Predictor::NetMhcPan,
                source: "sample_netmhcpan.tsv".to_string(),
                raw_rows: 6,
                adapted_rows: 3,
                retained_rows: 2,
                threshold: Some(1.0),
                columns: vec!["netmhcpan_rank_HLA-A*02:01".to_string()],
            }],
            merged_rows: 2,
            merged_columns: 3,
            diagnostics: vec![Diagnostic {
                kind: DiagnosticKind::DroppedAllele,
                source: "sample_netmhcpan.tsv".to_string(),
                message: "Cannot canonicalize allele 'BoLA-1'".to_string(),
            }],
        };

        let json = summary.to_json().unwrap();
        assert!(json.contains("\"predictor\": \"netmhcpan\""));
        assert!(json.contains("\"kind\": \"dropped_allele\""));

        let restored = RunSummary::from_json(&json).unwrap();
        assert_eq!(restored, summary);
    }
}
