//! TOML configuration file support.
//!
//! Thresholds and input settings can live in a config file instead of
//! flags; flags given on the command line win:
//!
//! ```toml
//! # pepmerge.toml
//! [thresholds]
//! syfpeithi = 50
//! netmhcpan = 2.0
//!
//! [inputs]
//! required = ["netmhcpan"]
//! drop_metadata_columns = ["id"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use pepmerge::context::Thresholds;
use pepmerge::predictor::Predictor;

/// Root configuration structure for pepmerge.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Per-predictor thresholds.
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    /// Input handling.
    #[serde(default)]
    pub inputs: InputConfig,
}

/// Optional threshold per predictor.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdConfig {
    pub syfpeithi: Option<f64>,
    pub mhcflurry: Option<f64>,
    pub mhcnuggets: Option<f64>,
    pub netmhcpan: Option<f64>,
    pub netmhciipan: Option<f64>,
}

impl ThresholdConfig {
    pub fn to_thresholds(&self) -> Thresholds {
        let mut thresholds = Thresholds::new();
        let configured = [
            (Predictor::Syfpeithi, self.syfpeithi),
            (Predictor::Mhcflurry, self.mhcflurry),
            (Predictor::Mhcnuggets, self.mhcnuggets),
            (Predictor::NetMhcPan, self.netmhcpan),
            (Predictor::NetMhcIIPan, self.netmhciipan),
        ];
        for (predictor, value) in configured {
            if let Some(value) = value {
                thresholds.set(predictor, value);
            }
        }
        thresholds
    }
}

/// Input handling settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Predictors whose output must be present.
    #[serde(default)]
    pub required: Vec<Predictor>,

    /// Metadata columns removed before merging.
    #[serde(default)]
    pub drop_metadata_columns: Vec<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
