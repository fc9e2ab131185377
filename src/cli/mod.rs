use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use pepmerge::pipeline::PredictionInput;
use pepmerge::predictor::Predictor;

mod canonicalize;
mod config;
mod merge;

/// pepmerge - Peptide Binding Prediction Harmonizer
#[derive(Parser)]
#[command(name = "pepmerge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Predictor names accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PredictorArg {
    /// SYFPEITHI relative matrix scores
    Syfpeithi,
    /// MHCflurry presentation percentiles
    Mhcflurry,
    /// MHCnuggets proteome ranks
    Mhcnuggets,
    /// NetMHCpan EL ranks
    Netmhcpan,
    /// NetMHCIIpan ranks
    Netmhciipan,
}

impl From<PredictorArg> for Predictor {
    fn from(arg: PredictorArg) -> Self {
        match arg {
            PredictorArg::Syfpeithi => Predictor::Syfpeithi,
            PredictorArg::Mhcflurry => Predictor::Mhcflurry,
            PredictorArg::Mhcnuggets => Predictor::Mhcnuggets,
            PredictorArg::Netmhcpan => Predictor::NetMhcPan,
            PredictorArg::Netmhciipan => Predictor::NetMhcIIPan,
        }
    }
}

/// Arguments of the merge command
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Prediction files, as PATH or PREDICTOR=PATH
    #[arg(short, long = "input", value_name = "FILE", required = true, num_args = 1..)]
    inputs: Vec<PredictionInput>,

    /// Metadata TSV with a `sequence` column
    #[arg(short, long, value_name = "FILE")]
    metadata: PathBuf,

    /// Output TSV (defaults to <SAMPLE_ID>_predictions.tsv)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Sample identifier used for the default output name
    #[arg(short, long)]
    sample_id: Option<String>,

    /// Keep peptides with a SYFPEITHI relative score >= this value
    #[arg(long)]
    syfpeithi_threshold: Option<f64>,

    /// Keep peptides with an MHCflurry percentile <= this value
    #[arg(long)]
    mhcflurry_threshold: Option<f64>,

    /// Keep peptides with an MHCnuggets rank <= this value
    #[arg(long)]
    mhcnuggets_threshold: Option<f64>,

    /// Keep peptides with a NetMHCpan rank <= this value
    #[arg(long)]
    netmhcpan_threshold: Option<f64>,

    /// Keep peptides with a NetMHCIIpan rank <= this value
    #[arg(long)]
    netmhciipan_threshold: Option<f64>,

    /// Fail if this predictor's output is missing (repeatable)
    #[arg(long = "require", value_enum, value_name = "PREDICTOR")]
    required: Vec<PredictorArg>,

    /// Drop this metadata column from the output (repeatable)
    #[arg(long = "drop-column", value_name = "COLUMN")]
    drop_columns: Vec<String>,

    /// Load thresholds and input settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a JSON run summary to this file
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,
}

impl MergeArgs {
    /// Thresholds given on the command line
    fn threshold_overrides(&self) -> Vec<(Predictor, f64)> {
        [
            (Predictor::Syfpeithi, self.syfpeithi_threshold),
            (Predictor::Mhcflurry, self.mhcflurry_threshold),
            (Predictor::Mhcnuggets, self.mhcnuggets_threshold),
            (Predictor::NetMhcPan, self.netmhcpan_threshold),
            (Predictor::NetMhcIIPan, self.netmhciipan_threshold),
        ]
        .into_iter()
        .filter_map(|(predictor, value)| value.map(|v| (predictor, v)))
        .collect()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Merge prediction outputs with peptide metadata
    Merge(MergeArgs),

    /// Print canonical names for allele strings
    Canonicalize {
        /// Predictor whose spelling the alleles use
        #[arg(short, long, value_enum)]
        predictor: PredictorArg,

        /// Allele strings to canonicalize
        #[arg(value_name = "ALLELE", required = true)]
        alleles: Vec<String>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Merge(args) => merge::run(args),
        Commands::Canonicalize { predictor, alleles } => {
            canonicalize::run(Predictor::from(predictor), &alleles)
        }
    }
}
