//! # pepmerge
//!
//! Command-line tool merging peptide-MHC binding predictions into one table.
//!
//! ## Usage
//!
//! ```bash
//! # Merge NetMHCpan and SYFPEITHI output, keeping strong NetMHCpan binders
//! pepmerge merge \
//!     --input sample1_netmhcpan.tsv sample1_syfpeithi.tsv \
//!     --metadata sample1_peptides.tsv \
//!     --sample-id sample1 \
//!     --netmhcpan-threshold 2
//!
//! # Show how an allele spelling is canonicalized
//! pepmerge canonicalize --predictor netmhciipan DRB1_0101
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
