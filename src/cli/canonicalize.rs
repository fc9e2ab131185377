use anyhow::Result;

#[cfg(feature = "colorized_output")]
use console::style;

use pepmerge::allele::canonicalize;
use pepmerge::predictor::Predictor;

/// Print the canonical form of each allele, one per line
pub fn run(predictor: Predictor, alleles: &[String]) -> Result<()> {
    let mut failures = 0;

    for raw in alleles {
        match canonicalize(raw, predictor) {
            Ok(allele) => {
                #[cfg(feature = "colorized_output")]
                println!("{}\t{}", raw, style(&allele).green());

                #[cfg(not(feature = "colorized_output"))]
                println!("{}\t{}", raw, allele);
            }
            Err(e) => {
                failures += 1;
                #[cfg(feature = "colorized_output")]
                eprintln!("{} {}", style("error:").red().bold(), e);

                #[cfg(not(feature = "colorized_output"))]
                eprintln!("error: {}", e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!(
            "{} of {} alleles could not be canonicalized",
            failures,
            alleles.len()
        );
    }
    Ok(())
}
