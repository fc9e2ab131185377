//! # Allele Canonicalization
//!
//! Predictors spell the same MHC allele in different ways:
//!
//! | Source | Spelling |
//! |--------|----------|
//! | SYFPEITHI, MHCflurry | `HLA-A*02:01` |
//! | NetMHCpan, MHCnuggets | `HLA-A02:01` |
//! | NetMHCIIpan | `DRB1_0101`, `HLA-DQA10501-DQB10201` |
//! | Mouse alleles | `H-2-Kb`, `H2-Kb` |
//!
//! [`canonicalize`] removes the predictor-specific decoration, parses the
//! remainder into an [`MhcAllele`] and renders it in a single nomenclature:
//!
//! - Human: `HLA-A*02:01`, `HLA-DRB1*01:01`
//! - Class II pairs: `HLA-DQA1*05:01-DQB1*02:01` (never `/`, so the name is
//!   safe as a column header or path fragment)
//! - Mouse: `H2-Kb`
//!
//! Canonical strings parse back to themselves, so canonicalization is
//! idempotent.

mod error;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::predictor::Predictor;

pub use error::{AlleleParseError, CanonicalizationError};

/// Human genes, longest first so `DRB1` wins over `DRA` and `A`.
const HUMAN_GENES: &[&str] = &[
    "DRB1", "DRB3", "DRB4", "DRB5", "DQA1", "DQB1", "DPA1", "DPB1", "DRA", "A", "B", "C", "E",
    "F", "G",
];
const CLASS_II_ALPHA: &[&str] = &["DRA", "DQA1", "DPA1"];
const CLASS_II_BETA: &[&str] = &["DRB1", "DRB3", "DRB4", "DRB5", "DQB1", "DPB1"];

const MOUSE_GENES: &[&str] = &["IA", "IE", "K", "D", "L", "Q"];

/// Expression-status suffixes (null, low, secreted, ...)
const EXPRESSION_SUFFIXES: &[char] = &['N', 'L', 'S', 'C', 'A', 'Q'];

/// Organism an allele belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    /// Homo sapiens (HLA)
    Human,
    /// Mus musculus (H2)
    Mouse,
}

impl Species {
    fn prefix(self) -> &'static str {
        match self {
            Species::Human => "HLA",
            Species::Mouse => "H2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Designation {
    Fields {
        fields: Vec<String>,
        suffix: Option<char>,
    },
    Haplotype(String),
}

/// One MHC chain: a gene plus its allele designation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chain {
    gene: &'static str,
    designation: Designation,
}

impl Chain {
    /// Gene (locus) name, e.g. `A` or `DRB1`
    pub fn gene(&self) -> &str {
        self.gene
    }

    /// Numeric allele fields; empty for mouse haplotypes
    pub fn fields(&self) -> &[String] {
        match &self.designation {
            Designation::Fields { fields, .. } => fields,
            Designation::Haplotype(_) => &[],
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.designation {
            Designation::Fields { fields, suffix } => {
                write!(f, "{}*{}", self.gene, fields.join(":"))?;
                if let Some(suffix) = suffix {
                    write!(f, "{}", suffix)?;
                }
                Ok(())
            }
            Designation::Haplotype(haplotype) => write!(f, "{}{}", self.gene, haplotype),
        }
    }
}

/// A parsed MHC allele: a single chain, or an alpha/beta pair for class II.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MhcAllele {
    species: Species,
    chains: Vec<Chain>,
}

impl MhcAllele {
    /// Parse an allele name without predictor-specific decoration.
    pub fn parse(input: &str) -> Result<Self, AlleleParseError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(AlleleParseError::Empty);
        }

        let mouse_rest = ["H-2-", "H2-", "H-2"]
            .iter()
            .find_map(|prefix| strip_prefix_ignore_case(text, prefix));
        if let Some(rest) = mouse_rest {
            return Ok(Self {
                species: Species::Mouse,
                chains: vec![parse_mouse_chain(rest, text)?],
            });
        }

        let upper = text.to_ascii_uppercase();
        let rest = upper
            .strip_prefix("HLA-")
            .or_else(|| upper.strip_prefix("HLA"))
            .unwrap_or(&upper);

        let segments: Vec<&str> = rest.split(['-', '/']).filter(|s| !s.is_empty()).collect();
        let chains = match segments.as_slice() {
            [] => return Err(AlleleParseError::MissingFields(text.to_string())),
            [single] => vec![parse_human_chain(single, text)?],
            [alpha, beta] => {
                let alpha = parse_human_chain(alpha, text)?;
                let beta = parse_human_chain(beta, text)?;
                if !CLASS_II_ALPHA.contains(&alpha.gene) || !CLASS_II_BETA.contains(&beta.gene) {
                    return Err(AlleleParseError::InvalidPair(text.to_string()));
                }
                vec![alpha, beta]
            }
            _ => return Err(AlleleParseError::TooManyChains(text.to_string())),
        };

        Ok(Self {
            species: Species::Human,
            chains,
        })
    }

    /// Organism of this allele
    pub fn species(&self) -> Species {
        self.species
    }

    /// Chains in alpha, beta order
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Render in the shared nomenclature.
    pub fn canonical(&self) -> CanonicalAllele {
        CanonicalAllele(self.to_string())
    }
}

impl fmt::Display for MhcAllele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-", self.species.prefix())?;
        for (i, chain) in self.chains.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{}", chain)?;
        }
        Ok(())
    }
}

/// Canonical allele name, identical for the same allele across predictors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalAllele(String);

impl CanonicalAllele {
    /// The canonical name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalAllele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalAllele {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonicalize an allele string as reported by `predictor`.
pub fn canonicalize(
    raw: &str,
    predictor: Predictor,
) -> Result<CanonicalAllele, CanonicalizationError> {
    let cleaned = predictor.clean_allele(raw);
    MhcAllele::parse(&cleaned)
        .map(|allele| allele.canonical())
        .map_err(|source| CanonicalizationError {
            raw: raw.to_string(),
            predictor,
            source,
        })
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

/// `segment` is already uppercased.
fn parse_human_chain(segment: &str, whole: &str) -> Result<Chain, AlleleParseError> {
    let gene = HUMAN_GENES
        .iter()
        .copied()
        .find(|gene| segment.starts_with(gene))
        .ok_or_else(|| AlleleParseError::UnknownGene(whole.to_string()))?;

    let mut rest = &segment[gene.len()..];
    // Pre-2010 "Cw" spelling
    if gene == "C" {
        rest = rest.strip_prefix('W').unwrap_or(rest);
    }
    let rest = rest.strip_prefix(['*', '_']).unwrap_or(rest);
    if rest.is_empty() {
        return Err(AlleleParseError::MissingFields(whole.to_string()));
    }

    let (body, suffix) = match rest.chars().last() {
        Some(last) if rest.len() > 1 && EXPRESSION_SUFFIXES.contains(&last) => {
            (&rest[..rest.len() - 1], Some(last))
        }
        _ => (rest, None),
    };

    let fields = if body.contains(':') {
        split_colon_fields(body)
    } else {
        split_compact_fields(body)
    }
    .ok_or_else(|| AlleleParseError::InvalidFields(whole.to_string()))?;

    Ok(Chain {
        gene,
        designation: Designation::Fields { fields, suffix },
    })
}

fn split_colon_fields(body: &str) -> Option<Vec<String>> {
    let fields: Vec<String> = body.split(':').map(str::to_string).collect();
    let valid = fields.len() <= 4
        && fields
            .iter()
            .all(|f| (2..=3).contains(&f.len()) && f.bytes().all(|b| b.is_ascii_digit()));
    valid.then_some(fields)
}

/// Split colon-less digits, e.g. `0201` into `02:01` or `15101` into `15:101`.
fn split_compact_fields(body: &str) -> Option<Vec<String>> {
    if !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let widths: &[usize] = match body.len() {
        2 => &[2],
        4 => &[2, 2],
        5 => &[2, 3],
        6 => &[2, 2, 2],
        7 => &[2, 3, 2],
        8 => &[2, 2, 2, 2],
        _ => return None,
    };

    let mut fields = Vec::with_capacity(widths.len());
    let mut start = 0;
    for width in widths {
        fields.push(body[start..start + width].to_string());
        start += width;
    }
    Some(fields)
}

fn parse_mouse_chain(rest: &str, whole: &str) -> Result<Chain, AlleleParseError> {
    let rest = rest.trim_start_matches('-');
    let split = rest
        .find(|c: char| c.is_ascii_lowercase() || c == '*')
        .ok_or_else(|| AlleleParseError::MissingFields(whole.to_string()))?;
    let (gene_part, haplotype) = rest.split_at(split);
    let haplotype = haplotype.trim_start_matches('*');

    let gene = MOUSE_GENES
        .iter()
        .copied()
        .find(|gene| gene.eq_ignore_ascii_case(gene_part))
        .ok_or_else(|| AlleleParseError::UnknownGene(whole.to_string()))?;

    if haplotype.is_empty() || !haplotype.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(AlleleParseError::InvalidFields(whole.to_string()));
    }

    Ok(Chain {
        gene,
        designation: Designation::Haplotype(haplotype.to_string()),
    })
}
