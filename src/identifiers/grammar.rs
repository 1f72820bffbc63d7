//! Identifier grammar.
//!
//! One predicate/extractor pair per identifier kind. Extractors return the raw
//! matched parts borrowed from the input; canonicalization happens in
//! [`super::normalize`]. Every function expects input that has already been
//! trimmed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dataset::SvNaming;

/// `chrom-pos-ref-alt`; `:` may replace any `-` and `>` may join the alleles.
/// Numbered chromosomes are one or two digits without a leading zero.
static VARIANT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:chr)?([1-9]\d?|x|y|mt|m)[-:](\d+)[-:]([acgt]+)[-:>]([acgt]+)$").unwrap()
});

/// `chrom-start-stop` or `chrom-pos`, with `:` accepted in place of `-`.
static REGION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:chr)?([1-9]\d?|x|y|mt|m)[-:](\d+)(?:[-:](\d+))?$").unwrap()
});

static RSID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^rs(\d+)$").unwrap());

static CAID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^ca(\d+)$").unwrap());

static CLINVAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

static ENSEMBL_GENE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^ensg\d{11}$").unwrap());

static ENSEMBL_TRANSCRIPT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^enst\d{11}$").unwrap());

static GENE_SYMBOL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").unwrap());

/// Two whitespace-free tokens joined by a case-insensitive `and`.
static COOCCURRENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\S+)\s+and\s+(\S+)$").unwrap());

static SV_V2_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(BND|CPX|CTX|DEL|DUP|INS|INV|MCNV|OTH)_(\d+|X|Y)_([1-9][0-9]*)$").unwrap()
});

static SV_V4_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(BND|CPX|CTX|DEL|DUP|INS|INV|CNV)_CHR(\d+|X|Y)_([0-9a-f]+)$").unwrap()
});

/// Raw parts of a variant match. The chromosome excludes any `chr` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantParts<'a> {
    pub chrom: &'a str,
    pub pos: u64,
    pub ref_allele: &'a str,
    pub alt_allele: &'a str,
}

/// Raw parts of a region match. `stop` is `None` for a bare position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionParts<'a> {
    pub chrom: &'a str,
    pub start: u64,
    pub stop: Option<u64>,
}

/// Parse a strictly positive coordinate.
fn parse_position(s: &str) -> Option<u64> {
    s.parse::<u64>().ok().filter(|&p| p > 0)
}

pub fn match_variant(input: &str) -> Option<VariantParts<'_>> {
    let caps = VARIANT_PATTERN.captures(input)?;
    Some(VariantParts {
        chrom: caps.get(1)?.as_str(),
        pos: parse_position(caps.get(2)?.as_str())?,
        ref_allele: caps.get(3)?.as_str(),
        alt_allele: caps.get(4)?.as_str(),
    })
}

pub fn is_variant(input: &str) -> bool {
    match_variant(input).is_some()
}

pub fn match_region(input: &str) -> Option<RegionParts<'_>> {
    let caps = REGION_PATTERN.captures(input)?;
    let stop = match caps.get(3) {
        Some(m) => Some(parse_position(m.as_str())?),
        None => None,
    };
    Some(RegionParts {
        chrom: caps.get(1)?.as_str(),
        start: parse_position(caps.get(2)?.as_str())?,
        stop,
    })
}

pub fn is_region(input: &str) -> bool {
    match_region(input).is_some()
}

pub fn match_rsid(input: &str) -> Option<&str> {
    RSID_PATTERN.is_match(input).then_some(input)
}

pub fn is_rsid(input: &str) -> bool {
    RSID_PATTERN.is_match(input)
}

pub fn match_caid(input: &str) -> Option<&str> {
    CAID_PATTERN.is_match(input).then_some(input)
}

pub fn is_caid(input: &str) -> bool {
    CAID_PATTERN.is_match(input)
}

pub fn match_clinvar_id(input: &str) -> Option<&str> {
    CLINVAR_PATTERN.is_match(input).then_some(input)
}

pub fn is_clinvar_id(input: &str) -> bool {
    CLINVAR_PATTERN.is_match(input)
}

pub fn match_ensembl_gene(input: &str) -> Option<&str> {
    ENSEMBL_GENE_PATTERN.is_match(input).then_some(input)
}

pub fn is_ensembl_gene(input: &str) -> bool {
    ENSEMBL_GENE_PATTERN.is_match(input)
}

pub fn match_ensembl_transcript(input: &str) -> Option<&str> {
    ENSEMBL_TRANSCRIPT_PATTERN.is_match(input).then_some(input)
}

pub fn is_ensembl_transcript(input: &str) -> bool {
    ENSEMBL_TRANSCRIPT_PATTERN.is_match(input)
}

pub fn match_gene_symbol(input: &str) -> Option<&str> {
    GENE_SYMBOL_PATTERN.is_match(input).then_some(input)
}

pub fn is_gene_symbol(input: &str) -> bool {
    GENE_SYMBOL_PATTERN.is_match(input)
}

pub fn match_structural(input: &str, naming: SvNaming) -> Option<&str> {
    let pattern = match naming {
        SvNaming::V2 => &SV_V2_PATTERN,
        SvNaming::V4 => &SV_V4_PATTERN,
    };
    pattern.is_match(input).then_some(input)
}

pub fn is_structural(input: &str, naming: SvNaming) -> bool {
    match_structural(input, naming).is_some()
}

/// Both halves of a co-occurrence query. Each must itself be a variant.
pub fn match_cooccurrence(input: &str) -> Option<(VariantParts<'_>, VariantParts<'_>)> {
    let caps = COOCCURRENCE_PATTERN.captures(input)?;
    let first = match_variant(caps.get(1)?.as_str())?;
    let second = match_variant(caps.get(2)?.as_str())?;
    Some((first, second))
}

pub fn is_cooccurrence(input: &str) -> bool {
    match_cooccurrence(input).is_some()
}
