//! Strongly-typed genomic identifiers.
//!
//! All of these are value objects produced by the normalizer. Fields are
//! private so the canonical invariants (uppercase chromosome, `M` for the
//! mitochondrial contig, `start <= stop`) cannot be broken after construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{grammar, normalize};
use crate::error::ResolveError;

/// The textual shapes a query can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    StructuralVariant,
    Variant,
    RsId,
    Caid,
    ClinVarId,
    Region,
    EnsemblGene,
    EnsemblTranscript,
    GeneSymbol,
    Cooccurrence,
}

impl IdentifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::StructuralVariant => "structural variant",
            IdentifierKind::Variant => "variant",
            IdentifierKind::RsId => "rsID",
            IdentifierKind::Caid => "CAID",
            IdentifierKind::ClinVarId => "ClinVar variation",
            IdentifierKind::Region => "region",
            IdentifierKind::EnsemblGene => "Ensembl gene",
            IdentifierKind::EnsemblTranscript => "Ensembl transcript",
            IdentifierKind::GeneSymbol => "gene symbol",
            IdentifierKind::Cooccurrence => "co-occurrence",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A short variant, `chrom-pos-ref-alt`. Serialized as its canonical string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct VariantId {
    canonical: String,
    chrom: String,
    pos: u64,
    ref_allele: String,
    alt_allele: String,
}

impl VariantId {
    /// Build from already-canonical parts. Callers outside the normalizer
    /// should go through [`str::parse`].
    pub(crate) fn from_canonical_parts(
        chrom: String,
        pos: u64,
        ref_allele: String,
        alt_allele: String,
    ) -> Self {
        let canonical = format!("{}-{}-{}-{}", chrom, pos, ref_allele, alt_allele);
        Self {
            canonical,
            chrom,
            pos,
            ref_allele,
            alt_allele,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn pos(&self) -> u64 {
        self.pos
    }

    pub fn ref_allele(&self) -> &str {
        &self.ref_allele
    }

    pub fn alt_allele(&self) -> &str {
        &self.alt_allele
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical)
    }
}

impl FromStr for VariantId {
    type Err = ResolveError;

    /// Parse and normalize a variant id.
    ///
    /// ```
    /// use ferro_resolve::identifiers::VariantId;
    ///
    /// let v: VariantId = "chrMT:8602-t-c".parse().unwrap();
    /// assert_eq!(v.as_str(), "M-8602-T-C");
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        grammar::match_variant(s.trim())
            .map(normalize::normalize_variant)
            .ok_or_else(|| ResolveError::InvalidIdentifier {
                kind: IdentifierKind::Variant.to_string(),
                input: s.to_string(),
            })
    }
}

/// A closed genomic interval on one chromosome. Serialized as `chrom-start-stop`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RegionId {
    chrom: String,
    start: u64,
    stop: u64,
}

impl RegionId {
    /// Build from a canonical chromosome, reordering bounds so `start <= stop`.
    pub(crate) fn ordered(chrom: String, a: u64, b: u64) -> Self {
        Self {
            chrom,
            start: a.min(b),
            stop: a.max(b),
        }
    }

    /// A window of `radius` bases either side of `pos`, clamped so it never
    /// starts before base 1.
    pub fn window(chrom: &str, pos: u64, radius: u64) -> Self {
        Self {
            chrom: chrom.to_string(),
            start: pos.saturating_sub(radius).max(1),
            stop: pos.saturating_add(radius),
        }
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn stop(&self) -> u64 {
        self.stop
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.chrom, self.start, self.stop)
    }
}

impl FromStr for RegionId {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        grammar::match_region(s.trim())
            .map(|parts| normalize::normalize_region(parts).region)
            .ok_or_else(|| ResolveError::InvalidIdentifier {
                kind: IdentifierKind::Region.to_string(),
                input: s.to_string(),
            })
    }
}

impl From<VariantId> for String {
    fn from(variant: VariantId) -> Self {
        variant.canonical
    }
}

impl TryFrom<String> for VariantId {
    type Error = ResolveError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RegionId> for String {
    fn from(region: RegionId) -> Self {
        region.to_string()
    }
}

impl TryFrom<String> for RegionId {
    type Error = ResolveError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Opaque structural-variant id, e.g. `MCNV_4_185`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructuralVariantId(String);

impl StructuralVariantId {
    pub(crate) fn new(canonical: String) -> Self {
        Self(canonical)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StructuralVariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifiers issued by external databases. Each is validated by shape only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ExternalId {
    /// dbSNP reference SNP, e.g. `rs6025`.
    RsId(String),
    /// ClinGen Allele Registry id, e.g. `CA123456`.
    Caid(String),
    /// ClinVar variation id, digits only.
    ClinVar(String),
    /// e.g. `ENSG00000169174`.
    EnsemblGene(String),
    /// e.g. `ENST00000302118`.
    EnsemblTranscript(String),
}

impl ExternalId {
    pub fn as_str(&self) -> &str {
        match self {
            ExternalId::RsId(s)
            | ExternalId::Caid(s)
            | ExternalId::ClinVar(s)
            | ExternalId::EnsemblGene(s)
            | ExternalId::EnsemblTranscript(s) => s,
        }
    }

    pub fn kind(&self) -> IdentifierKind {
        match self {
            ExternalId::RsId(_) => IdentifierKind::RsId,
            ExternalId::Caid(_) => IdentifierKind::Caid,
            ExternalId::ClinVar(_) => IdentifierKind::ClinVarId,
            ExternalId::EnsemblGene(_) => IdentifierKind::EnsemblGene,
            ExternalId::EnsemblTranscript(_) => IdentifierKind::EnsemblTranscript,
        }
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Two variants whose joint carrier statistics are requested together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CooccurrencePair {
    pub first: VariantId,
    pub second: VariantId,
}

/// A classified and normalized query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Identifier {
    StructuralVariant(StructuralVariantId),
    Variant(VariantId),
    /// A region; `bare_position` is set when the query named a single base.
    Region {
        region: RegionId,
        bare_position: bool,
    },
    External(ExternalId),
    /// Shaped like a gene symbol; only resolvable remotely.
    GeneSymbol(String),
    Cooccurrence(CooccurrencePair),
}

impl Identifier {
    pub fn kind(&self) -> IdentifierKind {
        match self {
            Identifier::StructuralVariant(_) => IdentifierKind::StructuralVariant,
            Identifier::Variant(_) => IdentifierKind::Variant,
            Identifier::Region { .. } => IdentifierKind::Region,
            Identifier::External(ext) => ext.kind(),
            Identifier::GeneSymbol(_) => IdentifierKind::GeneSymbol,
            Identifier::Cooccurrence(_) => IdentifierKind::Cooccurrence,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::StructuralVariant(id) => write!(f, "{}", id),
            Identifier::Variant(id) => write!(f, "{}", id),
            Identifier::Region { region, .. } => write!(f, "{}", region),
            Identifier::External(id) => write!(f, "{}", id),
            Identifier::GeneSymbol(symbol) => write!(f, "{}", symbol),
            Identifier::Cooccurrence(pair) => write!(f, "{} and {}", pair.first, pair.second),
        }
    }
}
