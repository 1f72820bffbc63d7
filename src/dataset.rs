//! Dataset context supplied by callers.
//!
//! Dataset identifiers are opaque strings. The resolver only reads two things
//! from them: whether the dataset holds structural variants (and which naming
//! convention its variant ids follow), and which reference genome build the
//! remote search should be scoped to. Membership in any catalogue is never
//! checked here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix shared by all structural-variant dataset ids.
const STRUCTURAL_PREFIX: &str = "gnomad_sv_";

/// Reference genome build a dataset is aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReferenceGenome {
    /// GRCh37 / hg19
    GRCh37,
    /// GRCh38 / hg38
    #[default]
    GRCh38,
}

impl ReferenceGenome {
    /// Name as used by the remote search API (`GRCh37` / `GRCh38`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceGenome::GRCh37 => "GRCh37",
            ReferenceGenome::GRCh38 => "GRCh38",
        }
    }

    /// Parse a build name, accepting the UCSC aliases as well.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "grch37" | "hg19" | "37" => Some(ReferenceGenome::GRCh37),
            "grch38" | "hg38" | "38" => Some(ReferenceGenome::GRCh38),
            _ => None,
        }
    }
}

impl fmt::Display for ReferenceGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Naming convention for structural-variant ids, which differs between
/// structural releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SvNaming {
    /// `DEL_1_12345`, `MCNV_4_185`: type, bare chromosome, positive counter.
    V2,
    /// `DEL_CHR1_3a4f`: type, `CHR`-prefixed chromosome, hex suffix.
    V4,
}

/// The active dataset for a resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetContext {
    /// Opaque dataset id, e.g. `gnomad_r4` or `gnomad_sv_r2_1`.
    pub id: String,
    /// Build used to scope remote searches.
    pub reference_genome: ReferenceGenome,
    /// Structural-variant naming convention; `None` for short-variant datasets.
    pub structural: Option<SvNaming>,
}

impl DatasetContext {
    /// Derive a context from a dataset id.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_resolve::dataset::{DatasetContext, ReferenceGenome, SvNaming};
    ///
    /// let ctx = DatasetContext::new("gnomad_sv_r2_1");
    /// assert_eq!(ctx.reference_genome, ReferenceGenome::GRCh37);
    /// assert_eq!(ctx.structural, Some(SvNaming::V2));
    ///
    /// let ctx = DatasetContext::new("gnomad_r4");
    /// assert!(!ctx.is_structural());
    /// ```
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let reference_genome = reference_genome_for(&id);
        let structural = sv_naming_for(&id);
        Self {
            id,
            reference_genome,
            structural,
        }
    }

    /// Override the derived reference genome, for callers with their own catalogue.
    pub fn with_reference_genome(mut self, genome: ReferenceGenome) -> Self {
        self.reference_genome = genome;
        self
    }

    /// Whether this dataset holds structural variants.
    pub fn is_structural(&self) -> bool {
        self.structural.is_some()
    }
}

impl fmt::Display for DatasetContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

fn reference_genome_for(id: &str) -> ReferenceGenome {
    let release = id.strip_prefix(STRUCTURAL_PREFIX).unwrap_or(id);
    if id == "exac" || release.starts_with("r2") || release.starts_with("gnomad_r2") {
        ReferenceGenome::GRCh37
    } else {
        ReferenceGenome::GRCh38
    }
}

fn sv_naming_for(id: &str) -> Option<SvNaming> {
    let release = id.strip_prefix(STRUCTURAL_PREFIX)?;
    if release.starts_with("r2") {
        Some(SvNaming::V2)
    } else {
        Some(SvNaming::V4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_genome_by_dataset() {
        assert_eq!(
            DatasetContext::new("exac").reference_genome,
            ReferenceGenome::GRCh37
        );
        assert_eq!(
            DatasetContext::new("gnomad_r2_1_non_neuro").reference_genome,
            ReferenceGenome::GRCh37
        );
        assert_eq!(
            DatasetContext::new("gnomad_r3").reference_genome,
            ReferenceGenome::GRCh38
        );
        assert_eq!(
            DatasetContext::new("gnomad_sv_r4").reference_genome,
            ReferenceGenome::GRCh38
        );
        assert_eq!(
            DatasetContext::new("gnomad_sv_r2_1_controls").reference_genome,
            ReferenceGenome::GRCh37
        );
    }

    #[test]
    fn test_structural_naming() {
        assert_eq!(DatasetContext::new("gnomad_r4").structural, None);
        assert_eq!(
            DatasetContext::new("gnomad_sv_r2_1").structural,
            Some(SvNaming::V2)
        );
        assert_eq!(
            DatasetContext::new("gnomad_sv_r4").structural,
            Some(SvNaming::V4)
        );
    }

    #[test]
    fn test_unknown_dataset_is_accepted() {
        let ctx = DatasetContext::new("my_private_release");
        assert_eq!(ctx.id, "my_private_release");
        assert_eq!(ctx.reference_genome, ReferenceGenome::GRCh38);
        assert!(!ctx.is_structural());
    }

    #[test]
    fn test_reference_genome_override() {
        let ctx = DatasetContext::new("custom").with_reference_genome(ReferenceGenome::GRCh37);
        assert_eq!(ctx.reference_genome, ReferenceGenome::GRCh37);
    }

    #[test]
    fn test_reference_genome_parse() {
        assert_eq!(ReferenceGenome::parse("hg19"), Some(ReferenceGenome::GRCh37));
        assert_eq!(ReferenceGenome::parse("GRCh38"), Some(ReferenceGenome::GRCh38));
        assert_eq!(ReferenceGenome::parse("mm10"), None);
    }
}
