//! Genomic identifier grammar, normalization, and types.
//!
//! # Example
//!
//! ```
//! use ferro_resolve::identifiers::{grammar, normalize};
//!
//! let parts = grammar::match_variant("chr1:55516888:g:ga").unwrap();
//! let variant = normalize::normalize_variant(parts);
//! assert_eq!(variant.as_str(), "1-55516888-G-GA");
//! ```

pub mod grammar;
pub mod normalize;
mod types;

pub use normalize::NormalizedRegion;
pub use types::{
    CooccurrencePair, ExternalId, Identifier, IdentifierKind, RegionId, StructuralVariantId,
    VariantId,
};
