//! Navigation candidates and their targets.
//!
//! A target is a path plus ordered query parameters. Rendering and
//! [`NavigationTarget::parse`] round-trip exactly, so the presentation layer can
//! treat the rendered string as opaque.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dataset::DatasetContext;
use crate::error::ResolveError;
use crate::identifiers::{CooccurrencePair, RegionId};

/// A resolved, presentable destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationCandidate {
    pub label: String,
    pub target: NavigationTarget,
}

impl NavigationCandidate {
    pub fn new(label: impl Into<String>, target: NavigationTarget) -> Self {
        Self {
            label: label.into(),
            target,
        }
    }
}

impl fmt::Display for NavigationCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.label, self.target)
    }
}

/// Path and query parameters for one destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NavigationTarget {
    path: String,
    params: Vec<(String, String)>,
}

impl NavigationTarget {
    fn with_dataset(path: String, dataset: &DatasetContext) -> Self {
        Self {
            path,
            params: vec![("dataset".to_string(), dataset.id.clone())],
        }
    }

    /// Variant page. Also used for rsIDs, CAIDs, ClinVar ids and
    /// structural-variant ids, which the page resolves further.
    pub fn variant(id: &str, dataset: &DatasetContext) -> Self {
        Self::with_dataset(format!("/variant/{}", id), dataset)
    }

    pub fn region(region: &RegionId, dataset: &DatasetContext) -> Self {
        Self::with_dataset(format!("/region/{}", region), dataset)
    }

    pub fn gene(ensembl_id: &str, dataset: &DatasetContext) -> Self {
        Self::with_dataset(format!("/gene/{}", ensembl_id), dataset)
    }

    pub fn transcript(ensembl_id: &str, dataset: &DatasetContext) -> Self {
        Self::with_dataset(format!("/transcript/{}", ensembl_id), dataset)
    }

    /// Co-occurrence view; both variants are passed as repeated `variant` params.
    pub fn cooccurrence(pair: &CooccurrencePair, dataset: &DatasetContext) -> Self {
        let mut target = Self::with_dataset("/variant-cooccurrence".to_string(), dataset);
        target
            .params
            .push(("variant".to_string(), pair.first.to_string()));
        target
            .params
            .push(("variant".to_string(), pair.second.to_string()));
        target
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The last path segment, i.e. the identifier the target was built from.
    pub fn segment(&self) -> Option<&str> {
        self.path.rsplit('/').next().filter(|s| !s.is_empty())
    }

    /// First value of a query parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values of a repeated query parameter, in order.
    pub fn params_named<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.params
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn dataset(&self) -> Option<&str> {
        self.param("dataset")
    }

    /// Parse a rendered target.
    pub fn parse(s: &str) -> Result<Self, ResolveError> {
        let (path, query) = match s.split_once('?') {
            Some((path, query)) => (path, query),
            None => (s, ""),
        };
        if !path.starts_with('/') {
            return Err(ResolveError::InvalidIdentifier {
                kind: "navigation target".to_string(),
                input: s.to_string(),
            });
        }
        let params = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Ok(Self {
            path: path.to_string(),
            params,
        })
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            return write!(f, "{}", self.path);
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        write!(f, "{}?{}", self.path, query)
    }
}

impl FromStr for NavigationTarget {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NavigationTarget> for String {
    fn from(target: NavigationTarget) -> Self {
        target.to_string()
    }
}

impl TryFrom<String> for NavigationTarget {
    type Error = ResolveError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}
