//! Help-topic search.
//!
//! [`HelpIndex`] is an immutable inverted index built once from a set of
//! documents. It holds no global state; share it behind an `Arc`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

const TITLE_WEIGHT: u32 = 2;
const BODY_WEIGHT: u32 = 1;

/// One help topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpDocument {
    pub id: String,
    pub title: String,
    pub body: String,
}

impl HelpDocument {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Read a Markdown topic. The id is the file stem and the title is the
    /// first `# ` heading, falling back to the id.
    pub fn from_markdown(id: impl Into<String>, text: &str) -> Self {
        let id = id.into();
        let mut title = None;
        let mut body = Vec::new();
        for line in text.lines() {
            match line.strip_prefix("# ") {
                Some(heading) if title.is_none() => title = Some(heading.trim().to_string()),
                _ => body.push(line),
            }
        }
        Self {
            title: title.unwrap_or_else(|| id.clone()),
            id,
            body: body.join("\n").trim().to_string(),
        }
    }
}

/// A ranked search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpHit {
    pub id: String,
    pub title: String,
    pub score: u32,
}

/// Immutable inverted index over help topics.
#[derive(Debug, Clone, Default)]
pub struct HelpIndex {
    documents: Vec<HelpDocument>,
    /// token -> (document index, weighted term count)
    postings: HashMap<String, Vec<(usize, u32)>>,
}

/// Lower-cased alphanumeric tokens.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

impl HelpIndex {
    pub fn build(documents: impl IntoIterator<Item = HelpDocument>) -> Self {
        let documents: Vec<HelpDocument> = documents.into_iter().collect();
        let mut counts: HashMap<String, HashMap<usize, u32>> = HashMap::new();

        for (idx, doc) in documents.iter().enumerate() {
            let weighted = tokenize(&doc.title)
                .map(|t| (t, TITLE_WEIGHT))
                .chain(tokenize(&doc.body).map(|t| (t, BODY_WEIGHT)));
            for (token, weight) in weighted {
                *counts.entry(token).or_default().entry(idx).or_default() += weight;
            }
        }

        let postings = counts
            .into_iter()
            .map(|(token, docs)| {
                let mut list: Vec<(usize, u32)> = docs.into_iter().collect();
                list.sort_unstable();
                (token, list)
            })
            .collect();

        Self {
            documents,
            postings,
        }
    }

    /// Build from every `*.md` file in a directory.
    pub fn from_dir(dir: &Path) -> Result<Self, ResolveError> {
        let mut documents = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let text = fs::read_to_string(&path)?;
            documents.push(HelpDocument::from_markdown(stem, &text));
        }
        documents.sort_by(|a, b| a.id.cmp(&b.id));
        tracing::info!(topics = documents.len(), dir = %dir.display(), "loaded help topics");
        Ok(Self::build(documents))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&HelpDocument> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    /// Rank topics for `query`, highest score first, ties broken by id.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_resolve::help::{HelpDocument, HelpIndex};
    ///
    /// let index = HelpIndex::build(vec![
    ///     HelpDocument::new("faq", "Frequently asked questions", "Variant ids and regions"),
    ///     HelpDocument::new("mnv", "Multi-nucleotide variants", "Adjacent substitutions"),
    /// ]);
    /// let hits = index.search("variants", 10);
    /// assert_eq!(hits[0].id, "mnv");
    /// ```
    pub fn search(&self, query: &str, limit: usize) -> Vec<HelpHit> {
        let mut scores: HashMap<usize, u32> = HashMap::new();
        for token in tokenize(query) {
            if let Some(list) = self.postings.get(&token) {
                for &(idx, weight) in list {
                    *scores.entry(idx).or_default() += weight;
                }
            }
        }

        let mut hits: Vec<HelpHit> = scores
            .into_iter()
            .map(|(idx, score)| {
                let doc = &self.documents[idx];
                HelpHit {
                    id: doc.id.clone(),
                    title: doc.title.clone(),
                    score,
                }
            })
            .collect();
        hits.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        hits.truncate(limit);
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn index() -> HelpIndex {
        HelpIndex::build(vec![
            HelpDocument::new("allele-frequency", "Allele frequency", "How frequency is computed."),
            HelpDocument::new("coverage", "Coverage", "Read depth and allele balance."),
            HelpDocument::new("browse", "Browsing", "Search for a gene, region, or variant."),
        ])
    }

    #[test]
    fn test_title_outweighs_body() {
        let hits = index().search("allele", 10);
        assert_eq!(hits[0].id, "allele-frequency");
        assert_eq!(hits[0].score, 2);
        assert_eq!(hits[1].id, "coverage");
        assert_eq!(hits[1].score, 1);
    }

    #[test]
    fn test_scores_accumulate() {
        let hits = index().search("allele frequency", 10);
        // title "allele" + "frequency" (2 + 2) plus body "frequency" (1)
        assert_eq!(hits[0].score, 5);
    }

    #[test]
    fn test_ties_broken_by_id() {
        let index = HelpIndex::build(vec![
            HelpDocument::new("b", "Gene", ""),
            HelpDocument::new("a", "Gene", ""),
        ]);
        let ids: Vec<_> = index.search("gene", 10).into_iter().map(|h| h.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_case_and_punctuation_ignored() {
        let hits = index().search("REGION?!", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "browse");
    }

    #[test]
    fn test_limit_and_no_hits() {
        assert_eq!(index().search("allele", 1).len(), 1);
        assert!(index().search("nothing-here", 10).is_empty());
        assert!(index().search("", 10).is_empty());
    }

    #[test]
    fn test_from_markdown() {
        let doc = HelpDocument::from_markdown("mnv", "# Multi-nucleotide variants\n\nAdjacent SNVs.\n");
        assert_eq!(doc.title, "Multi-nucleotide variants");
        assert_eq!(doc.body, "Adjacent SNVs.");

        let doc = HelpDocument::from_markdown("plain", "No heading here.");
        assert_eq!(doc.title, "plain");
    }

    #[test]
    fn test_from_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("coverage.md"), "# Coverage\nRead depth.").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let index = HelpIndex::from_dir(dir.path()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("coverage").unwrap().title, "Coverage");
    }
}
