//! Output formatting for CLI results

use serde_json::json;
use std::io::{self, Write};
use std::str::FromStr;

use crate::error::ResolveError;
use crate::identifiers::Identifier;
use crate::resolve::{NavigationCandidate, Route};

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab-separated text (default)
    #[default]
    Text,
    /// One JSON object per query
    Json,
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    /// Parse an output format; anything but `json` is text.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_resolve::cli::OutputFormat;
    ///
    /// assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    /// assert_eq!("tsv".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        })
    }
}

fn write_json<W: Write>(writer: &mut W, value: &serde_json::Value) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)
}

/// Write search-mode candidates.
///
/// Text output is one `query<TAB>label<TAB>target` line per candidate, or a
/// single `query<TAB>no match` line.
///
/// # Examples
///
/// ```
/// use ferro_resolve::cli::{output_candidates, OutputFormat};
/// use ferro_resolve::dataset::DatasetContext;
/// use ferro_resolve::resolve::{NavigationCandidate, NavigationTarget};
/// use std::io::Cursor;
///
/// let ctx = DatasetContext::new("gnomad_r4");
/// let candidate = NavigationCandidate::new("rs6025", NavigationTarget::variant("rs6025", &ctx));
/// let mut buffer = Cursor::new(Vec::new());
/// output_candidates(&mut buffer, "rs6025", &[candidate], OutputFormat::Text).unwrap();
/// let text = String::from_utf8(buffer.into_inner()).unwrap();
/// assert_eq!(text, "rs6025\trs6025\t/variant/rs6025?dataset=gnomad_r4\n");
/// ```
pub fn output_candidates<W: Write>(
    writer: &mut W,
    query: &str,
    candidates: &[NavigationCandidate],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(
            writer,
            &json!({ "query": query, "status": "ok", "candidates": candidates }),
        ),
        OutputFormat::Text => {
            if candidates.is_empty() {
                return writeln!(writer, "{}\tno match", query);
            }
            for candidate in candidates {
                writeln!(writer, "{}\t{}", query, candidate)?;
            }
            Ok(())
        }
    }
}

/// Write a direct-navigation route.
pub fn output_route<W: Write>(
    writer: &mut W,
    segment: &str,
    route: &Route,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(
            writer,
            &json!({
                "segment": segment,
                "status": "ok",
                "code": route.code().map(|code| code.as_str()),
                "route": route,
            }),
        ),
        OutputFormat::Text => match route {
            Route::Variant {
                decision, target, ..
            }
            | Route::StructuralVariant {
                decision, target, ..
            } => writeln!(writer, "{}\t{}\t{}", segment, decision, target),
            Route::Ambiguous { candidates, .. } => {
                writeln!(writer, "{}\tambiguous ({} matches)", segment, candidates.len())?;
                for candidate in candidates {
                    writeln!(writer, "  {}", candidate)?;
                }
                Ok(())
            }
            Route::NotFound { .. } => writeln!(writer, "{}\tnot found", segment),
        },
    }
}

/// Write the classification of a query.
pub fn output_classification<W: Write>(
    writer: &mut W,
    query: &str,
    identifier: Option<&Identifier>,
    format: OutputFormat,
) -> io::Result<()> {
    match (format, identifier) {
        (OutputFormat::Json, Some(id)) => write_json(
            writer,
            &json!({ "query": query, "kind": id.kind(), "normalized": id.to_string() }),
        ),
        (OutputFormat::Json, None) => write_json(writer, &json!({ "query": query, "kind": null })),
        (OutputFormat::Text, Some(id)) => writeln!(writer, "{}\t{}\t{}", query, id.kind(), id),
        (OutputFormat::Text, None) => writeln!(writer, "{}\tunrecognized", query),
    }
}

/// Write an error for one query.
pub fn output_error<W: Write>(
    writer: &mut W,
    input: &str,
    error: &ResolveError,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(
            writer,
            &json!({
                "input": input,
                "status": "error",
                "code": error.code().as_str(),
                "error": error.to_string(),
            }),
        ),
        OutputFormat::Text => writeln!(writer, "{}\tERROR\t{}", input, error.detailed_message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetContext;
    use crate::resolve::{rules::classify, NavigationTarget, VariantTypeDecision};
    use std::io::Cursor;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Cursor<Vec<u8>>) -> io::Result<()>,
    {
        let mut buffer = Cursor::new(Vec::new());
        f(&mut buffer).unwrap();
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    #[test]
    fn test_candidates_no_match() {
        let text = render(|w| output_candidates(w, "???", &[], OutputFormat::Text));
        assert_eq!(text, "???\tno match\n");
    }

    #[test]
    fn test_candidates_json() {
        let ctx = DatasetContext::new("gnomad_r4");
        let candidate =
            NavigationCandidate::new("PCSK9", NavigationTarget::gene("ENSG00000169174", &ctx));
        let text = render(|w| output_candidates(w, "pcsk9", &[candidate], OutputFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["candidates"][0]["label"], "PCSK9");
        assert_eq!(
            value["candidates"][0]["target"],
            "/gene/ENSG00000169174?dataset=gnomad_r4"
        );
    }

    #[test]
    fn test_route_text() {
        let ctx = DatasetContext::new("gnomad_r4");
        let variant: crate::identifiers::VariantId = "M-8602-T-C".parse().unwrap();
        let route = Route::Variant {
            target: NavigationTarget::variant(variant.as_str(), &ctx),
            variant,
            decision: VariantTypeDecision::Mitochondrial,
        };
        let text = render(|w| output_route(w, "M-8602-T-C", &route, OutputFormat::Text));
        assert_eq!(
            text,
            "M-8602-T-C\tmitochondrial\t/variant/M-8602-T-C?dataset=gnomad_r4\n"
        );
    }

    #[test]
    fn test_route_ambiguous_json_carries_code() {
        let ctx = DatasetContext::new("gnomad_r4");
        let route = Route::Ambiguous {
            query: "rs1800562".to_string(),
            candidates: vec![
                NavigationCandidate::new("6-26093141-G-A", NavigationTarget::variant("6-26093141-G-A", &ctx)),
                NavigationCandidate::new("6-26093141-G-C", NavigationTarget::variant("6-26093141-G-C", &ctx)),
            ],
        };
        let text = render(|w| output_route(w, "rs1800562", &route, OutputFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["code"], "E3002");
        assert_eq!(value["route"]["route"], "ambiguous");
        assert_eq!(value["route"]["candidates"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_route_not_found() {
        let route = Route::NotFound {
            query: "rs1".to_string(),
        };
        let text = render(|w| output_route(w, "rs1", &route, OutputFormat::Text));
        assert_eq!(text, "rs1\tnot found\n");
    }

    #[test]
    fn test_classification() {
        let ctx = DatasetContext::new("gnomad_r4");
        let id = classify("chr1:55516888:g:ga", &ctx);
        let text = render(|w| {
            output_classification(w, "chr1:55516888:g:ga", id.as_ref(), OutputFormat::Text)
        });
        assert_eq!(text, "chr1:55516888:g:ga\tvariant\t1-55516888-G-GA\n");

        let text = render(|w| output_classification(w, "???", None, OutputFormat::Json));
        assert!(text.contains(r#""kind":null"#));
    }

    #[test]
    fn test_error_output() {
        let err = ResolveError::search_unavailable("timeout");
        let text = render(|w| output_error(w, "PCSK9", &err, OutputFormat::Text));
        assert_eq!(text, "PCSK9\tERROR\t[E2001] Search unavailable: timeout\n");

        let text = render(|w| output_error(w, "PCSK9", &err, OutputFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["code"], "E2001");
    }
}
