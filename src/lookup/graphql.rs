//! GraphQL client for the browser's search API.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tokio::time::sleep;

use super::{GeneMatch, GeneSearch, VariantSearch};
use crate::config::RemoteConfig;
use crate::dataset::{DatasetContext, ReferenceGenome};
use crate::error::ResolveError;
use crate::identifiers::ExternalId;

const GENE_SEARCH_QUERY: &str = "query GeneSearch($query: String!, $referenceGenome: ReferenceGenomeId!) {
  gene_search(query: $query, reference_genome: $referenceGenome) {
    ensembl_id
    symbol
  }
}";

const VARIANT_SEARCH_QUERY: &str = "query VariantSearch($query: String!, $datasetId: DatasetId!) {
  variant_search(query: $query, dataset: $datasetId) {
    variant_id
  }
}";

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GeneSearchData {
    gene_search: Option<Vec<GeneMatch>>,
}

#[derive(Debug, Deserialize)]
struct VariantSearchData {
    variant_search: Option<Vec<VariantSearchHit>>,
}

#[derive(Debug, Deserialize)]
struct VariantSearchHit {
    variant_id: String,
}

/// Decode a GraphQL envelope, turning transport-level GraphQL errors and a
/// missing `data` object into `SearchUnavailable`.
fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ResolveError> {
    let response: GraphQlResponse<T> = serde_json::from_str(body)
        .map_err(|e| ResolveError::search_unavailable(format!("malformed response: {}", e)))?;

    if !response.errors.is_empty() {
        let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(ResolveError::search_unavailable(messages.join("; ")));
    }

    response
        .data
        .ok_or_else(|| ResolveError::search_unavailable("response has no data"))
}

/// Parse a `gene_search` response body.
///
/// An absent `gene_search` field is a failure, not an empty result.
pub fn parse_gene_search_response(body: &str) -> Result<Vec<GeneMatch>, ResolveError> {
    let data: GeneSearchData = decode_envelope(body)?;
    data.gene_search
        .ok_or_else(|| ResolveError::search_unavailable("response has no gene_search field"))
}

/// Parse a `variant_search` response body into raw variant ids.
pub fn parse_variant_search_response(body: &str) -> Result<Vec<String>, ResolveError> {
    let data: VariantSearchData = decode_envelope(body)?;
    data.variant_search
        .map(|hits| hits.into_iter().map(|hit| hit.variant_id).collect())
        .ok_or_else(|| ResolveError::search_unavailable("response has no variant_search field"))
}

/// HTTP client for the GraphQL search API.
///
/// Requests are never retried. When `min_interval_ms` is configured, calls are
/// spaced at least that far apart.
#[derive(Debug)]
pub struct GraphQlClient {
    client: Client,
    endpoint: String,
    min_interval: Option<Duration>,
    last_request_time: Mutex<Option<Instant>>,
}

impl GraphQlClient {
    pub fn new(config: &RemoteConfig) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ResolveError::Config {
                msg: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            min_interval: config.min_interval_ms.map(Duration::from_millis),
            last_request_time: Mutex::new(None),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn pace(&self) {
        let Some(interval) = self.min_interval else {
            return;
        };
        let mut last_time = self.last_request_time.lock().await;
        if let Some(last) = *last_time {
            let elapsed = last.elapsed();
            if elapsed < interval {
                sleep(interval - elapsed).await;
            }
        }
        *last_time = Some(Instant::now());
    }

    async fn execute(&self, query: &str, variables: Value) -> Result<String, ResolveError> {
        self.pace().await;

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| ResolveError::search_unavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::search_unavailable(format!(
                "search service returned HTTP {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ResolveError::search_unavailable(format!("failed to read response: {}", e)))
    }
}

#[async_trait]
impl GeneSearch for GraphQlClient {
    async fn search_genes(
        &self,
        query: &str,
        genome: ReferenceGenome,
    ) -> Result<Vec<GeneMatch>, ResolveError> {
        tracing::info!(query, genome = %genome, "searching genes");
        let body = self
            .execute(
                GENE_SEARCH_QUERY,
                json!({ "query": query, "referenceGenome": genome.as_str() }),
            )
            .await?;
        parse_gene_search_response(&body)
    }
}

#[async_trait]
impl VariantSearch for GraphQlClient {
    async fn search_variants(
        &self,
        query: &ExternalId,
        dataset: &DatasetContext,
    ) -> Result<Vec<String>, ResolveError> {
        tracing::info!(query = %query, dataset = %dataset, "searching variants");
        let body = self
            .execute(
                VARIANT_SEARCH_QUERY,
                json!({ "query": query.as_str(), "datasetId": dataset.id }),
            )
            .await?;
        parse_variant_search_response(&body)
    }
}
