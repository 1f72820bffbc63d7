//! Stale-result suppression for interactive search.
//!
//! Every query issued through a [`SearchSession`] takes a ticket carrying a
//! generation number. When the search finishes, its result is kept only if no
//! newer ticket has been issued in the meantime; otherwise it is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::dataset::DatasetContext;
use crate::error::ResolveError;

use super::candidate::NavigationCandidate;
use super::orchestrator::Resolver;

/// A claim on the latest search slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Search front-end that drops results superseded by a newer query.
#[derive(Debug)]
pub struct SearchSession {
    resolver: Arc<Resolver>,
    latest: AtomicU64,
}

impl SearchSession {
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self {
            resolver,
            latest: AtomicU64::new(0),
        }
    }

    /// Issue a ticket, superseding every earlier one.
    pub fn begin(&self, query: impl Into<String>) -> SearchTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        SearchTicket {
            generation,
            query: query.into(),
        }
    }

    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.generation
    }

    /// Keep `result` only if `ticket` is still the latest.
    pub fn complete<T>(&self, ticket: &SearchTicket, result: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(result)
        } else {
            debug!(
                query = %ticket.query,
                generation = ticket.generation,
                "discarding stale search result"
            );
            None
        }
    }

    /// Run a search mode query; `None` means a newer query superseded it.
    pub async fn search(
        &self,
        query: &str,
        ctx: &DatasetContext,
    ) -> Option<Result<Vec<NavigationCandidate>, ResolveError>> {
        let ticket = self.begin(query);
        let result = self.resolver.search(query, ctx).await;
        self.complete(&ticket, result)
    }
}
