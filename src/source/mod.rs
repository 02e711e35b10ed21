//! Content source - the external headless-CMS collaborator
//!
//! Everything in this crate reads from a single predicate-queryable
//! document API. The [`ContentSource`] trait is the seam: production code
//! talks to [`ApiSource`] over HTTP, tests and fixtures use
//! [`MemorySource`]. Components receive the source as an explicit
//! `Arc<dyn ContentSource>`.

mod api;
mod memory;

pub use api::ApiSource;
pub use memory::MemorySource;

#[cfg(test)]
pub(crate) use memory::sample_post;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Sort order for publication-date queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first
    PublishedAsc,
    /// Newest first
    PublishedDesc,
}

/// Options for a predicate query against the source
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Maximum number of results per page; the source applies its own
    /// default and upper bound when unset
    pub page_size: Option<usize>,

    /// Start the result window strictly after the post with this uid,
    /// in the requested ordering
    pub after: Option<String>,

    /// Publication-date ordering; the source's default applies when unset
    pub order: Option<SortOrder>,
}

/// A document as returned by the source, with its payload still loose.
///
/// The `data` payload is shaped by the document type; mapping it into
/// content models happens in [`crate::content`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Source-internal identifier
    pub id: String,

    /// URL-safe unique identifier; absent on documents that were never
    /// assigned one
    #[serde(default)]
    pub uid: Option<String>,

    /// Document type, e.g. "posts"
    #[serde(rename = "type")]
    pub doc_type: String,

    /// First publication timestamp; null for unpublished imports
    #[serde(default)]
    pub first_publication_date: Option<DateTime<Utc>>,

    /// Type-specific payload
    #[serde(default)]
    pub data: serde_json::Value,
}

/// One page of query results, with the continuation cursor owned by the
/// source. `next_page` is a literal URL to re-fetch; it is opaque to
/// clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub page: usize,

    #[serde(default)]
    pub results_per_page: usize,

    #[serde(default)]
    pub total_results_size: usize,

    #[serde(default)]
    pub next_page: Option<String>,

    pub results: Vec<Document>,
}

/// The external content repository.
///
/// All operations are independent and idempotent; no implementation may
/// cache across calls or retry on failure.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Run a predicate query for all documents of `doc_type`
    async fn query(&self, doc_type: &str, options: QueryOptions) -> Result<SearchPage>;

    /// Re-issue a plain fetch of a `next_page` URL previously returned
    /// by this source. The URL format is owned by the source; passing a
    /// cursor from a different source is undefined behavior.
    async fn fetch_page(&self, page_url: &str) -> Result<SearchPage>;

    /// Look up a single document by uid. Fails with
    /// [`crate::Error::NotFound`] when no document matches.
    async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<Document>;
}
