//! In-memory content source for fixtures and tests
//!
//! Serves a fixed document list with the same pagination contract as the
//! HTTP source: ordered windows, opaque `memory:` continuation cursors,
//! exclusive `after` handling. Failure injection covers the outage paths
//! without a network.

use async_trait::async_trait;

use super::{ContentSource, Document, QueryOptions, SearchPage, SortOrder};
use crate::error::{Error, Result};

/// Page size applied when a query does not ask for one
const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound on the served page size, mirroring the HTTP API's cap
const MAX_PAGE_SIZE: usize = 100;

/// Content source over a fixed in-memory document list.
///
/// Results are ordered by `first_publication_date` (undated documents
/// first ascending, last descending; ties keep insertion order). `after`
/// is exclusive: the window starts at the position past the named uid.
#[derive(Clone, Default)]
pub struct MemorySource {
    documents: Vec<Document>,
    fail_all: bool,
    fail_search: bool,
}

impl MemorySource {
    /// Create a source serving the given documents
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            fail_all: false,
            fail_search: false,
        }
    }

    /// Create a source where every call fails with `SourceUnavailable`
    pub fn unavailable() -> Self {
        Self {
            documents: Vec::new(),
            fail_all: true,
            fail_search: false,
        }
    }

    /// Fail predicate queries and page fetches while leaving uid lookups
    /// working, for exercising degraded assembly
    pub fn with_search_outage(mut self) -> Self {
        self.fail_search = true;
        self
    }

    fn check_search(&self) -> Result<()> {
        if self.fail_all || self.fail_search {
            return Err(Error::SourceUnavailable("simulated outage".to_string()));
        }
        Ok(())
    }

    /// Documents of one type in the requested publication order
    fn ordered(&self, doc_type: &str, order: SortOrder) -> Vec<Document> {
        let mut docs: Vec<Document> = self
            .documents
            .iter()
            .filter(|d| d.doc_type == doc_type)
            .cloned()
            .collect();
        match order {
            SortOrder::PublishedAsc => {
                docs.sort_by(|a, b| a.first_publication_date.cmp(&b.first_publication_date));
            }
            SortOrder::PublishedDesc => {
                docs.sort_by(|a, b| b.first_publication_date.cmp(&a.first_publication_date));
            }
        }
        docs
    }

    /// Serve the window starting at `offset`, minting a continuation
    /// cursor when more documents remain
    fn window(
        &self,
        doc_type: &str,
        order: SortOrder,
        offset: usize,
        page_size: usize,
    ) -> SearchPage {
        let docs = self.ordered(doc_type, order);
        let total = docs.len();
        let end = (offset + page_size).min(total);
        let results: Vec<Document> = docs
            .get(offset..end)
            .map(|s| s.to_vec())
            .unwrap_or_default();

        let next_page = if end < total {
            Some(format!(
                "memory:{}:{}:{}:{}",
                doc_type,
                order_token(order),
                end,
                page_size
            ))
        } else {
            None
        };

        SearchPage {
            page: offset / page_size.max(1) + 1,
            results_per_page: page_size,
            total_results_size: total,
            next_page,
            results,
        }
    }
}

fn order_token(order: SortOrder) -> &'static str {
    match order {
        SortOrder::PublishedAsc => "asc",
        SortOrder::PublishedDesc => "desc",
    }
}

fn parse_order_token(token: &str) -> Option<SortOrder> {
    match token {
        "asc" => Some(SortOrder::PublishedAsc),
        "desc" => Some(SortOrder::PublishedDesc),
        _ => None,
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn query(&self, doc_type: &str, options: QueryOptions) -> Result<SearchPage> {
        self.check_search()?;

        let order = options.order.unwrap_or(SortOrder::PublishedDesc);
        let page_size = options
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);

        let offset = match &options.after {
            Some(uid) => {
                let docs = self.ordered(doc_type, order);
                match docs.iter().position(|d| d.uid.as_deref() == Some(uid)) {
                    Some(pos) => pos + 1,
                    // Unknown anchor: nothing is after it.
                    None => docs.len(),
                }
            }
            None => 0,
        };

        Ok(self.window(doc_type, order, offset, page_size))
    }

    async fn fetch_page(&self, page_url: &str) -> Result<SearchPage> {
        self.check_search()?;

        // Fixture cursor format: memory:<type>:<asc|desc>:<offset>:<size>
        let parts: Vec<&str> = page_url.split(':').collect();
        if parts.len() == 5 && parts[0] == "memory" {
            let order = parse_order_token(parts[2]);
            let offset = parts[3].parse::<usize>().ok();
            let page_size = parts[4].parse::<usize>().ok();
            if let (Some(order), Some(offset), Some(page_size)) = (order, offset, page_size) {
                return Ok(self.window(parts[1], order, offset, page_size));
            }
        }

        Err(Error::SourceUnavailable(format!(
            "unrecognized page cursor '{}'",
            page_url
        )))
    }

    async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<Document> {
        if self.fail_all {
            return Err(Error::SourceUnavailable("simulated outage".to_string()));
        }

        self.documents
            .iter()
            .find(|d| d.doc_type == doc_type && d.uid.as_deref() == Some(uid))
            .cloned()
            .ok_or_else(|| Error::NotFound(uid.to_string()))
    }
}

/// Build a minimal post document for fixtures: one content block with a
/// short paragraph body.
#[cfg(test)]
pub(crate) fn sample_post(uid: &str, date: &str, title: &str) -> Document {
    use chrono::{DateTime, Utc};

    Document {
        id: format!("id-{}", uid),
        uid: Some(uid.to_string()),
        doc_type: "posts".to_string(),
        first_publication_date: Some(
            DateTime::parse_from_rfc3339(date)
                .expect("fixture date must be RFC 3339")
                .with_timezone(&Utc),
        ),
        data: serde_json::json!({
            "title": title,
            "subtitle": format!("{} subtitle", title),
            "author": "Ada Lovelace",
            "banner": { "url": "https://images.example.org/banner.png" },
            "content": [
                {
                    "heading": "Section",
                    "body": [
                        { "type": "paragraph", "text": "A few words of body text.", "spans": [] }
                    ]
                }
            ]
        }),
    }
}
