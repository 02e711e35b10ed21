//! Listing pagination - first page, cursor continuation, and the
//! accumulated "load more" feed

use std::sync::Arc;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::warn;

use crate::config::SourceConfig;
use crate::content::PostSummary;
use crate::error::Result;
use crate::source::{ContentSource, QueryOptions, SearchPage, SortOrder};

/// One fetched listing page, already mapped to summaries
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Summaries in source order, newest first
    pub results: Vec<T>,

    /// Cursor for the following page; `None` when this page is the last
    pub next_cursor: Option<String>,
}

/// Fetches listing pages of post summaries, newest first
pub struct ListingPaginator {
    source: Arc<dyn ContentSource>,
    document_type: String,
    page_size: usize,
}

impl ListingPaginator {
    pub fn new(source: Arc<dyn ContentSource>, config: &SourceConfig) -> Self {
        Self {
            source,
            document_type: config.document_type.clone(),
            page_size: config.page_size,
        }
    }

    /// Override the configured page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Fetch the newest posts. A page size below one is raised to one.
    pub async fn fetch_first_page(&self) -> Result<Page<PostSummary>> {
        let options = QueryOptions {
            page_size: Some(self.page_size.max(1)),
            order: Some(SortOrder::PublishedDesc),
            ..QueryOptions::default()
        };
        let page = self.source.query(&self.document_type, options).await?;
        Ok(self.map_page(page))
    }

    /// Fetch the page behind a cursor previously returned by this source
    pub async fn fetch_next_page(&self, cursor: &str) -> Result<Page<PostSummary>> {
        let page = self.source.fetch_page(cursor).await?;
        Ok(self.map_page(page))
    }

    /// Fetch the feed's next page and append it. Returns how many new
    /// posts arrived; zero when the feed is already exhausted. On error
    /// the feed is left untouched.
    pub async fn load_more(&self, feed: &mut PostFeed) -> Result<usize> {
        let cursor = match feed.next_cursor() {
            Some(cursor) => cursor.to_string(),
            None => return Ok(0),
        };
        let page = self.fetch_next_page(&cursor).await?;
        Ok(feed.append_page(page))
    }

    /// Map wire documents to summaries, skipping any the source returned
    /// in a shape we cannot use
    fn map_page(&self, page: SearchPage) -> Page<PostSummary> {
        let mut results = Vec::with_capacity(page.results.len());
        for doc in &page.results {
            match PostSummary::from_document(doc) {
                Ok(summary) => results.push(summary),
                Err(err) => {
                    warn!("Skipping unusable listing document {}: {}", doc.id, err);
                }
            }
        }
        Page {
            results,
            next_cursor: page.next_page,
        }
    }
}

/// Posts accumulated across successive "load more" fetches.
///
/// Posts keep their arrival order. A uid that shows up twice (the source
/// shifted under us between fetches) is kept once, first occurrence wins.
#[derive(Debug, Default)]
pub struct PostFeed {
    posts: Vec<PostSummary>,
    seen: IndexSet<String>,
    next_cursor: Option<String>,
}

impl PostFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a feed from the first fetched page
    pub fn from_page(page: Page<PostSummary>) -> Self {
        let mut feed = Self::new();
        feed.append_page(page);
        feed
    }

    /// Append a page and adopt its cursor. Returns the number of posts
    /// actually appended after deduplication.
    pub fn append_page(&mut self, page: Page<PostSummary>) -> usize {
        let mut appended = 0;
        for summary in page.results {
            if self.seen.insert(summary.uid.clone()) {
                self.posts.push(summary);
                appended += 1;
            } else {
                warn!("Dropping duplicate post '{}' from feed", summary.uid);
            }
        }
        self.next_cursor = page.next_cursor;
        appended
    }

    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    /// Whether another page can still be loaded
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
