//! Chronological neighbor resolution between posts

use std::sync::Arc;

use crate::config::SourceConfig;
use crate::content::NeighborPost;
use crate::error::Result;
use crate::source::{ContentSource, QueryOptions, SortOrder};

/// Which chronological neighbor to look for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The post published before the current one
    Before,

    /// The post published after the current one
    After,
}

impl Direction {
    /// Ordering that puts the wanted neighbor first when the window
    /// starts just past the current post
    fn order(self) -> SortOrder {
        match self {
            Direction::Before => SortOrder::PublishedDesc,
            Direction::After => SortOrder::PublishedAsc,
        }
    }
}

/// Resolves the adjacent post in publication order
pub struct NeighborResolver {
    source: Arc<dyn ContentSource>,
    document_type: String,
}

impl NeighborResolver {
    pub fn new(source: Arc<dyn ContentSource>, config: &SourceConfig) -> Self {
        Self {
            source,
            document_type: config.document_type.clone(),
        }
    }

    /// Find the post adjacent to `current_uid` in the given direction.
    ///
    /// `Ok(None)` means the post sits at that end of the archive. A
    /// source failure stays an error here; whether to degrade it is the
    /// caller's call.
    pub async fn resolve_neighbor(
        &self,
        current_uid: &str,
        direction: Direction,
    ) -> Result<Option<NeighborPost>> {
        let options = QueryOptions {
            page_size: Some(1),
            after: Some(current_uid.to_string()),
            order: Some(direction.order()),
        };
        let page = self.source.query(&self.document_type, options).await?;

        // A post is never its own neighbor, even when the source treats
        // the anchor inclusively.
        let neighbor = page
            .results
            .first()
            .and_then(NeighborPost::from_document)
            .filter(|n| n.uid != current_uid);
        Ok(neighbor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::source::{sample_post, Document, MemorySource, SearchPage};
    use async_trait::async_trait;

    fn resolver(source: MemorySource) -> NeighborResolver {
        NeighborResolver::new(Arc::new(source), &SourceConfig::default())
    }

    fn archive() -> MemorySource {
        MemorySource::new(vec![
            sample_post("alpha", "2021-01-05T08:00:00Z", "Alpha"),
            sample_post("beta", "2021-02-05T08:00:00Z", "Beta"),
            sample_post("gamma", "2021-03-05T08:00:00Z", "Gamma"),
        ])
    }

    #[tokio::test]
    async fn test_singleton_post_has_no_neighbors() {
        let resolver = resolver(MemorySource::new(vec![sample_post(
            "only",
            "2021-01-01T00:00:00Z",
            "Only post",
        )]));

        let before = resolver.resolve_neighbor("only", Direction::Before).await.unwrap();
        let after = resolver.resolve_neighbor("only", Direction::After).await.unwrap();
        assert!(before.is_none());
        assert!(after.is_none());
    }

    #[tokio::test]
    async fn test_middle_post_has_both_neighbors() {
        let resolver = resolver(archive());

        let before = resolver
            .resolve_neighbor("beta", Direction::Before)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(before.uid, "alpha");
        assert_eq!(before.title, "Alpha");

        let after = resolver
            .resolve_neighbor("beta", Direction::After)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.uid, "gamma");
        assert_eq!(after.title, "Gamma");
    }

    #[tokio::test]
    async fn test_archive_ends_have_one_neighbor() {
        let resolver = resolver(archive());

        // Oldest post: nothing before it.
        assert!(resolver
            .resolve_neighbor("alpha", Direction::Before)
            .await
            .unwrap()
            .is_none());
        // Newest post: nothing after it.
        assert!(resolver
            .resolve_neighbor("gamma", Direction::After)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_source_failure_stays_an_error() {
        let resolver = resolver(MemorySource::unavailable());
        let err = resolver
            .resolve_neighbor("alpha", Direction::After)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable(_)));
    }

    /// A source whose window starts AT the anchor instead of past it, so
    /// every neighbor query echoes the current post back.
    struct BoundaryEchoSource {
        doc: Document,
    }

    #[async_trait]
    impl ContentSource for BoundaryEchoSource {
        async fn query(&self, _doc_type: &str, _options: QueryOptions) -> Result<SearchPage> {
            Ok(SearchPage {
                page: 1,
                results_per_page: 1,
                total_results_size: 1,
                next_page: None,
                results: vec![self.doc.clone()],
            })
        }

        async fn fetch_page(&self, _page_url: &str) -> Result<SearchPage> {
            unimplemented!("neighbor resolution never follows cursors")
        }

        async fn get_by_uid(&self, _doc_type: &str, uid: &str) -> Result<Document> {
            Err(Error::NotFound(uid.to_string()))
        }
    }

    #[tokio::test]
    async fn test_post_is_never_its_own_neighbor() {
        let echo = BoundaryEchoSource {
            doc: sample_post("solo", "2021-04-01T00:00:00Z", "Solo"),
        };
        let resolver = NeighborResolver::new(Arc::new(echo), &SourceConfig::default());

        let neighbor = resolver
            .resolve_neighbor("solo", Direction::After)
            .await
            .unwrap();
        assert!(neighbor.is_none());
    }
}
