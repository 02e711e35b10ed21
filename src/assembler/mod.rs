//! Post-page assembly: full detail, both neighbors, reading time

use std::sync::Arc;

use tracing::warn;

use crate::config::SourceConfig;
use crate::content::{NeighborPost, PostDetail, PostView};
use crate::error::Result;
use crate::navigation::{Direction, NeighborResolver};
use crate::readtime;
use crate::source::ContentSource;

/// Assembles everything a post page needs in one call
pub struct PostAssembler {
    source: Arc<dyn ContentSource>,
    resolver: NeighborResolver,
    document_type: String,
}

impl PostAssembler {
    pub fn new(source: Arc<dyn ContentSource>, config: &SourceConfig) -> Self {
        let resolver = NeighborResolver::new(Arc::clone(&source), config);
        Self {
            source,
            resolver,
            document_type: config.document_type.clone(),
        }
    }

    /// Fetch the post behind `slug` and compose its full view.
    ///
    /// The post itself must load: fetch and shaping failures abort the
    /// assembly. A failed neighbor lookup is logged and degrades to
    /// `None`.
    pub async fn assemble(&self, slug: &str) -> Result<PostView> {
        let doc = self.source.get_by_uid(&self.document_type, slug).await?;
        let post = PostDetail::from_document(&doc)?;

        let (previous, next) = tokio::join!(
            self.resolver.resolve_neighbor(slug, Direction::Before),
            self.resolver.resolve_neighbor(slug, Direction::After),
        );
        let previous_post = degrade(slug, "previous", previous);
        let next_post = degrade(slug, "next", next);

        let reading_minutes = readtime::estimate_minutes(&post.content);

        Ok(PostView {
            post,
            previous_post,
            next_post,
            reading_minutes,
        })
    }
}

/// Collapse a failed neighbor lookup to `None`, keeping a trace of what
/// was lost
fn degrade(
    slug: &str,
    which: &str,
    result: Result<Option<NeighborPost>>,
) -> Option<NeighborPost> {
    match result {
        Ok(neighbor) => neighbor,
        Err(err) => {
            warn!("Could not resolve {} neighbor of '{}': {}", which, slug, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::source::{sample_post, Document, MemorySource};
    use chrono::{DateTime, Utc};
    use serde_json::json;

    fn assembler(source: MemorySource) -> PostAssembler {
        PostAssembler::new(Arc::new(source), &SourceConfig::default())
    }

    fn archive() -> MemorySource {
        MemorySource::new(vec![
            sample_post("alpha", "2021-01-05T08:00:00Z", "Alpha"),
            sample_post("beta", "2021-02-05T08:00:00Z", "Beta"),
            sample_post("gamma", "2021-03-05T08:00:00Z", "Gamma"),
        ])
    }

    fn wordy_post(uid: &str, date: &str, words: usize) -> Document {
        let text = vec!["lorem"; words].join(" ");
        Document {
            id: format!("id-{}", uid),
            uid: Some(uid.to_string()),
            doc_type: "posts".to_string(),
            first_publication_date: Some(
                DateTime::parse_from_rfc3339(date).unwrap().with_timezone(&Utc),
            ),
            data: json!({
                "title": "Wordy",
                "author": "Ada Lovelace",
                "content": [{
                    "heading": "All of it",
                    "body": [{"type": "paragraph", "text": text, "spans": []}]
                }]
            }),
        }
    }

    #[tokio::test]
    async fn test_assembles_full_view() {
        let view = assembler(archive()).assemble("beta").await.unwrap();

        assert_eq!(view.post.uid, "beta");
        assert_eq!(view.post.title, "Beta");
        assert_eq!(view.post.author, "Ada Lovelace");
        assert!(view.post.banner_url.is_some());

        assert_eq!(view.previous_post.as_ref().map(|n| n.uid.as_str()), Some("alpha"));
        assert_eq!(view.next_post.as_ref().map(|n| n.uid.as_str()), Some("gamma"));

        // The fixture body is a few words, far under one minute's worth.
        assert_eq!(view.reading_minutes, 1);
    }

    #[tokio::test]
    async fn test_oldest_post_has_only_a_newer_neighbor() {
        let view = assembler(archive()).assemble("alpha").await.unwrap();
        assert!(view.previous_post.is_none());
        assert_eq!(view.next_post.as_ref().map(|n| n.uid.as_str()), Some("beta"));
    }

    #[tokio::test]
    async fn test_singleton_post_assembles_without_neighbors() {
        let source = MemorySource::new(vec![sample_post(
            "only",
            "2021-01-01T00:00:00Z",
            "Only post",
        )]);
        let view = assembler(source).assemble("only").await.unwrap();
        assert!(view.previous_post.is_none());
        assert!(view.next_post.is_none());
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found() {
        let err = assembler(archive()).assemble("ghost").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(ref slug) if slug == "ghost"));
    }

    #[tokio::test]
    async fn test_unavailable_source_aborts() {
        let err = assembler(MemorySource::unavailable())
            .assemble("beta")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_neighbor_outage_degrades_to_none() {
        // Lookup by uid still works, every search query fails.
        let source = MemorySource::new(vec![
            sample_post("alpha", "2021-01-05T08:00:00Z", "Alpha"),
            sample_post("beta", "2021-02-05T08:00:00Z", "Beta"),
        ])
        .with_search_outage();

        let view = assembler(source).assemble("beta").await.unwrap();
        assert_eq!(view.post.uid, "beta");
        assert!(view.previous_post.is_none());
        assert!(view.next_post.is_none());
    }

    #[tokio::test]
    async fn test_malformed_post_aborts() {
        let broken = Document {
            id: "id-broken".to_string(),
            uid: Some("broken".to_string()),
            doc_type: "posts".to_string(),
            first_publication_date: None,
            data: json!({"title": "No content field"}),
        };
        let err = assembler(MemorySource::new(vec![broken]))
            .assemble("broken")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedContent { ref uid, .. } if uid == "broken"));
    }

    #[tokio::test]
    async fn test_reading_time_scales_with_body() {
        let source = MemorySource::new(vec![wordy_post("wordy", "2021-07-01T00:00:00Z", 450)]);
        let view = assembler(source).assemble("wordy").await.unwrap();
        assert_eq!(view.reading_minutes, 3);
    }

    #[tokio::test]
    async fn test_view_serializes_flat() {
        let view = assembler(archive()).assemble("gamma").await.unwrap();
        let value = serde_json::to_value(&view).unwrap();

        // Post fields sit at the top level next to the derived ones.
        assert_eq!(value["uid"], "gamma");
        assert_eq!(value["title"], "Gamma");
        assert_eq!(value["reading_minutes"], 1);
        assert_eq!(value["previous_post"]["uid"], "beta");
        assert!(value["next_post"].is_null());
    }
}
