//! Post models - listing summaries, full details, neighbors, and the
//! assembled view

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::richtext::RichTextNode;
use crate::error::{Error, Result};
use crate::source::Document;

/// A post as it appears in the listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    /// URL-safe unique identifier
    pub uid: String,

    /// First publication timestamp
    pub publication_date: Option<DateTime<Utc>>,

    /// Post title
    pub title: String,

    /// Short tagline shown under the title
    pub subtitle: String,

    /// Author display name
    pub author: String,
}

/// Listing payload; every field tolerates absence
#[derive(Debug, Default, Deserialize)]
struct SummaryData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    author: String,
}

impl PostSummary {
    /// Shape a wire document into a listing summary
    pub fn from_document(doc: &Document) -> Result<Self> {
        let uid = require_uid(doc)?;
        let data: SummaryData = serde_json::from_value(doc.data.clone())
            .map_err(|e| Error::malformed(&uid, e))?;

        Ok(Self {
            uid,
            publication_date: doc.first_publication_date,
            title: data.title,
            subtitle: data.subtitle,
            author: data.author,
        })
    }
}

/// One titled section of a post body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Section heading; may be empty
    #[serde(default)]
    pub heading: String,

    /// Rich-text body of the section
    pub body: Vec<RichTextNode>,
}

/// A post with its full content, as fetched for a single-post page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub uid: String,
    pub publication_date: Option<DateTime<Utc>>,
    pub title: String,
    pub author: String,
    pub banner_url: Option<String>,
    pub content: Vec<ContentBlock>,
}

/// Detail payload; `content` is required - a post page without content
/// blocks cannot be rendered or estimated
#[derive(Debug, Deserialize)]
struct DetailData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    banner: Option<BannerData>,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct BannerData {
    #[serde(default)]
    url: Option<String>,
}

impl PostDetail {
    /// Shape a wire document into full post detail.
    ///
    /// Fails with [`Error::MalformedContent`] when the data payload
    /// cannot carry a renderable post body.
    pub fn from_document(doc: &Document) -> Result<Self> {
        let uid = require_uid(doc)?;
        let data: DetailData = serde_json::from_value(doc.data.clone())
            .map_err(|e| Error::malformed(&uid, e))?;

        Ok(Self {
            uid,
            publication_date: doc.first_publication_date,
            title: data.title,
            author: data.author,
            banner_url: data.banner.and_then(|b| b.url),
            content: data.content,
        })
    }
}

/// The chronologically adjacent post in one direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborPost {
    pub title: String,
    pub uid: String,
}

impl NeighborPost {
    /// Best-effort mapping for navigation; a document without a uid
    /// cannot be linked to, so it yields no neighbor
    pub fn from_document(doc: &Document) -> Option<Self> {
        let uid = doc.uid.clone()?;
        let title = doc
            .data
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        Some(Self { title, uid })
    }
}

/// A post composed with everything the post page needs: full detail,
/// both chronological neighbors, and the derived reading time
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    #[serde(flatten)]
    pub post: PostDetail,

    /// Older neighbor by publication date; `None` at the start of the
    /// corpus or when the lookup degraded
    pub previous_post: Option<NeighborPost>,

    /// Newer neighbor by publication date
    pub next_post: Option<NeighborPost>,

    /// Estimated reading time in whole minutes
    pub reading_minutes: usize,
}

fn require_uid(doc: &Document) -> Result<String> {
    doc.uid
        .clone()
        .ok_or_else(|| Error::malformed(&doc.id, "document has no uid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(uid: Option<&str>, data: serde_json::Value) -> Document {
        Document {
            id: "doc-1".to_string(),
            uid: uid.map(|u| u.to_string()),
            doc_type: "posts".to_string(),
            first_publication_date: None,
            data,
        }
    }

    #[test]
    fn test_summary_from_document() {
        let doc = document(
            Some("hello-world"),
            json!({"title": "Hello", "subtitle": "world", "author": "Ada"}),
        );
        let summary = PostSummary::from_document(&doc).unwrap();
        assert_eq!(summary.uid, "hello-world");
        assert_eq!(summary.title, "Hello");
        assert_eq!(summary.subtitle, "world");
        assert_eq!(summary.author, "Ada");
    }

    #[test]
    fn test_summary_tolerates_missing_fields() {
        let doc = document(Some("sparse"), json!({"title": "Only a title"}));
        let summary = PostSummary::from_document(&doc).unwrap();
        assert_eq!(summary.title, "Only a title");
        assert_eq!(summary.subtitle, "");
        assert_eq!(summary.author, "");
    }

    #[test]
    fn test_summary_requires_uid() {
        let doc = document(None, json!({"title": "Orphan"}));
        let err = PostSummary::from_document(&doc).unwrap_err();
        assert!(matches!(err, Error::MalformedContent { .. }));
    }

    #[test]
    fn test_summary_rejects_non_object_data() {
        let doc = document(Some("broken"), json!("just a string"));
        assert!(PostSummary::from_document(&doc).is_err());
    }

    #[test]
    fn test_detail_from_document() {
        let doc = document(
            Some("full-post"),
            json!({
                "title": "Full post",
                "author": "Ada",
                "banner": {"url": "https://images.example.org/b.png"},
                "content": [
                    {"heading": "Intro", "body": [
                        {"type": "paragraph", "text": "Opening words.", "spans": []}
                    ]}
                ]
            }),
        );
        let detail = PostDetail::from_document(&doc).unwrap();
        assert_eq!(detail.uid, "full-post");
        assert_eq!(detail.banner_url.as_deref(), Some("https://images.example.org/b.png"));
        assert_eq!(detail.content.len(), 1);
        assert_eq!(detail.content[0].heading, "Intro");
        assert_eq!(detail.content[0].body[0].text, "Opening words.");
    }

    #[test]
    fn test_detail_requires_content() {
        let doc = document(Some("no-body"), json!({"title": "No body"}));
        let err = PostDetail::from_document(&doc).unwrap_err();
        assert!(matches!(err, Error::MalformedContent { ref uid, .. } if uid == "no-body"));
    }

    #[test]
    fn test_detail_requires_block_bodies() {
        let doc = document(
            Some("half-block"),
            json!({"content": [{"heading": "Heading only"}]}),
        );
        assert!(PostDetail::from_document(&doc).is_err());
    }

    #[test]
    fn test_detail_without_banner() {
        let doc = document(Some("plain"), json!({"content": []}));
        let detail = PostDetail::from_document(&doc).unwrap();
        assert!(detail.banner_url.is_none());
        assert!(detail.content.is_empty());
    }

    #[test]
    fn test_neighbor_from_document() {
        let doc = document(Some("next-up"), json!({"title": "Next up"}));
        let neighbor = NeighborPost::from_document(&doc).unwrap();
        assert_eq!(neighbor.uid, "next-up");
        assert_eq!(neighbor.title, "Next up");

        let anonymous = document(None, json!({"title": "Unlinkable"}));
        assert!(NeighborPost::from_document(&anonymous).is_none());
    }
}
