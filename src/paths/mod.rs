//! Static pre-render path enumeration

use std::sync::Arc;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::SourceConfig;
use crate::error::Result;
use crate::source::{ContentSource, QueryOptions, SortOrder};

/// Page size used when draining the full listing
const ENUMERATION_PAGE_SIZE: usize = 100;

/// How a renderer should treat a slug that is not in the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackMode {
    /// Render on demand while the client waits
    Blocking,

    /// Serve a placeholder immediately, fetch the post, then fill the
    /// page in
    Hydrate,
}

impl std::fmt::Display for FallbackMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackMode::Blocking => write!(f, "blocking"),
            FallbackMode::Hydrate => write!(f, "hydrate"),
        }
    }
}

/// Route parameters for one post page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathParams {
    pub slug: String,
}

/// One pre-renderable path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPath {
    pub params: PathParams,
}

/// Every pre-renderable post path plus the policy for slugs outside
/// the set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathManifest {
    pub paths: Vec<StaticPath>,
    pub fallback: FallbackMode,
}

impl PathManifest {
    /// Iterate the slugs in manifest order
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|p| p.params.slug.as_str())
    }
}

/// Builds the pre-render manifest by walking the entire listing
pub struct PathEnumerator {
    source: Arc<dyn ContentSource>,
    document_type: String,
}

impl PathEnumerator {
    pub fn new(source: Arc<dyn ContentSource>, config: &SourceConfig) -> Self {
        Self {
            source,
            document_type: config.document_type.clone(),
        }
    }

    /// Drain the whole listing and collect one path per post.
    ///
    /// The manifest is an existence index: it carries slugs only, never
    /// content. Slugs outside it are covered by the `Hydrate` fallback.
    pub async fn enumerate_paths(&self) -> Result<PathManifest> {
        let options = QueryOptions {
            page_size: Some(ENUMERATION_PAGE_SIZE),
            order: Some(SortOrder::PublishedDesc),
            ..QueryOptions::default()
        };
        let mut page = self.source.query(&self.document_type, options).await?;

        let mut slugs: IndexSet<String> = IndexSet::new();
        loop {
            for doc in &page.results {
                match &doc.uid {
                    Some(uid) => {
                        slugs.insert(uid.clone());
                    }
                    None => {
                        warn!("Document {} has no uid, skipping its path", doc.id);
                    }
                }
            }
            match page.next_page.take() {
                Some(url) => page = self.source.fetch_page(&url).await?,
                None => break,
            }
        }

        let paths = slugs
            .into_iter()
            .map(|slug| StaticPath {
                params: PathParams { slug },
            })
            .collect();

        Ok(PathManifest {
            paths,
            fallback: FallbackMode::Hydrate,
        })
    }
}
