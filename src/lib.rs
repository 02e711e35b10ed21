//! copydesk: a content assembly engine for headless-CMS blogs
//!
//! This crate turns a predicate-queryable document API into the views a
//! blog frontend needs: a paginated post feed with "load more"
//! accumulation, a pre-render path manifest, and fully assembled post
//! pages with chronological neighbors and an estimated reading time.

pub mod assembler;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod listing;
pub mod navigation;
pub mod paths;
pub mod readtime;
pub mod source;

use std::path::Path;
use std::sync::Arc;

pub use error::{Error, Result};

use crate::assembler::PostAssembler;
use crate::config::SourceConfig;
use crate::listing::ListingPaginator;
use crate::navigation::NeighborResolver;
use crate::paths::PathEnumerator;
use crate::source::{ApiSource, ContentSource};

/// The main copydesk application
#[derive(Clone)]
pub struct Copydesk {
    /// Content source configuration
    pub config: SourceConfig,
    source: Arc<dyn ContentSource>,
}

impl Copydesk {
    /// Create an instance rooted in a directory, reading `copydesk.yml`
    /// when present and falling back to defaults
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let config_path = base_dir.as_ref().join("copydesk.yml");
        let config = if config_path.exists() {
            SourceConfig::load(&config_path)?
        } else {
            SourceConfig::default()
        };

        let source: Arc<dyn ContentSource> = Arc::new(ApiSource::new(&config)?);
        Ok(Self { config, source })
    }

    /// Create an instance over an explicit content source
    pub fn with_source(config: SourceConfig, source: Arc<dyn ContentSource>) -> Self {
        Self { config, source }
    }

    /// Listing paginator over the configured document type
    pub fn listing(&self) -> ListingPaginator {
        ListingPaginator::new(Arc::clone(&self.source), &self.config)
    }

    /// Pre-render path enumerator
    pub fn paths(&self) -> PathEnumerator {
        PathEnumerator::new(Arc::clone(&self.source), &self.config)
    }

    /// Chronological neighbor resolver
    pub fn navigation(&self) -> NeighborResolver {
        NeighborResolver::new(Arc::clone(&self.source), &self.config)
    }

    /// Post assembler for single-post pages
    pub fn assembler(&self) -> PostAssembler {
        PostAssembler::new(Arc::clone(&self.source), &self.config)
    }
}
