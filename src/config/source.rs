//! Source configuration (copydesk.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::helpers::DEFAULT_DATE_FORMAT;

/// Content source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the content API, e.g. "https://blog.example.org/api/v2"
    pub api_url: String,

    /// Access token appended to every request when set
    pub access_token: Option<String>,

    /// Document type holding blog posts
    pub document_type: String,

    /// Default page size for the post listing
    pub page_size: usize,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Date format for display (chrono format string)
    pub date_format: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8788/api/v2".to_string(),
            access_token: None,
            document_type: "posts".to_string(),
            page_size: 20,
            timeout_secs: 10,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl SourceConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SourceConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
