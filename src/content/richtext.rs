//! Structured rich-text model and plain-text rendering
//!
//! The content API delivers post bodies as sequences of structured-text
//! nodes rather than markup. HTML rendering belongs to the presentation
//! layer; this module only models the nodes and flattens them to plain
//! text, which is what reading-time estimation needs.

use serde::{Deserialize, Serialize};

/// A single structured-text node as delivered by the content API.
///
/// Text-bearing kinds (`paragraph`, `heading1`..`heading6`, `list-item`,
/// `o-list-item`, `preformatted`) carry their text directly; non-text
/// kinds such as `image` or `embed` leave `text` empty and are ignored
/// by plain-text rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichTextNode {
    /// Node kind, e.g. "paragraph" or "heading2"
    #[serde(rename = "type")]
    pub kind: String,

    /// Raw text of the node, without span formatting applied
    #[serde(default)]
    pub text: String,

    /// Inline formatting spans over `text`
    #[serde(default)]
    pub spans: Vec<Span>,

    /// Media URL for non-text nodes (images, embeds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl RichTextNode {
    /// Create a plain paragraph node
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: "paragraph".to_string(),
            text: text.into(),
            spans: Vec::new(),
            url: None,
        }
    }

    /// Create a heading node of the given level (clamped to 1..=6)
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self {
            kind: format!("heading{}", level.clamp(1, 6)),
            text: text.into(),
            spans: Vec::new(),
            url: None,
        }
    }
}

/// An inline formatting span over a node's text.
///
/// `start`/`end` are character offsets; the payload under `data` (link
/// targets, label names) is kept verbatim for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Flatten a node sequence to plain text, joining node texts with a
/// single space. Non-text nodes contribute their (empty) text, which
/// whitespace-based word splitting then ignores.
pub fn as_text(nodes: &[RichTextNode]) -> String {
    nodes
        .iter()
        .map(|node| node.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
