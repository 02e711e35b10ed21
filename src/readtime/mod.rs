//! Reading-time estimation over post content

use crate::content::{richtext, ContentBlock};

/// Assumed reading speed in words per minute
pub const WORDS_PER_MINUTE: usize = 200;

/// Count the words a reader will actually read: the rich-text bodies
/// of every content block. Headings are not counted.
pub fn word_count(content: &[ContentBlock]) -> usize {
    content
        .iter()
        .map(|block| richtext::as_text(&block.body).split_whitespace().count())
        .sum()
}

/// Estimate reading time in whole minutes, rounded up so that any
/// non-empty body costs at least one minute. Empty content is zero.
pub fn estimate_minutes(content: &[ContentBlock]) -> usize {
    word_count(content).div_ceil(WORDS_PER_MINUTE)
}
