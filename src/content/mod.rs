//! Content module - post models and structured rich text

mod post;
pub mod richtext;

pub use post::{ContentBlock, NeighborPost, PostDetail, PostSummary, PostView};
