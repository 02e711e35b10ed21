//! Configuration module

mod source;

pub use source::SourceConfig;
