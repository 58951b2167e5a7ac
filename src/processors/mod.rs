//! Processor implementations: record enrichment stages

pub mod placeholder;
pub mod request_meta;
pub mod shard;

pub use placeholder::PlaceholderProcessor;
pub use request_meta::{RequestMetadata, RequestMetadataProcessor, RequestMetadataProvider};
pub use shard::ShardProcessor;

// Re-export the trait alongside its implementations
pub use crate::core::Processor;
