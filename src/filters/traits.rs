use async_trait::async_trait;
use thiserror::Error;

use crate::media::{FileEntity, Options};
use crate::storage::StorageError;

/// Errors raised while producing a derivative
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to read source '{key}': {source}")]
    SourceUnavailable {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("source '{key}' is {size} bytes, above the {limit} byte limit")]
    SourceTooLarge { key: String, size: u64, limit: u64 },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid option '{name}': {reason}")]
    InvalidOption { name: String, reason: String },

    #[error("failed to look up cache artifact '{key}': {source}")]
    CacheLookup {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("failed to write cache artifact '{key}': {source}")]
    CacheWrite {
        key: String,
        #[source]
        source: StorageError,
    },
}

/// Everything a filter needs to produce one derivative
#[derive(Clone, Copy)]
pub struct FilterRequest<'a> {
    /// Alias the filter was requested under
    pub alias: &'a str,
    pub entity: &'a dyn FileEntity,
    /// Canonical URI of the original, as produced by its storage handler
    pub source_uri: &'a str,
    pub options: &'a Options,
}

/// Filter producing a cached derivative of a media entity.
///
/// `handle` returns the cache path of the derivative it produced, so one
/// instance can serve concurrent requests. Identical requests must map to
/// the same cache path.
#[async_trait]
pub trait Filter: Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &str;

    async fn handle(&self, request: FilterRequest<'_>) -> Result<String, TransformError>;
}
