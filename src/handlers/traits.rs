use std::fmt::Debug;
use thiserror::Error;

use crate::media::FileEntity;

/// Handler resolution errors
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("no handler registered for media kind '{kind}' (file {id})")]
    NoHandlerFound { kind: String, id: String },
}

/// Storage handler producing the canonical URI of the media it owns.
///
/// URI generation is pure: no I/O, no side effects.
pub trait StorageHandler: Debug + Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &str;

    fn uri(&self, entity: &dyn FileEntity) -> String;
}
