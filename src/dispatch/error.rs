use thiserror::Error;

use crate::filters::TransformError;
use crate::handlers::HandlerError;
use crate::media::AccessorError;
use crate::storage::StorageError;
use crate::templates::TemplateError;

/// Failures surfaced by the dispatcher; nothing is retried or recovered here
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    NoHandler(#[from] HandlerError),

    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Accessor(#[from] AccessorError),
}

pub type Result<T> = std::result::Result<T, DispatchError>;

/// Errors wiring a dispatcher from configuration
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("filter '{alias}' uses unknown transformer '{transformer}'")]
    UnknownTransformer { alias: String, transformer: String },

    #[error("handler for kind '{kind}' is missing '{field}'")]
    IncompleteHandler { kind: String, field: &'static str },

    #[error("filter '{alias}' is missing '{field}'")]
    IncompleteFilter { alias: String, field: &'static str },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("storage setup failed: {0}")]
    Storage(#[from] StorageError),
}
