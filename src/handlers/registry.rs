use std::collections::BTreeMap;
use std::sync::Arc;

use super::local::LocalHandler;
use super::traits::{HandlerError, StorageHandler};
use crate::media::FileEntity;

/// Registry mapping media kinds to their storage handler
#[derive(Clone, Debug, Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, Arc<dyn StorageHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Register `handler` as owner of `kind`, replacing any previous owner
    pub fn register(&mut self, kind: impl Into<String>, handler: Arc<dyn StorageHandler>) {
        self.handlers.insert(kind.into(), handler);
    }

    /// Resolve the handler owning `entity`
    pub fn handler_for(
        &self,
        entity: &dyn FileEntity,
    ) -> Result<Arc<dyn StorageHandler>, HandlerError> {
        self.handlers
            .get(entity.kind())
            .cloned()
            .ok_or_else(|| HandlerError::NoHandlerFound {
                kind: entity.kind().to_string(),
                id: entity.id().to_string(),
            })
    }

    pub fn has_handler(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registry with a local handler for the `file` kind under `/uploads`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("file", Arc::new(LocalHandler::new("/uploads")));
        registry
    }
}
