use bytes::Bytes;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

use super::traits::TransformError;
use crate::media::Options;

/// Byte-level transform plugged into a [`StoredFilter`](super::StoredFilter)
pub trait Transformer: Debug + Send + Sync {
    fn transform(&self, source: Bytes, options: &Options) -> Result<Bytes, TransformError>;

    /// Extension of the produced artifact; `None` keeps the source extension
    fn output_extension(&self, _options: &Options) -> Option<String> {
        None
    }
}

/// Copies the original unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Transformer for Passthrough {
    fn transform(&self, source: Bytes, _options: &Options) -> Result<Bytes, TransformError> {
        Ok(source)
    }
}

/// Named transformers available to configured filters
#[derive(Clone, Debug, Default)]
pub struct TransformerSet {
    transformers: BTreeMap<String, Arc<dyn Transformer>>,
}

impl TransformerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, transformer: Arc<dyn Transformer>) {
        self.transformers.insert(name.into(), transformer);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Transformer>> {
        self.transformers.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.transformers.keys().map(String::as_str)
    }

    /// Set holding the built-in `passthrough` transformer
    pub fn with_defaults() -> Self {
        let mut set = Self::new();
        set.register("passthrough", Arc::new(Passthrough));
        set
    }
}
