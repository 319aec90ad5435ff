use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use super::dispatcher::MediaDispatcher;
use super::error::BuildError;
use crate::config::{
    CacheConfig, Config, FilterBackend, FilterConfig, HandlerBackend, HandlerConfig,
};
use crate::filters::{FilterChain, StoredFilter, TransformerSet, UrlFilter};
use crate::handlers::{BucketHandler, HandlerRegistry, LocalHandler};
use crate::storage::StorageClient;
use crate::templates::TemplateResolver;

impl MediaDispatcher {
    /// Build a dispatcher and its storage from configuration
    pub fn from_config(config: &Config, transformers: &TransformerSet) -> Result<Self, BuildError> {
        let storage = StorageClient::from_config(&config.storage)?;
        Self::from_config_with_storage(config, storage, transformers)
    }

    /// Build a dispatcher whose stored filters use `storage`
    pub fn from_config_with_storage(
        config: &Config,
        storage: StorageClient,
        transformers: &TransformerSet,
    ) -> Result<Self, BuildError> {
        let handlers = build_handlers(&config.handlers)?;
        let filters = build_filters(&config.filters, &config.cache, &storage, transformers)?;
        let templates = TemplateResolver::new(config.templates.clone())?;

        info!(
            handlers = handlers.len(),
            filters = filters.len(),
            storage = %storage.name,
            default_template = templates.default_template(),
            "Media dispatcher ready"
        );

        Ok(Self::new(handlers, filters, templates))
    }
}

fn build_handlers(configs: &HashMap<String, HandlerConfig>) -> Result<HandlerRegistry, BuildError> {
    let mut registry = HandlerRegistry::new();

    for (kind, handler) in configs {
        let incomplete = |field| BuildError::IncompleteHandler {
            kind: kind.clone(),
            field,
        };

        match handler.backend {
            HandlerBackend::Local => {
                let base_url = handler.base_url.as_deref().ok_or_else(|| incomplete("base_url"))?;
                registry.register(kind.as_str(), Arc::new(LocalHandler::new(base_url)));
            }
            HandlerBackend::Bucket => {
                let bucket = handler.bucket.as_deref().ok_or_else(|| incomplete("bucket"))?;
                registry.register(
                    kind.as_str(),
                    Arc::new(BucketHandler::new(bucket, handler.endpoint.clone())),
                );
            }
        }
    }

    Ok(registry)
}

fn build_filters(
    configs: &HashMap<String, FilterConfig>,
    cache: &CacheConfig,
    storage: &StorageClient,
    transformers: &TransformerSet,
) -> Result<FilterChain, BuildError> {
    let mut chain = FilterChain::new();

    for (alias, filter) in configs {
        match filter.backend {
            FilterBackend::Stored => {
                let transformer = transformers.get(&filter.transformer).ok_or_else(|| {
                    BuildError::UnknownTransformer {
                        alias: alias.clone(),
                        transformer: filter.transformer.clone(),
                    }
                })?;

                chain.register(
                    alias.as_str(),
                    Arc::new(StoredFilter::new(
                        storage.clone(),
                        transformer,
                        cache.prefix.as_str(),
                        cache.base_url.as_str(),
                        cache.max_source_bytes,
                    )),
                );
            }
            FilterBackend::Url => {
                let base_url =
                    filter
                        .base_url
                        .as_deref()
                        .ok_or_else(|| BuildError::IncompleteFilter {
                            alias: alias.clone(),
                            field: "base_url",
                        })?;
                chain.register(alias.as_str(), Arc::new(UrlFilter::new(base_url)));
            }
            FilterBackend::Disabled => chain.disable(alias.as_str()),
        }
    }

    Ok(chain)
}
