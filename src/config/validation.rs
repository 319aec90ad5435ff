use super::models::{Config, FilterBackend, HandlerBackend};
use crate::templates::DEFAULT_TEMPLATE;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Template alias table has no '{}' entry", DEFAULT_TEMPLATE)]
    MissingDefaultTemplate,

    #[error("No handlers configured (at least one media kind needs a handler)")]
    NoHandlersConfigured,

    #[error("Handler for kind '{kind}' is missing required field '{field}'")]
    MissingHandlerField { kind: String, field: &'static str },

    #[error("Filter '{alias}' is missing required field '{field}'")]
    MissingFilterField { alias: String, field: &'static str },

    #[error("Cache prefix must not be empty")]
    EmptyCachePrefix,

    #[error("Cache max_source_bytes must be positive")]
    InvalidMaxSourceBytes,

    #[error("max_payload_bytes ({actual}) exceeds limit of 5MB ({limit})")]
    PayloadSizeExceedsLimit { actual: u64, limit: u64 },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_templates(config)?;
    validate_handlers(config)?;
    validate_filters(config)?;
    validate_cache(config)?;
    validate_payload_size(config)?;
    Ok(())
}

fn validate_templates(config: &Config) -> Result<(), ValidationError> {
    if !config.templates.contains_key(DEFAULT_TEMPLATE) {
        return Err(ValidationError::MissingDefaultTemplate);
    }
    Ok(())
}

/// Every handler needs the fields of its backend
fn validate_handlers(config: &Config) -> Result<(), ValidationError> {
    if config.handlers.is_empty() {
        return Err(ValidationError::NoHandlersConfigured);
    }

    for (kind, handler) in &config.handlers {
        let missing = match handler.backend {
            HandlerBackend::Local if handler.base_url.is_none() => Some("base_url"),
            HandlerBackend::Bucket if handler.bucket.is_none() => Some("bucket"),
            _ => None,
        };

        if let Some(field) = missing {
            return Err(ValidationError::MissingHandlerField {
                kind: kind.clone(),
                field,
            });
        }
    }

    Ok(())
}

fn validate_filters(config: &Config) -> Result<(), ValidationError> {
    for (alias, filter) in &config.filters {
        if filter.backend == FilterBackend::Url && filter.base_url.is_none() {
            return Err(ValidationError::MissingFilterField {
                alias: alias.clone(),
                field: "base_url",
            });
        }
    }
    Ok(())
}

fn validate_cache(config: &Config) -> Result<(), ValidationError> {
    if config.cache.prefix.trim_matches('/').is_empty() {
        return Err(ValidationError::EmptyCachePrefix);
    }

    if config.cache.max_source_bytes.as_u64() == 0 {
        return Err(ValidationError::InvalidMaxSourceBytes);
    }

    Ok(())
}

/// Request bodies only carry media descriptions, never file content
fn validate_payload_size(config: &Config) -> Result<(), ValidationError> {
    const MAX_PAYLOAD_BYTES: u64 = 5 * 1024 * 1024;

    let actual = config.server.api.max_payload_bytes.as_u64();
    if actual > MAX_PAYLOAD_BYTES {
        return Err(ValidationError::PayloadSizeExceedsLimit {
            actual,
            limit: MAX_PAYLOAD_BYTES,
        });
    }

    Ok(())
}
