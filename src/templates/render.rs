use serde::Serialize;
use serde_json::{Value, json};
use std::error::Error as StdError;
use thiserror::Error;

use crate::media::Options;

/// Failure reported by a rendering backend, passed through untouched
#[derive(Debug, Error)]
#[error("failed to render template '{template}': {source}")]
pub struct RenderError {
    pub template: String,
    #[source]
    pub source: Box<dyn StdError + Send + Sync>,
}

impl RenderError {
    pub fn new(template: impl Into<String>, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            template: template.into(),
            source: source.into(),
        }
    }
}

/// Data handed to a template: the resolved media and the caller's options
#[derive(Debug, Serialize)]
pub struct RenderPayload<'a, E> {
    pub media: &'a E,
    pub options: &'a Options,
}

/// Template engine boundary
pub trait TemplateRenderer: Send + Sync {
    type Output;

    fn render<E: Serialize>(
        &self,
        template: &str,
        payload: &RenderPayload<'_, E>,
    ) -> Result<Self::Output, RenderError>;
}

/// Renders into a JSON view model (`{template, media, options}`) for a
/// front-end template engine
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl TemplateRenderer for JsonRenderer {
    type Output = Value;

    fn render<E: Serialize>(
        &self,
        template: &str,
        payload: &RenderPayload<'_, E>,
    ) -> Result<Value, RenderError> {
        let media = serde_json::to_value(payload.media).map_err(|e| RenderError::new(template, e))?;

        Ok(json!({
            "template": template,
            "media": media,
            "options": payload.options,
        }))
    }
}
