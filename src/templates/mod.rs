//! Template alias resolution and the rendering boundary

mod render;
mod resolver;

pub use render::{JsonRenderer, RenderError, RenderPayload, TemplateRenderer};
pub use resolver::{DEFAULT_TEMPLATE, TemplateError, TemplateResolver};
