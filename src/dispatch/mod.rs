//! Media dispatch: resolving entities to URIs and rendering them
//!
//! [`MediaDispatcher`] ties the three lookup tables together:
//!
//! - [`HandlerRegistry`](crate::handlers::HandlerRegistry) picks the storage
//!   handler owning an entity's kind
//! - [`FilterChain`](crate::filters::FilterChain) turns a filter alias into an
//!   optional filter
//! - [`TemplateResolver`](crate::templates::TemplateResolver) turns a template
//!   alias into a template identifier
//!
//! ## Example
//!
//! ```rust,ignore
//! let dispatcher = MediaDispatcher::from_config(&config, &TransformerSet::with_defaults())?;
//!
//! let thumb = dispatcher
//!     .resolve_filtered_media(&mut file, Some("thumb"), &Options::new())
//!     .await?
//!     .into_owned();
//! let view = dispatcher.render_template(&JsonRenderer, &thumb, Some("thumb"), &options)?;
//! ```

mod dispatcher;
mod error;
mod wiring;

pub use dispatcher::{MediaDispatcher, ResolvedMedia};
pub use error::{BuildError, DispatchError, Result};
