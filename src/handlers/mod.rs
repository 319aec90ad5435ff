//! Storage handlers for media entities
//!
//! Every media kind is owned by exactly one [`StorageHandler`], which turns an
//! entity into its canonical URI. The [`HandlerRegistry`] is built once at
//! startup and resolves ownership by the entity's declared kind.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mediabox::handlers::{HandlerRegistry, LocalHandler};
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register("image", Arc::new(LocalHandler::new("/uploads")));
//!
//! let handler = registry.handler_for(&file)?;
//! let uri = handler.uri(&file);
//! ```

mod bucket;
mod local;
mod registry;
mod traits;

pub use bucket::BucketHandler;
pub use local::LocalHandler;
pub(crate) use local::join_url;
pub use registry::HandlerRegistry;
pub use traits::{HandlerError, StorageHandler};
