//! Filters producing cached derivatives of media
//!
//! - [`Filter`] - the capability every backend implements
//! - [`FilterChain`] - alias lookup; a miss means "no transformation"
//! - [`StoredFilter`] - derivatives written to object storage
//! - [`UrlFilter`] - derivatives served by an external image proxy
//! - [`Transformer`] - byte-level transform used by [`StoredFilter`]

mod cache;
mod chain;
mod stored;
mod traits;
mod transform;
mod url;

pub use cache::{CacheKey, extension_of};
pub use chain::FilterChain;
pub use stored::StoredFilter;
pub use traits::{Filter, FilterRequest, TransformError};
pub use transform::{Passthrough, Transformer, TransformerSet};
pub use url::UrlFilter;
