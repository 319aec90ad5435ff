//! Media entities handed to the dispatcher.
//!
//! - [`FileEntity`] - what the dispatcher needs from any persisted media reference
//! - [`MediaFile`] - the concrete entity used by the API and CLI
//! - [`AccessorTable`] - named field accessors used by the metadata bridge

mod accessors;
mod entity;

pub use accessors::{Accessible, Accessor, AccessorError, AccessorTable, getter_name, read_field};
pub use entity::{FileEntity, MediaFile, Options, derive_id};
