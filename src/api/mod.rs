//! HTTP API over the media dispatcher
//!
//! | Route | Operation |
//! |-------|-----------|
//! | `POST /media/resolve` | resolve a media, optionally through a filter |
//! | `POST /media/render` | resolve, then render through a template alias |
//! | `POST /media/field` | read a named media field |
//! | `GET /templates/{alias}` | template identifier of an alias |
//! | `GET /metrics` | resolution counters |
//! | `GET /health` | configured kinds and filters |

mod error;
pub mod models;
mod server;
pub mod services;
pub mod state;

pub use error::ApiError;
pub use server::{router, run};
