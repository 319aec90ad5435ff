//! Request and response bodies of the HTTP API.
//!
//! Media travel as [`MediaFile`] JSON; `id` and `created_at` are filled in
//! when the client omits them:
//!
//! ```json
//! {
//!   "media": {"kind": "image", "name": "cat.jpg", "storage_key": "images/cat.jpg"},
//!   "filter": "thumb",
//!   "options": {"width": 200}
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::media::{MediaFile, Options};

/// `POST /media/resolve`
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveRequest {
    pub media: MediaFile,
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub options: Options,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub media: MediaFile,
    pub filtered: bool,
}

/// `POST /media/render`: resolve with `filter`, then render with `template`
#[derive(Debug, Clone, Deserialize)]
pub struct RenderRequest {
    pub media: MediaFile,
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub options: Options,
}

/// `POST /media/field`; a missing `media` reads as null
#[derive(Debug, Clone, Deserialize)]
pub struct FieldRequest {
    #[serde(default)]
    pub media: Option<MediaFile>,
    pub property: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldResponse {
    pub property: String,
    pub value: Option<Value>,
}

/// `GET /templates/{alias}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateResponse {
    pub alias: String,
    pub template: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub handlers: Vec<String>,
    pub filters: Vec<String>,
    pub version: String,
}
