use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use uuid::Uuid;

use super::accessors::{Accessible, AccessorTable};

/// Open option bag forwarded untouched to filters and renderers
pub type Options = BTreeMap<String, Value>;

/// A persisted media reference the dispatcher can resolve.
///
/// `path` is resolution output, never part of the entity's identity.
pub trait FileEntity: Send + Sync {
    fn id(&self) -> &str;

    /// Kind used to pick the owning storage handler
    fn kind(&self) -> &str;

    /// Key of the original content inside its storage backend
    fn storage_key(&self) -> &str;

    fn path(&self) -> Option<&str>;

    fn set_path(&mut self, path: String);
}

/// Concrete media entity used by the HTTP API and the CLI.
///
/// Without an explicit `id`, the id is derived from `kind` and
/// `storage_key`, so the same original always carries the same identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MediaFileRecord")]
pub struct MediaFile {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub storage_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Stable id of the original stored under `storage_key` for `kind`
pub fn derive_id(kind: &str, storage_key: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    for part in [kind, storage_key] {
        hasher.update(&(part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hasher.finalize().as_bytes()[..16]);
    Uuid::from_bytes(bytes).to_string()
}

/// Wire form of [`MediaFile`]; fills in the derived id and timestamp
#[derive(Deserialize)]
struct MediaFileRecord {
    #[serde(default)]
    id: Option<String>,
    kind: String,
    name: String,
    storage_key: String,
    #[serde(default)]
    content_type: Option<String>,
    #[serde(default)]
    size: u64,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default)]
    metadata: BTreeMap<String, Value>,
    #[serde(default)]
    path: Option<String>,
}

impl From<MediaFileRecord> for MediaFile {
    fn from(record: MediaFileRecord) -> Self {
        let id = record
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| derive_id(&record.kind, &record.storage_key));

        Self {
            id,
            kind: record.kind,
            name: record.name,
            storage_key: record.storage_key,
            content_type: record.content_type,
            size: record.size,
            created_at: record.created_at,
            metadata: record.metadata,
            path: record.path,
        }
    }
}

impl MediaFile {
    pub fn new(
        kind: impl Into<String>,
        name: impl Into<String>,
        storage_key: impl Into<String>,
    ) -> Self {
        let kind = kind.into();
        let storage_key = storage_key.into();

        Self {
            id: derive_id(&kind, &storage_key),
            kind,
            name: name.into(),
            storage_key,
            content_type: None,
            size: 0,
            created_at: Utc::now(),
            metadata: BTreeMap::new(),
            path: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }
}

impl FileEntity for MediaFile {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn set_path(&mut self, path: String) {
        self.path = Some(path);
    }
}

static MEDIA_FILE_ACCESSORS: LazyLock<AccessorTable<MediaFile>> = LazyLock::new(|| {
    AccessorTable::<MediaFile>::new()
        .with("id", |f| json!(f.id))
        .with("kind", |f| json!(f.kind))
        .with("name", |f| json!(f.name))
        .with("storage_key", |f| json!(f.storage_key))
        .with("content_type", |f| json!(f.content_type))
        .with("size", |f| json!(f.size))
        .with("created_at", |f| json!(f.created_at))
        .with("metadata", |f| json!(f.metadata))
        .with("path", |f| json!(f.path))
});

impl Accessible for MediaFile {
    fn accessors() -> &'static AccessorTable<Self> {
        &MEDIA_FILE_ACCESSORS
    }
}
