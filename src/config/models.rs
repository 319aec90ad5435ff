use crate::humanize::ByteSize;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    /// Storage handler per media kind
    #[serde(default)]
    pub handlers: HashMap<String, HandlerConfig>,
    /// Filters by alias
    #[serde(default)]
    pub filters: HashMap<String, FilterConfig>,
    /// Template alias table; must contain `default`
    #[serde(default)]
    pub templates: BTreeMap<String, String>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default)]
    pub api: ApiLimits,
}

/// API request limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiLimits {
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: ByteSize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            api: ApiLimits::default(),
        }
    }
}

impl Default for ApiLimits {
    fn default() -> Self {
        Self {
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_max_payload_bytes() -> ByteSize {
    ByteSize::kib(256)
}

/// Storage provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    #[default]
    Local,
    Memory,
}

/// Object storage holding originals and cached derivatives
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub provider: StorageProvider,
    /// Root directory for the local provider
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProvider::Local,
            root: default_storage_root(),
        }
    }
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("data/media")
}

/// Filter cache layout
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Key prefix of cached derivatives inside the storage
    #[serde(default = "default_cache_prefix")]
    pub prefix: String,
    /// Public URL the cache prefix is served under
    #[serde(default = "default_cache_base_url")]
    pub base_url: String,
    /// Largest original a stored filter will read
    #[serde(default = "default_max_source_bytes")]
    pub max_source_bytes: ByteSize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            prefix: default_cache_prefix(),
            base_url: default_cache_base_url(),
            max_source_bytes: default_max_source_bytes(),
        }
    }
}

fn default_cache_prefix() -> String {
    "cache".to_string()
}

fn default_cache_base_url() -> String {
    "/media/cache".to_string()
}

fn default_max_source_bytes() -> ByteSize {
    ByteSize::mib(50)
}

/// Storage handler backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerBackend {
    Local,
    Bucket,
}

/// Storage handler for one media kind
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HandlerConfig {
    pub backend: HandlerBackend,
    /// Public URL of the upload directory (local backend)
    pub base_url: Option<String>,
    /// Bucket name (bucket backend)
    pub bucket: Option<String>,
    /// Optional HTTP endpoint in front of the bucket
    pub endpoint: Option<String>,
}

/// Filter backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterBackend {
    Stored,
    Url,
    /// Alias is known but applies no filter
    Disabled,
}

/// Filter registered under one alias
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    pub backend: FilterBackend,
    /// Transformer name (stored backend)
    #[serde(default = "default_transformer")]
    pub transformer: String,
    /// Image proxy URL (url backend)
    pub base_url: Option<String>,
}

fn default_transformer() -> String {
    "passthrough".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            cache: CacheConfig::default(),
            handlers: HashMap::new(),
            filters: HashMap::new(),
            templates: BTreeMap::new(),
        };

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.server.api.max_payload_bytes.as_u64(), 256 * 1024);
        assert_eq!(config.storage.provider, StorageProvider::Local);
        assert_eq!(config.cache.prefix, "cache");
        assert_eq!(config.cache.max_source_bytes, ByteSize::mib(50));
    }

    #[test]
    fn test_filter_defaults_to_passthrough() {
        let filter: FilterConfig = toml::from_str(r#"backend = "stored""#).unwrap();
        assert_eq!(filter.backend, FilterBackend::Stored);
        assert_eq!(filter.transformer, "passthrough");
        assert!(filter.base_url.is_none());
    }
}
