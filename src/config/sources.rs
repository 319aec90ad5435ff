use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "MEDIABOX_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/mediabox.toml";
const ENV_PREFIX: &str = "MEDIABOX";
const ENV_SEPARATOR: &str = "__";

/// Path of the configuration file: `MEDIABOX_CONFIG` or the default location
pub fn config_path() -> PathBuf {
    env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load() -> Result<Config, ConfigError> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    load_from_sources(config_path())
}

/// Load configuration from a specific path and environment
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // MEDIABOX__SERVER__BIND_ADDR -> server.bind_addr
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    builder.build()?.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FilterBackend, HandlerBackend, StorageProvider};
    use crate::humanize::ByteSize;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8080");
        assert!(config.handlers.is_empty());
        assert!(config.templates.is_empty());
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
bind_addr = "127.0.0.1:9000"

[server.api]
max_payload_bytes = "1MB"

[storage]
provider = "memory"

[cache]
max_source_bytes = "20MB"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.server.api.max_payload_bytes, ByteSize::mib(1));
        assert_eq!(config.storage.provider, StorageProvider::Memory);
        assert_eq!(config.cache.max_source_bytes, ByteSize::mib(20));
        assert_eq!(config.cache.prefix, "cache");
    }

    // Environment overrides are not exercised here: env::set_var is unsafe
    // in edition 2024 and races with parallel tests.

    #[test]
    fn test_complex_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[storage]
provider = "local"
root = "data/media"

[cache]
prefix = "derivatives"
base_url = "https://media.example.com/cache"

[handlers.image]
backend = "local"
base_url = "/uploads"

[handlers.document]
backend = "bucket"
bucket = "media-docs"
endpoint = "https://cdn.example.com"

[filters.thumb]
backend = "stored"
transformer = "passthrough"

[filters.preview]
backend = "url"
base_url = "https://img.example.com"

[filters.original]
backend = "disabled"

[templates]
default = "templates/full.html"
thumb = "templates/thumb.html"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();

        assert_eq!(config.handlers.len(), 2);
        assert_eq!(config.handlers["image"].backend, HandlerBackend::Local);
        assert_eq!(config.handlers["document"].bucket.as_deref(), Some("media-docs"));

        assert_eq!(config.filters.len(), 3);
        assert_eq!(config.filters["thumb"].backend, FilterBackend::Stored);
        assert_eq!(config.filters["preview"].backend, FilterBackend::Url);
        assert_eq!(config.filters["original"].backend, FilterBackend::Disabled);

        assert_eq!(config.templates["default"], "templates/full.html");
        assert_eq!(config.templates["thumb"], "templates/thumb.html");
        assert_eq!(config.cache.prefix, "derivatives");
    }
}
