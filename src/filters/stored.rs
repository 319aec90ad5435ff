use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

use super::cache::{CacheKey, extension_of};
use super::traits::{Filter, FilterRequest, TransformError};
use super::transform::Transformer;
use crate::handlers::join_url;
use crate::humanize::ByteSize;
use crate::storage::StorageClient;

/// Filter materializing derivatives in object storage.
///
/// The original is read by the entity's storage key, run through the
/// transformer and written to `{cache_prefix}/{alias}/{shard}/{digest}.{ext}`.
/// The returned path is the same relative location under `base_url`. An
/// artifact already present is served without recomputation. Writes are
/// single object_store puts, so concurrent requests for one key resolve to
/// the last complete write.
#[derive(Debug, Clone)]
pub struct StoredFilter {
    storage: StorageClient,
    transformer: Arc<dyn Transformer>,
    cache_prefix: String,
    base_url: String,
    max_source_bytes: ByteSize,
}

impl StoredFilter {
    pub fn new(
        storage: StorageClient,
        transformer: Arc<dyn Transformer>,
        cache_prefix: impl Into<String>,
        base_url: impl Into<String>,
        max_source_bytes: ByteSize,
    ) -> Self {
        Self {
            storage,
            transformer,
            cache_prefix: cache_prefix.into(),
            base_url: base_url.into(),
            max_source_bytes,
        }
    }

    async fn render(&self, request: &FilterRequest<'_>, cache_key: &str) -> Result<(), TransformError> {
        let source_key = request.entity.storage_key();

        let size = self
            .storage
            .size(source_key)
            .await
            .map_err(|source| TransformError::SourceUnavailable {
                key: source_key.to_string(),
                source,
            })?;

        if size > self.max_source_bytes.as_u64() {
            return Err(TransformError::SourceTooLarge {
                key: source_key.to_string(),
                size,
                limit: self.max_source_bytes.as_u64(),
            });
        }

        let source: Bytes = self.storage.download(source_key).await.map_err(|source| {
            TransformError::SourceUnavailable {
                key: source_key.to_string(),
                source,
            }
        })?;

        let output = self.transformer.transform(source, request.options)?;

        self.storage
            .upload(cache_key, output)
            .await
            .map_err(|source| TransformError::CacheWrite {
                key: cache_key.to_string(),
                source,
            })?;

        Ok(())
    }
}

#[async_trait]
impl Filter for StoredFilter {
    fn name(&self) -> &str {
        "stored"
    }

    async fn handle(&self, request: FilterRequest<'_>) -> Result<String, TransformError> {
        let key = CacheKey::for_request(&request);
        let extension = self
            .transformer
            .output_extension(request.options)
            .or_else(|| extension_of(request.entity.storage_key()).map(str::to_string));

        let relative = key.relative_path(request.alias, extension.as_deref());
        let cache_key = join_url(&self.cache_prefix, &relative);
        let path = join_url(&self.base_url, &relative);

        let cached = self
            .storage
            .exists(&cache_key)
            .await
            .map_err(|source| TransformError::CacheLookup {
                key: cache_key.clone(),
                source,
            })?;

        if cached {
            tracing::debug!(alias = request.alias, %cache_key, "Filter cache hit");
        } else {
            self.render(&request, &cache_key).await?;
            tracing::info!(
                alias = request.alias,
                entity = request.entity.id(),
                %cache_key,
                "Filter derivative cached"
            );
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Passthrough;
    use crate::media::{MediaFile, Options};
    use crate::storage::StorageError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct Uppercase {
        calls: AtomicUsize,
    }

    impl Transformer for Uppercase {
        fn transform(&self, source: Bytes, _options: &Options) -> Result<Bytes, TransformError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Bytes::from(source.to_ascii_uppercase()))
        }

        fn output_extension(&self, options: &Options) -> Option<String> {
            options
                .get("format")
                .and_then(|v| v.as_str())
                .map(str::to_string)
        }
    }

    async fn storage_with(key: &str, data: &'static [u8]) -> StorageClient {
        let storage = StorageClient::in_memory();
        storage.upload(key, Bytes::from_static(data)).await.unwrap();
        storage
    }

    fn request<'a>(file: &'a MediaFile, options: &'a Options) -> FilterRequest<'a> {
        FilterRequest {
            alias: "thumb",
            entity: file,
            source_uri: "/uploads/media/a.txt",
            options,
        }
    }

    #[tokio::test]
    async fn test_handle_writes_artifact() {
        let storage = storage_with("media/a.txt", b"hello").await;
        let transformer = Arc::new(Uppercase::default());
        let filter = StoredFilter::new(
            storage.clone(),
            transformer.clone(),
            "cache",
            "/media/cache",
            ByteSize::kib(1),
        );
        let file = MediaFile::new("image", "a.txt", "media/a.txt");
        let options = Options::new();

        let path = filter.handle(request(&file, &options)).await.unwrap();

        let digest = CacheKey::for_request(&request(&file, &options));
        let relative = digest.relative_path("thumb", Some("txt"));
        assert_eq!(path, format!("/media/cache/{}", relative));

        let artifact = storage.download(&format!("cache/{}", relative)).await.unwrap();
        assert_eq!(artifact, Bytes::from_static(b"HELLO"));
        assert_eq!(transformer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_second_handle_is_cache_hit() {
        let storage = storage_with("media/a.txt", b"hello").await;
        let transformer = Arc::new(Uppercase::default());
        let filter = StoredFilter::new(storage, transformer.clone(), "cache", "/c", ByteSize::kib(1));
        let file = MediaFile::new("image", "a.txt", "media/a.txt");
        let options = Options::new();

        let first = filter.handle(request(&file, &options)).await.unwrap();
        let second = filter.handle(request(&file, &options)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(transformer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_output_extension_from_transformer() {
        let storage = storage_with("media/a.txt", b"hello").await;
        let filter = StoredFilter::new(
            storage,
            Arc::new(Uppercase::default()),
            "cache",
            "/c",
            ByteSize::kib(1),
        );
        let file = MediaFile::new("image", "a.txt", "media/a.txt");
        let options: Options = [("format".to_string(), serde_json::json!("webp"))].into();

        let path = filter.handle(request(&file, &options)).await.unwrap();
        assert!(path.ends_with(".webp"), "unexpected path {}", path);
    }

    #[tokio::test]
    async fn test_missing_source() {
        let filter = StoredFilter::new(
            StorageClient::in_memory(),
            Arc::new(Passthrough),
            "cache",
            "/c",
            ByteSize::kib(1),
        );
        let file = MediaFile::new("image", "a.txt", "media/a.txt");
        let options = Options::new();

        let result = filter.handle(request(&file, &options)).await;
        assert!(matches!(
            result,
            Err(TransformError::SourceUnavailable {
                source: StorageError::NotFound(_),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_source_too_large() {
        let storage = storage_with("media/a.txt", b"0123456789").await;
        let filter = StoredFilter::new(
            storage.clone(),
            Arc::new(Passthrough),
            "cache",
            "/c",
            ByteSize(4),
        );
        let file = MediaFile::new("image", "a.txt", "media/a.txt");
        let options = Options::new();

        let result = filter.handle(request(&file, &options)).await;
        match result {
            Err(TransformError::SourceTooLarge { size, limit, .. }) => {
                assert_eq!(size, 10);
                assert_eq!(limit, 4);
            }
            other => panic!("expected SourceTooLarge, got {:?}", other),
        }
    }
}
