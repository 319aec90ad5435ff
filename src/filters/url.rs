use async_trait::async_trait;

use super::cache::CacheKey;
use super::traits::{Filter, FilterRequest, TransformError};
use crate::handlers::join_url;

/// Filter whose derivatives are produced on demand by an external image
/// proxy. Only the deterministic proxy URL is computed here:
/// `{base_url}/{alias}/{digest}/{source path}`.
#[derive(Debug, Clone)]
pub struct UrlFilter {
    base_url: String,
}

impl UrlFilter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Source URI without scheme, and without host for http(s)
fn source_path(uri: &str) -> &str {
    let path = match uri.split_once("://") {
        Some(("http" | "https", rest)) => rest.find('/').map_or("", |i| &rest[i..]),
        Some((_, rest)) => rest,
        None => uri,
    };
    path.trim_start_matches('/')
}

#[async_trait]
impl Filter for UrlFilter {
    fn name(&self) -> &str {
        "url"
    }

    async fn handle(&self, request: FilterRequest<'_>) -> Result<String, TransformError> {
        let key = CacheKey::for_request(&request);
        let prefix = join_url(&join_url(&self.base_url, request.alias), key.digest());

        let path = match source_path(request.source_uri) {
            "" => prefix,
            source => join_url(&prefix, source),
        };

        tracing::debug!(alias = request.alias, %path, "Computed proxy path");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaFile, Options};

    #[test]
    fn test_source_path() {
        assert_eq!(source_path("/uploads/a.jpg"), "uploads/a.jpg");
        assert_eq!(source_path("https://cdn.example.com/uploads/a.jpg"), "uploads/a.jpg");
        assert_eq!(source_path("https://cdn.example.com"), "");
        assert_eq!(source_path("s3://bucket/a.jpg"), "bucket/a.jpg");
    }

    #[tokio::test]
    async fn test_handle_is_deterministic() {
        let filter = UrlFilter::new("/media/cache/");
        let file = MediaFile::new("image", "a.jpg", "a.jpg");
        let options = Options::new();
        let request = FilterRequest {
            alias: "thumb",
            entity: &file,
            source_uri: "/uploads/a.jpg",
            options: &options,
        };

        let first = filter.handle(request).await.unwrap();
        let second = filter.handle(request).await.unwrap();
        let digest = CacheKey::for_request(&request);

        assert_eq!(first, second);
        assert_eq!(
            first,
            format!("/media/cache/thumb/{}/uploads/a.jpg", digest.digest())
        );
    }
}
