use super::local::join_url;
use super::traits::StorageHandler;
use crate::media::FileEntity;

/// Media stored in an object storage bucket
///
/// With an endpoint the URI is `{endpoint}/{bucket}/{key}`, otherwise
/// `s3://{bucket}/{key}`.
#[derive(Debug, Clone)]
pub struct BucketHandler {
    bucket: String,
    endpoint: Option<String>,
}

impl BucketHandler {
    pub fn new(bucket: impl Into<String>, endpoint: Option<String>) -> Self {
        Self {
            bucket: bucket.into(),
            endpoint,
        }
    }
}

impl StorageHandler for BucketHandler {
    fn name(&self) -> &str {
        "bucket"
    }

    fn uri(&self, entity: &dyn FileEntity) -> String {
        let key = entity.storage_key().trim_start_matches('/');
        match &self.endpoint {
            Some(endpoint) => join_url(&join_url(endpoint, &self.bucket), key),
            None => format!("s3://{}/{}", self.bucket, key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaFile;

    #[test]
    fn test_bucket_uri_without_endpoint() {
        let handler = BucketHandler::new("media-docs", None);
        let file = MediaFile::new("document", "report.pdf", "docs/report.pdf");
        assert_eq!(handler.uri(&file), "s3://media-docs/docs/report.pdf");
    }

    #[test]
    fn test_bucket_uri_with_endpoint() {
        let handler =
            BucketHandler::new("media-docs", Some("https://cdn.example.com/".to_string()));
        let file = MediaFile::new("document", "report.pdf", "/docs/report.pdf");
        assert_eq!(
            handler.uri(&file),
            "https://cdn.example.com/media-docs/docs/report.pdf"
        );
    }
}
