use super::traits::StorageHandler;
use crate::media::FileEntity;

/// Media served from a local upload directory behind `base_url`
#[derive(Debug, Clone)]
pub struct LocalHandler {
    base_url: String,
}

impl LocalHandler {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl StorageHandler for LocalHandler {
    fn name(&self) -> &str {
        "local"
    }

    fn uri(&self, entity: &dyn FileEntity) -> String {
        join_url(&self.base_url, entity.storage_key())
    }
}

/// Join a base and a key with exactly one `/` between them
pub(crate) fn join_url(base: &str, key: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaFile;

    #[test]
    fn test_local_uri() {
        let handler = LocalHandler::new("/uploads");
        let file = MediaFile::new("image", "cat.jpg", "images/cat.jpg");
        assert_eq!(handler.uri(&file), "/uploads/images/cat.jpg");
    }

    #[test]
    fn test_local_uri_normalizes_slashes() {
        let handler = LocalHandler::new("https://media.example.com/uploads/");
        let file = MediaFile::new("image", "cat.jpg", "/images/cat.jpg");
        assert_eq!(
            handler.uri(&file),
            "https://media.example.com/uploads/images/cat.jpg"
        );
    }
}
