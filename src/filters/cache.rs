//! Deterministic cache keys for filter derivatives

use super::traits::FilterRequest;

/// Hex digits kept from the blake3 digest
const DIGEST_LEN: usize = 32;

/// Content-independent identity of one derivative
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    digest: String,
}

impl CacheKey {
    /// Digest of (alias, entity id, storage key, options).
    ///
    /// Every field is length-prefixed so adjacent values cannot collide, and
    /// options hash as name and JSON text pairs in name order.
    pub fn for_request(request: &FilterRequest<'_>) -> Self {
        let mut hasher = blake3::Hasher::new();

        for part in [
            request.alias,
            request.entity.id(),
            request.entity.storage_key(),
        ] {
            hasher.update(&(part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }

        // BTreeMap iterates in key order
        hasher.update(&(request.options.len() as u64).to_le_bytes());
        for (name, value) in request.options {
            let value = value.to_string();
            for part in [name.as_str(), value.as_str()] {
                hasher.update(&(part.len() as u64).to_le_bytes());
                hasher.update(part.as_bytes());
            }
        }

        let mut digest = hasher.finalize().to_hex().to_string();
        digest.truncate(DIGEST_LEN);
        Self { digest }
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// `{alias}/{digest[..2]}/{digest}{.ext}`, sharded to keep directories small
    pub fn relative_path(&self, alias: &str, extension: Option<&str>) -> String {
        let mut path = format!("{}/{}/{}", alias, &self.digest[..2], self.digest);
        if let Some(ext) = extension.filter(|ext| !ext.is_empty()) {
            path.push('.');
            path.push_str(ext);
        }
        path
    }
}

/// Extension of the last path segment of `key`, if any
pub fn extension_of(key: &str) -> Option<&str> {
    let name = key.rsplit('/').next()?;
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}
