//! Storage trait and common types.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Result, UploadedFile, extname};

/// Metadata about a stored file.
#[derive(Debug, Clone, Serialize)]
pub struct StorageMetadata {
    /// Key the file is stored under (its file name in the cache directory).
    pub key: String,
    /// Original file name.
    pub original_name: Option<String>,
    /// File size in bytes.
    pub size: u64,
    /// MIME type.
    pub content_type: Option<String>,
    /// When the file was written.
    pub uploaded_at: DateTime<Utc>,
}

impl StorageMetadata {
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            original_name: None,
            size,
            content_type: None,
            uploaded_at: Utc::now(),
        }
    }

    pub fn with_original_name(mut self, name: impl Into<String>) -> Self {
        self.original_name = Some(name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Storage backend trait.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store bytes under a given key, replacing any existing file.
    async fn put(&self, key: &str, data: Bytes) -> Result<StorageMetadata>;

    /// Store an uploaded file under a freshly generated key.
    async fn put_file(&self, file: &UploadedFile) -> Result<StorageMetadata>;

    /// Retrieve file contents.
    async fn get(&self, key: &str) -> Result<Bytes>;
}

/// Key for a new upload: the current Unix time in milliseconds followed by
/// the original extension, e.g. `1700000000000.png`.
///
/// Two uploads in the same millisecond with the same extension get the same
/// key; the later write replaces the earlier file.
pub fn timestamp_key(original_name: Option<&str>) -> String {
    timestamp_key_at(Utc::now(), original_name)
}

/// [`timestamp_key`] for a fixed instant.
pub fn timestamp_key_at(at: DateTime<Utc>, original_name: Option<&str>) -> String {
    let ext = original_name.map(extname).unwrap_or_default();
    format!("{}{}", at.timestamp_millis(), ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_key_keeps_extension() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();

        assert_eq!(timestamp_key_at(at, Some("cat.jpg")), "1700000000123.jpg");
        assert_eq!(timestamp_key_at(at, Some("blob")), "1700000000123");
        assert_eq!(timestamp_key_at(at, None), "1700000000123");
    }

    #[test]
    fn test_timestamp_key_is_numeric_prefix() {
        let key = timestamp_key(Some("a.png"));
        let stem = key.trim_end_matches(".png");
        assert!(stem.parse::<i64>().is_ok());
    }
}
