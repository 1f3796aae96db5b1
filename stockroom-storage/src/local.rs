//! Local filesystem storage backend.

use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::{Result, Storage, StorageError, StorageMetadata, UploadedFile, timestamp_key};

/// Stores files flat inside one directory (the photo cache).
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Open storage rooted at `base_path`, creating the directory and any
    /// missing parents.
    ///
    /// Fails if the directory cannot be created; callers treat that as fatal
    /// at startup.
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::Storage(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        info!(path = %base_path.display(), "Initialized local storage");

        Ok(Self { base_path })
    }

    /// Directory files are stored in.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Full filesystem path for a key.
    pub fn full_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }

    fn checked_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\', '\0']) {
            return Err(StorageError::InvalidFileName(key.to_string()));
        }
        Ok(self.full_path(key))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(&self, key: &str, data: Bytes) -> Result<StorageMetadata> {
        let path = self.checked_path(key)?;

        fs::write(&path, &data).await?;

        debug!(key = %key, path = %path.display(), size = data.len(), "Stored file");

        Ok(StorageMetadata::new(key, data.len() as u64))
    }

    async fn put_file(&self, file: &UploadedFile) -> Result<StorageMetadata> {
        let key = timestamp_key(file.name());
        let mut metadata = self.put(&key, file.data.clone()).await?;

        if let Some(name) = file.name() {
            metadata = metadata.with_original_name(name);
        }
        if let Some(content_type) = file.content_type_str() {
            metadata = metadata.with_content_type(content_type);
        }

        Ok(metadata)
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        let path = self.checked_path(key)?;

        match fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_storage() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(temp_dir.path()).await.unwrap();

        let data = Bytes::from("Hello, World!");
        let metadata = storage.put("test.txt", data.clone()).await.unwrap();
        assert_eq!(metadata.key, "test.txt");
        assert_eq!(metadata.size, 13);

        assert_eq!(storage.get("test.txt").await.unwrap(), data);
        assert!(temp_dir.path().join("test.txt").is_file());
    }

    #[tokio::test]
    async fn test_creates_nested_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("cache");

        let storage = LocalStorage::new(&nested).await.unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.base_path(), nested.as_path());
    }

    #[tokio::test]
    async fn test_uncreatable_directory_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, b"not a dir").unwrap();

        let result = LocalStorage::new(blocker.join("cache")).await;
        assert!(matches!(result, Err(StorageError::Storage(_))));
    }

    #[tokio::test]
    async fn test_put_file_uses_timestamp_key() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(temp_dir.path()).await.unwrap();

        let file = UploadedFile::from_bytes(&b"jpegdata"[..], "holiday.jpg");
        let metadata = storage.put_file(&file).await.unwrap();

        assert!(metadata.key.ends_with(".jpg"));
        assert_eq!(metadata.original_name.as_deref(), Some("holiday.jpg"));
        assert_eq!(metadata.content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(
            std::fs::read(storage.full_path(&metadata.key)).unwrap(),
            b"jpegdata"
        );
    }

    #[tokio::test]
    async fn test_missing_and_invalid_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(temp_dir.path()).await.unwrap();

        assert!(storage.get("gone.png").await.unwrap_err().is_not_found());
        assert!(matches!(
            storage.get("../escape").await,
            Err(StorageError::InvalidFileName(_))
        ));
    }
}
