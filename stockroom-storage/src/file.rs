//! Uploaded file types.

use bytes::Bytes;
use mime::Mime;

use crate::{Result, StorageError};

/// Information about an uploaded file.
#[derive(Debug, Clone, Default)]
pub struct FileInfo {
    /// Name the client sent for the file.
    pub name: Option<String>,
    /// Extension including the leading dot (`.png`), empty if none.
    pub extension: String,
    /// MIME type the client declared.
    pub content_type: Option<Mime>,
    /// File size in bytes.
    pub size: u64,
}

/// An uploaded file with its data.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File information.
    pub info: FileInfo,
    /// File data.
    pub data: Bytes,
}

impl UploadedFile {
    /// Create from a multipart field.
    pub async fn from_field(field: crate::MultipartField<'_>) -> Result<Self> {
        let name = field.file_name().map(String::from);
        let content_type = field.content_type().cloned();
        let data = field.bytes().await.map_err(StorageError::from)?;

        Ok(Self {
            info: FileInfo {
                extension: name.as_deref().map(extname).unwrap_or_default(),
                size: data.len() as u64,
                name,
                content_type,
            },
            data,
        })
    }

    /// Create from raw bytes with a name; the MIME type is guessed from the name.
    pub fn from_bytes(data: impl Into<Bytes>, name: impl Into<String>) -> Self {
        let data = data.into();
        let name = name.into();

        Self {
            info: FileInfo {
                extension: extname(&name),
                content_type: mime_guess::from_path(&name).first(),
                size: data.len() as u64,
                name: Some(name),
            },
            data,
        }
    }

    /// Get the file name.
    pub fn name(&self) -> Option<&str> {
        self.info.name.as_deref()
    }

    /// Get the file extension, dot included.
    pub fn extension(&self) -> &str {
        &self.info.extension
    }

    /// Get the content type as a string.
    pub fn content_type_str(&self) -> Option<String> {
        self.info.content_type.as_ref().map(|ct| ct.to_string())
    }

    /// Get the file size.
    pub fn size(&self) -> u64 {
        self.info.size
    }

    /// Check if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// A file input left blank by the browser: empty name and no data.
    pub fn is_blank(&self) -> bool {
        self.name().is_none_or(str::is_empty) && self.is_empty()
    }
}

/// Extension of the last path segment, leading dot included.
///
/// `photo.jpeg` gives `.jpeg`, `archive.tar.gz` gives `.gz`. Names without a
/// dot, or whose only dot is the first character (`.profile`), give an empty
/// string. A trailing dot (`shot.`) gives `.`.
pub fn extname(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    if base == ".." {
        return String::new();
    }
    match base.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) => base[idx..].to_string(),
    }
}
