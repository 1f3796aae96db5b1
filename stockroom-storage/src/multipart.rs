//! Multipart form data parsing.

use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use tracing::debug;

use crate::{Result, StorageError, UploadedFile};

/// Re-export multer's Field type.
pub type MultipartField<'a> = multer::Field<'a>;

/// Multipart form data parser.
///
/// ```rust,ignore
/// use stockroom_storage::Multipart;
///
/// let multipart = Multipart::from_body(content_type, body)?;
/// let mut data = multipart.collect_single("photo").await?;
/// let photo = data.take_file("photo");
/// ```
pub struct Multipart {
    inner: multer::Multipart<'static>,
}

impl Multipart {
    /// Create a new multipart parser from a stream and boundary.
    pub fn new<S>(stream: S, boundary: &str) -> Self
    where
        S: Stream<Item = std::result::Result<Bytes, std::io::Error>> + Send + 'static,
    {
        Self {
            inner: multer::Multipart::new(stream, boundary),
        }
    }

    /// Create from a Content-Type header value and a body stream.
    pub fn from_request<S>(content_type: &str, body: S) -> Result<Self>
    where
        S: Stream<Item = std::result::Result<Bytes, std::io::Error>> + Send + 'static,
    {
        let boundary = multer::parse_boundary(content_type)
            .map_err(|e| StorageError::Multipart(e.to_string()))?;

        Ok(Self::new(body, &boundary))
    }

    /// Create from a body that has already been read into memory.
    pub fn from_body(content_type: &str, body: impl Into<Bytes>) -> Result<Self> {
        let body = body.into();
        let stream = futures::stream::once(async move { Ok::<Bytes, std::io::Error>(body) });
        Self::from_request(content_type, stream)
    }

    /// Get the next field from the multipart stream.
    pub async fn next_field(&mut self) -> Result<Option<multer::Field<'static>>> {
        self.inner.next_field().await.map_err(StorageError::from)
    }

    /// Collect text fields plus at most one file under `file_field`.
    ///
    /// A file sent under any other name, or a second file under `file_field`,
    /// fails with [`StorageError::UnexpectedField`]. A blank `file_field`
    /// input (no name, no data) counts as no file at all. Repeated text
    /// fields keep the last value.
    pub async fn collect_single(mut self, file_field: &str) -> Result<MultipartData> {
        let mut data = MultipartData::new();

        while let Some(field) = self.next_field().await? {
            let Some(name) = field.name().map(String::from) else {
                continue;
            };

            if field.file_name().is_some() {
                if name != file_field || data.files.contains_key(&name) {
                    debug!(field = %name, "Rejecting file under unexpected field");
                    return Err(StorageError::UnexpectedField(name));
                }
                let file = UploadedFile::from_field(field).await?;
                if !file.is_blank() {
                    data.files.insert(name, file);
                }
            } else {
                let text = field.text().await.map_err(StorageError::from)?;
                data.fields.insert(name, text);
            }
        }

        Ok(data)
    }
}

/// Collected multipart data.
#[derive(Debug, Default)]
pub struct MultipartData {
    /// Form fields (non-file fields).
    pub fields: HashMap<String, String>,
    /// Uploaded files.
    pub files: HashMap<String, UploadedFile>,
}

impl MultipartData {
    /// Create empty multipart data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a form field value.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Take an uploaded file (removes it from the collection).
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// Check if there are any files.
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CT: &str = "multipart/form-data; boundary=XBOUNDARY";

    fn body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, filename, content) in parts {
            out.extend_from_slice(b"--XBOUNDARY\r\n");
            match filename {
                Some(f) => out.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                        name, f
                    )
                    .as_bytes(),
                ),
                None => out.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                ),
            }
            out.extend_from_slice(content);
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(b"--XBOUNDARY--\r\n");
        out
    }

    #[tokio::test]
    async fn test_collect_fields_and_binary_file() {
        let payload: &[u8] = &[0x89, b'P', b'N', b'G', 0x00, 0xff, 0xfe];
        let raw = body(&[
            ("inventory_name", None, b"Widget"),
            ("description", None, b"A widget"),
            ("photo", Some("widget.png"), payload),
        ]);

        let mut data = Multipart::from_body(CT, raw)
            .unwrap()
            .collect_single("photo")
            .await
            .unwrap();

        assert_eq!(data.field("inventory_name"), Some("Widget"));
        assert_eq!(data.field("description"), Some("A widget"));
        let photo = data.take_file("photo").unwrap();
        assert_eq!(photo.data.as_ref(), payload);
        assert_eq!(photo.extension(), ".png");
        assert!(!data.has_files());
    }

    #[tokio::test]
    async fn test_second_photo_is_rejected() {
        let raw = body(&[
            ("photo", Some("a.png"), b"a"),
            ("photo", Some("b.png"), b"b"),
        ]);

        let err = Multipart::from_body(CT, raw)
            .unwrap()
            .collect_single("photo")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::UnexpectedField(ref f) if f == "photo"));
    }

    #[tokio::test]
    async fn test_file_under_other_field_is_rejected() {
        let raw = body(&[
            ("inventory_name", None, b"Bolt"),
            ("attachment", Some("notes.txt"), b"unexpected"),
        ]);

        let err = Multipart::from_body(CT, raw)
            .unwrap()
            .collect_single("photo")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::UnexpectedField(ref f) if f == "attachment"));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_blank_file_input_is_no_file() {
        let raw = body(&[("photo", Some(""), b"")]);

        let data = Multipart::from_body(CT, raw)
            .unwrap()
            .collect_single("photo")
            .await
            .unwrap();

        assert!(!data.has_files());
    }

    #[test]
    fn test_missing_boundary() {
        let result = Multipart::from_body("multipart/form-data", Vec::new());
        assert!(matches!(result, Err(StorageError::Multipart(_))));
    }

    #[tokio::test]
    async fn test_truncated_body_is_multipart_error() {
        let raw = b"--XBOUNDARY\r\nContent-Disposition: form-data; name=\"x\"\r\n\r\nabc".to_vec();

        let err = Multipart::from_body(CT, raw)
            .unwrap()
            .collect_single("photo")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
    }
}
