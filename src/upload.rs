//! Registration body handling.
//!
//! Multipart bodies may carry one file under `photo`; it is written to the
//! cache before the text fields are looked at, so a photo sent with an
//! invalid form still lands on disk. Url-encoded and JSON bodies are accepted
//! too, without a photo.

use crate::item::{FieldValue, RegisterForm};
use stockroom_core::{BodyKind, Error, HttpRequest};
use stockroom_storage::{Multipart, Storage};
use tracing::debug;

/// Form field that carries the photo
pub const PHOTO_FIELD: &str = "photo";

/// Text fields of a registration plus the stored photo's key, if any
#[derive(Debug, Default)]
pub struct Submission {
    pub form: RegisterForm,
    pub photo: Option<String>,
}

/// Parse a registration request, storing its photo when present
pub async fn accept_upload(request: HttpRequest, storage: &dyn Storage) -> Result<Submission, Error> {
    if BodyKind::of(&request) != BodyKind::Multipart {
        return Ok(Submission {
            form: request.body_fields()?,
            photo: None,
        });
    }

    let content_type = request.content_type().unwrap_or_default().to_string();
    let mut data = Multipart::from_body(&content_type, request.body)?
        .collect_single(PHOTO_FIELD)
        .await?;

    let photo = match data.take_file(PHOTO_FIELD) {
        Some(file) => {
            let metadata = storage.put_file(&file).await?;
            debug!(
                key = %metadata.key,
                original = ?metadata.original_name,
                size = metadata.size,
                "Stored photo"
            );
            Some(metadata.key)
        }
        None => None,
    };

    Ok(Submission {
        form: RegisterForm {
            inventory_name: data.fields.remove("inventory_name").map(FieldValue::from),
            description: data.fields.remove("description").map(FieldValue::from),
        },
        photo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_storage::LocalStorage;

    fn request(content_type: &str, body: &[u8]) -> HttpRequest {
        let mut req = HttpRequest::new("POST".to_string(), "/register".to_string());
        req.headers
            .insert("content-type".to_string(), content_type.to_string());
        req.body = body.to_vec();
        req
    }

    #[tokio::test]
    async fn test_multipart_with_photo() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let body = b"--B\r\nContent-Disposition: form-data; name=\"inventory_name\"\r\n\r\nLamp\r\n\
--B\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"lamp.gif\"\r\nContent-Type: image/gif\r\n\r\nGIF89a\r\n\
--B--\r\n";
        let submission = accept_upload(request("multipart/form-data; boundary=B", body), &storage)
            .await
            .unwrap();

        assert_eq!(submission.form.name().as_deref(), Some("Lamp"));
        assert!(submission.form.description().is_none());

        let key = submission.photo.unwrap();
        assert!(key.ends_with(".gif"));
        assert_eq!(std::fs::read(dir.path().join(&key)).unwrap(), b"GIF89a");
    }

    #[tokio::test]
    async fn test_urlencoded_has_no_photo() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let submission = accept_upload(
            request(
                "application/x-www-form-urlencoded",
                b"inventory_name=Bolt&description=M8",
            ),
            &storage,
        )
        .await
        .unwrap();

        assert_eq!(submission.form.name().as_deref(), Some("Bolt"));
        assert_eq!(submission.form.description().as_deref(), Some("M8"));
        assert!(submission.photo.is_none());
    }

    #[tokio::test]
    async fn test_missing_boundary_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let err = accept_upload(request("multipart/form-data", b""), &storage)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
