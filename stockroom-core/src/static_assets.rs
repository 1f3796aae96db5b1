//! Serving files from disk.
//!
//! Used for the static form pages and for stored photos. The Content-Type is
//! guessed from the file extension; text types get an explicit UTF-8 charset.

use crate::{Error, HttpResponse};
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Guess the Content-Type header value for a path
pub fn content_type_for(path: &Path) -> String {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() == mime_guess::mime::TEXT {
        format!("{}; charset=utf-8", mime.essence_str())
    } else {
        mime.essence_str().to_string()
    }
}

/// Read a file and return it as a 200 response.
///
/// A missing file becomes `Error::NotFound` carrying `not_found_message`;
/// any other I/O failure is an internal error.
pub async fn serve_file(path: &Path, not_found_message: &str) -> Result<HttpResponse, Error> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "File not found on disk");
            return Err(Error::NotFound(not_found_message.to_string()));
        }
        Err(e) => {
            return Err(Error::Internal(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )));
        }
    };

    debug!(path = %path.display(), size = data.len(), "Serving file");

    Ok(HttpResponse::ok()
        .content_type(content_type_for(path))
        .with_body(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_guessing() {
        assert_eq!(
            content_type_for(Path::new("RegisterForm.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(content_type_for(Path::new("1700000000000.png")), "image/png");
        assert_eq!(content_type_for(Path::new("1700000000000.jpg")), "image/jpeg");
        assert_eq!(
            content_type_for(Path::new("1700000000000")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_serve_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.html");
        std::fs::write(&path, "<form></form>").unwrap();

        let res = serve_file(&path, "Not found").await.unwrap();
        assert_eq!(res.status, 200);
        assert_eq!(res.body, b"<form></form>".to_vec());
    }

    #[tokio::test]
    async fn test_serve_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = serve_file(&dir.path().join("nope.png"), "Not found")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 404);
        assert_eq!(err.public_message(), "Not found");
    }
}
