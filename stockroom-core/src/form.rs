//! Form and JSON body parsing

use crate::{Error, HttpRequest};
use serde::de::DeserializeOwned;

/// Body encodings the service understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `application/json` (and `+json` suffixes)
    Json,
    /// `application/x-www-form-urlencoded`
    UrlEncoded,
    /// `multipart/form-data`
    Multipart,
    /// Anything else, including a missing Content-Type
    Other,
}

impl BodyKind {
    /// Classify a request by its Content-Type header
    pub fn of(request: &HttpRequest) -> Self {
        match request.media_type().as_deref() {
            Some("application/json") => BodyKind::Json,
            Some(mt) if mt.starts_with("application/") && mt.ends_with("+json") => BodyKind::Json,
            Some("application/x-www-form-urlencoded") => BodyKind::UrlEncoded,
            Some("multipart/form-data") => BodyKind::Multipart,
            _ => BodyKind::Other,
        }
    }
}

/// Parse URL-encoded form data
pub fn parse_form<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_urlencoded::from_bytes(body)
        .map_err(|e| Error::BadRequest(format!("Failed to parse form data: {}", e)))
}

impl HttpRequest {
    /// Deserialize the body as JSON or url-encoded fields, chosen by Content-Type.
    ///
    /// Bodies of any other type (or an empty JSON body) deserialize as if no
    /// fields had been sent, so `T` should consist of optional fields.
    pub fn body_fields<T: DeserializeOwned>(&self) -> Result<T, Error> {
        match BodyKind::of(self) {
            BodyKind::Json if !self.body.is_empty() => self
                .json()
                .map_err(|e| Error::BadRequest(format!("Invalid JSON body: {}", e))),
            BodyKind::UrlEncoded => parse_form(&self.body),
            _ => parse_form(b""),
        }
    }
}
