// Test HTTP client

use stockroom_core::{Error, HttpMethod, HttpRequest, HttpResponse, Router};
use std::collections::HashMap;
use std::sync::Arc;

/// Drives a [`Router`] in-process, without sockets
pub struct TestClient {
    router: Arc<Router>,
}

impl TestClient {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(TestRequestBuilder::new(HttpMethod::GET, path)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.send(TestRequestBuilder::new(HttpMethod::DELETE, path))
            .await
    }

    /// POST a url-encoded form
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.send(TestRequestBuilder::new(HttpMethod::POST, path).form(fields))
            .await
    }

    /// PUT a url-encoded form
    pub async fn put_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.send(TestRequestBuilder::new(HttpMethod::PUT, path).form(fields))
            .await
    }

    /// POST a multipart body
    pub async fn post_multipart(&self, path: &str, body: MultipartBody) -> TestResponse {
        self.send(TestRequestBuilder::new(HttpMethod::POST, path).multipart(body))
            .await
    }

    /// Dispatch a built request. Handler errors come back as the error
    /// response the server would send.
    pub async fn send(&self, request: TestRequestBuilder) -> TestResponse {
        TestResponse {
            inner: self.router.dispatch(request.build()).await,
        }
    }
}

/// Builder for test requests
pub struct TestRequestBuilder {
    method: HttpMethod,
    path: String,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl TestRequestBuilder {
    pub fn new(method: HttpMethod, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// Set a raw body
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Set a JSON body
    pub fn json<T: serde::Serialize>(mut self, data: &T) -> Result<Self, Error> {
        self.body = serde_json::to_vec(data).map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(self.header("Content-Type", "application/json"))
    }

    /// Set a url-encoded form body
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        self.body = serde_urlencoded::to_string(fields)
            .unwrap_or_default()
            .into_bytes();
        self.header("Content-Type", "application/x-www-form-urlencoded")
    }

    /// Set a multipart body and its Content-Type
    pub fn multipart(mut self, body: MultipartBody) -> Self {
        let content_type = body.content_type();
        self.body = body.into_bytes();
        self.header("Content-Type", &content_type)
    }

    /// Build the request
    pub fn build(self) -> HttpRequest {
        HttpRequest::from_parts(
            self.method.as_str().to_string(),
            self.path,
            self.headers,
            self.body,
        )
    }
}

/// `multipart/form-data` body builder
pub struct MultipartBody {
    boundary: String,
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: format!("stockroom-{}", uuid::Uuid::new_v4().simple()),
            buf: Vec::new(),
        }
    }

    /// Add a text field
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.open_part(&format!("form-data; name=\"{}\"", name), None);
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    /// Add a file part
    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.open_part(
            &format!("form-data; name=\"{}\"; filename=\"{}\"", name, filename),
            Some(content_type),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    /// Content-Type header value, boundary included
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Finish the body
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.buf
    }

    fn open_part(&mut self, disposition: &str, content_type: Option<&str>) {
        self.buf
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.buf
            .extend_from_slice(format!("Content-Disposition: {}\r\n", disposition).as_bytes());
        if let Some(ct) = content_type {
            self.buf
                .extend_from_slice(format!("Content-Type: {}\r\n", ct).as_bytes());
        }
        self.buf.extend_from_slice(b"\r\n");
    }
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    inner: HttpResponse,
}

impl TestResponse {
    /// Get the status code
    pub fn status(&self) -> u16 {
        self.inner.status
    }

    /// Assert the status code, returning self for chaining
    #[track_caller]
    pub fn assert_status(&self, expected: u16) -> &Self {
        assert_eq!(
            self.inner.status,
            expected,
            "unexpected status, body: {}",
            self.body_string()
        );
        self
    }

    /// Get the response body as a string (lossy)
    pub fn body_string(&self) -> String {
        self.inner.body_text()
    }

    /// Raw body bytes
    pub fn body_bytes(&self) -> &[u8] {
        &self.inner.body
    }

    /// Get the response body as JSON
    pub fn body_json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.inner.body)
    }

    /// Get a header value (case-insensitive)
    pub fn header(&self, key: &str) -> Option<&str> {
        self.inner
            .headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// The underlying response
    pub fn into_inner(self) -> HttpResponse {
        self.inner
    }
}
