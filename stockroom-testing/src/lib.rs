//! Testing utilities for stockroom.
//!
//! [`TestClient`] sends requests straight into a [`stockroom_core::Router`],
//! with builders for JSON, url-encoded and multipart bodies.
//!
//! ```no_run
//! use std::sync::Arc;
//! use stockroom_core::{HttpRequest, HttpResponse, Router};
//! use stockroom_testing::*;
//!
//! # tokio_test::block_on(async {
//! let mut router = Router::new();
//! router
//!     .get("/hello", |_req: HttpRequest| async { Ok(HttpResponse::text("Hello!")) })
//!     .unwrap();
//!
//! let client = TestClient::new(Arc::new(router));
//! let response = client.get("/hello").await;
//! assert_eq!(response.status(), 200);
//! assert_eq!(response.body_string(), "Hello!");
//! # });
//! ```

pub mod test_client;

pub use test_client::*;
