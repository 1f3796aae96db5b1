//! OpenAPI 3.0 documents and Swagger UI pages for stockroom
//!
//! The service ships a hand-written `swagger.yaml`; this crate loads it into
//! typed structs once at startup and serves it as an interactive Swagger UI
//! page plus raw JSON and YAML.
//!
//! ```
//! use stockroom_openapi::{OpenApiSpec, SwaggerConfig, swagger_ui_response};
//!
//! let spec = OpenApiSpec::from_yaml_str(
//!     "openapi: 3.0.0\ninfo:\n  title: Inventory\n  version: '1.0.0'\npaths: {}\n",
//! )
//! .unwrap()
//! .with_default_server("http://localhost:3000");
//!
//! let config = SwaggerConfig::new("/docs", spec);
//! let page = swagger_ui_response(&config).unwrap();
//! assert_eq!(page.status, 200);
//! assert_eq!(config.spec.servers[0].url, "http://localhost:3000");
//! ```

pub mod loader;
pub mod spec;
pub mod swagger;

pub use loader::*;
pub use spec::*;
pub use swagger::*;
