// Core library for the stockroom inventory service
// HTTP request/response types, routing, the hyper server loop and logging setup

pub mod application;
pub mod error;
pub mod form;
pub mod http;
pub mod logging;
pub mod method;
pub mod routing;
pub mod static_assets;
pub mod status;

pub use application::*;
pub use error::*;
pub use form::*;
pub use http::*;
pub use method::*;
pub use routing::{HandlerFn, Route, Router};
pub use static_assets::*;
pub use status::*;
