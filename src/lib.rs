//! Stockroom - a small inventory REST API
//!
//! Items are registered with an optional photo, listed, fetched, updated,
//! deleted and searched by id. Items live in memory; photos are written to a
//! cache directory on disk.
//!
//! | Endpoint | Method | |
//! |---|---|---|
//! | `/register` | POST | multipart `inventory_name`, `description`, `photo` |
//! | `/inventory` | GET | all items |
//! | `/inventory/:id` | GET, PUT, DELETE | one item |
//! | `/inventory/:id/photo` | GET | photo bytes |
//! | `/search` | POST | `id`, `includePhoto=on` |
//! | `/docs` | GET | Swagger UI |
//! | `/RegisterForm.html`, `/SearchForm.html` | GET | HTML forms |

pub mod app;
pub mod config;
pub mod handlers;
pub mod item;
pub mod routes;
pub mod state;
pub mod store;
pub mod upload;

pub use app::{DOCS_PATH, build_app, build_state};
pub use config::ServerConfig;
pub use item::InventoryItem;
pub use routes::build_router;
pub use state::AppState;
pub use store::InventoryStore;
