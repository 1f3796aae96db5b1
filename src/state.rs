// Shared state handed to every handler

use crate::store::InventoryStore;
use std::path::PathBuf;
use std::sync::Arc;
use stockroom_openapi::SwaggerConfig;
use stockroom_storage::Storage;

/// Everything a request handler can reach. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: InventoryStore,
    /// Photo cache
    pub storage: Arc<dyn Storage>,
    /// Directory the form pages are read from
    pub public_dir: PathBuf,
    pub docs: Arc<SwaggerConfig>,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn Storage>,
        public_dir: impl Into<PathBuf>,
        docs: SwaggerConfig,
    ) -> Self {
        Self {
            store: InventoryStore::new(),
            storage,
            public_dir: public_dir.into(),
            docs: Arc::new(docs),
        }
    }
}
