use std::sync::Arc;

use jis_site_core::document::JsonFileStore;
use jis_site_core::events::EventBus;

use crate::config::AppConfig;
use crate::storage::uploads::LocalUploads;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: JsonFileStore,
    config: AppConfig,
    event_bus: EventBus,
    uploads: LocalUploads,
}

impl AppState {
    pub fn new(store: JsonFileStore, config: AppConfig, event_bus: EventBus) -> Self {
        let uploads = LocalUploads::new(&config.uploads_path);
        Self {
            inner: Arc::new(InnerState {
                store,
                config,
                event_bus,
                uploads,
            }),
        }
    }

    pub fn store(&self) -> &JsonFileStore {
        &self.inner.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.inner.event_bus
    }

    pub fn uploads(&self) -> &LocalUploads {
        &self.inner.uploads
    }
}
