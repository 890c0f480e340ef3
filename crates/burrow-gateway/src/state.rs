use std::sync::Arc;

use burrow_core::{EventSink, GeoLocator, ShortcodeStore};

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ShortcodeStore>,
    geo: Arc<dyn GeoLocator>,
    events: Arc<dyn EventSink>,
    base_url: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ShortcodeStore>,
        geo: Arc<dyn GeoLocator>,
        events: Arc<dyn EventSink>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            geo,
            events,
            base_url: public_base_url.into(),
        }
    }

    pub fn store(&self) -> &dyn ShortcodeStore {
        self.store.as_ref()
    }

    pub fn geo(&self) -> &dyn GeoLocator {
        self.geo.as_ref()
    }

    pub fn events(&self) -> &dyn EventSink {
        self.events.as_ref()
    }

    /// Public origin used to build `shortUrl`s.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
