//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use echoeats_core::storage::KeyValueStore;

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::services::{GeocodingClient, GeocodingError};

/// Durable store shared by every visitor.
pub type SharedStore = Box<dyn KeyValueStore + Send>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the durable store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Mutex<SharedStore>,
    geocoder: Option<GeocodingClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `store` - Durable key-value store for accounts and locations
    ///
    /// # Errors
    ///
    /// Returns an error if the geocoding client cannot be built.
    pub fn new(
        config: StorefrontConfig,
        store: impl KeyValueStore + Send + 'static,
    ) -> Result<Self, GeocodingError> {
        let geocoder = config
            .geocoder
            .as_ref()
            .map(GeocodingClient::new)
            .transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store: Mutex::new(Box::new(store)),
                geocoder,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Lock the durable store for one read-modify-write.
    ///
    /// The guard must be dropped before the handler awaits anything.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a previous holder panicked.
    pub fn store(&self) -> Result<MutexGuard<'_, SharedStore>, AppError> {
        self.inner
            .store
            .lock()
            .map_err(|_| AppError::Internal("store lock poisoned".to_string()))
    }

    /// Get the geocoding client, if address search is configured.
    #[must_use]
    pub fn geocoder(&self) -> Option<&GeocodingClient> {
        self.inner.geocoder.as_ref()
    }
}
