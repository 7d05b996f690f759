//! Application state shared by the host's commands.

use std::sync::Arc;

use crate::app::Storefront;
use crate::config::ShopfrontConfig;
use crate::shopify::StorefrontClient;

/// Configuration, catalog client and state machine environment.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShopfrontConfig,
    client: StorefrontClient,
    storefront: Storefront,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ShopfrontConfig) -> Self {
        let client = StorefrontClient::new(&config.api, &config.catalog);
        let storefront = Storefront::new(config.breakpoints, &config.catalog);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                client,
                storefront,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &ShopfrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Storefront API client.
    #[must_use]
    pub fn client(&self) -> &StorefrontClient {
        &self.inner.client
    }

    /// Get a reference to the state machine environment.
    #[must_use]
    pub fn storefront(&self) -> &Storefront {
        &self.inner.storefront
    }
}
