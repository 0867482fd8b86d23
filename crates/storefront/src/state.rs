//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::{ArgonVerifier, AuthService, CartService, OrderService, PreferenceService};
use crate::store::StateStore;
use crate::upstream::UpstreamClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Every service shares the one snapshot
/// store so cart, orders, session, and preferences persist together.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    upstream: UpstreamClient,
    cart: CartService,
    orders: OrderService,
    auth: AuthService,
    prefs: PreferenceService,
}

impl AppState {
    /// Build the state over a snapshot store.
    #[must_use]
    pub fn new(config: StorefrontConfig, store: Arc<dyn StateStore>) -> Self {
        let upstream = UpstreamClient::new(&config.upstream_base_url);
        let auth = AuthService::new(
            Arc::clone(&store),
            Arc::new(ArgonVerifier),
            config.admin_email.clone(),
        );

        Self {
            inner: Arc::new(AppStateInner {
                upstream,
                cart: CartService::new(Arc::clone(&store)),
                orders: OrderService::new(Arc::clone(&store)),
                auth,
                prefs: PreferenceService::new(store),
                config,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn upstream(&self) -> &UpstreamClient {
        &self.inner.upstream
    }

    #[must_use]
    pub fn cart(&self) -> &CartService {
        &self.inner.cart
    }

    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }

    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    #[must_use]
    pub fn prefs(&self) -> &PreferenceService {
        &self.inner.prefs
    }
}
