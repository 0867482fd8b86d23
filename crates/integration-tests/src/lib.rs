//! Integration tests for Lumina.
//!
//! Each test spawns a full storefront server on an ephemeral port, backed
//! by an in-memory snapshot store and a `wiremock` stand-in for the
//! upstream commerce API, then talks to it over HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lumina-integration-tests
//! ```

use std::sync::Arc;

use axum::{Router, routing::get};
use wiremock::MockServer;

use lumina_storefront::config::StorefrontConfig;
use lumina_storefront::routes;
use lumina_storefront::state::AppState;
use lumina_storefront::store::MemoryStore;

/// Email granted the admin role by the test configuration.
pub const ADMIN_EMAIL: &str = "admin@lumina.shop";

/// A running storefront wired to a mock upstream.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub upstream: MockServer,
}

impl TestApp {
    /// Start a mock upstream and a storefront server on ephemeral ports.
    ///
    /// # Panics
    ///
    /// Panics when a listener cannot be bound; tests have no way to
    /// recover from that.
    pub async fn spawn() -> Self {
        let upstream = MockServer::start().await;

        let config = StorefrontConfig {
            host: std::net::Ipv4Addr::LOCALHOST.into(),
            port: 0,
            base_url: String::new(),
            upstream_base_url: upstream.uri(),
            state_dir: std::env::temp_dir(),
            admin_email: Some(ADMIN_EMAIL.to_string()),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        let state = AppState::new(config, Arc::new(MemoryStore::new()));
        let app = Router::new()
            .route("/health", get(|| async { "ok" }))
            .merge(routes::routes())
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            upstream,
        }
    }

    /// Absolute URL for a path on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
