//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which builds a default [`AppContext`] and, via
//! [`TestHarness::with_server`], starts Axum on a random port for HTTP-level
//! testing with a real client.

use std::net::SocketAddr;
use std::sync::Arc;

use fileforge::config::Config;
use fileforge::server::{create_router, AppContext};

/// Test harness wrapping a fully-constructed [`AppContext`].
pub struct TestHarness {
    pub ctx: AppContext,
}

impl TestHarness {
    /// Create a new harness with default configuration.
    pub fn new() -> Self {
        let ctx = AppContext {
            config: Arc::new(Config::default()),
        };
        Self { ctx }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = create_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}
