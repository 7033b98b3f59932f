//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::Arc;

use junkboy::anchor::repository::InMemoryAnchorRepository;
use junkboy::anchor::AnchorRepository;
use junkboy::config::ServiceConfig;
use junkboy::lifecycle::{self, Shutdown};

/// A server running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestServer {
    /// Base URL including the API prefix.
    pub fn api(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    #[allow(dead_code)]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the full service over an empty in-memory repository.
pub async fn start_server() -> TestServer {
    start_server_with(Arc::new(InMemoryAnchorRepository::new())).await
}

/// Start the full service over the given repository.
pub async fn start_server_with(repository: Arc<dyn AnchorRepository>) -> TestServer {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();

    let ready = lifecycle::start_with(config, repository).await.unwrap();
    let addr = ready.listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = ready.server.run(ready.listener, server_shutdown).await;
    });

    TestServer { addr, shutdown }
}

/// A client that never reuses pooled connections between tests.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
