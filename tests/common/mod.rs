//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use getjson::config::AppConfig;
use getjson::lifecycle::Shutdown;
use getjson::{demo_dispatcher, HttpServer};
use tokio::net::TcpListener;

/// A server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the sample groups behind the HTTP adapter.
pub async fn start_server(config: AppConfig) -> TestServer {
    let dispatcher = demo_dispatcher(&config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, dispatcher);
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// Non-pooled client, so shutdown is not held up by idle connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
