//! Shared harness: a mock division server on a loopback port

#![allow(dead_code)]

use std::net::SocketAddr;

use reqwest::Client;
use tokio::net::TcpListener;
use urc_mock_server::{create_router, create_shared_fixtures, FixtureSet, SharedFixtures};

pub struct TestHarness {
    pub server_url: String,
    pub fixtures: SharedFixtures,
    pub http: Client,
    _shutdown: tokio::sync::oneshot::Sender<()>,
}

impl TestHarness {
    pub async fn new(fixtures: FixtureSet) -> Self {
        let fixtures = create_shared_fixtures(fixtures);
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let addr: SocketAddr = ([127, 0, 0, 1], 0).into();
        let listener = TcpListener::bind(addr).await.expect("Bind should succeed");
        let port = listener.local_addr().expect("Bound address").port();
        let server_url = format!("http://127.0.0.1:{}", port);

        let router = create_router(fixtures.clone());
        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        Self {
            server_url,
            fixtures,
            http: Client::new(),
            _shutdown: shutdown_tx,
        }
    }

    /// Endpoint URL for a fixture slug
    pub fn endpoint(&self, slug: &str) -> String {
        format!("{}/divisions/{}", self.server_url, slug)
    }
}
