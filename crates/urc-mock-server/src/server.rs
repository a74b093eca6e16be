//! Mock division server

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::error::{Result, ServerError};
use crate::fixtures::{create_shared_fixtures, FixtureSet, SharedFixtures};
use crate::routes::create_router;

/// Mock division server
pub struct MockServer {
    state: SharedFixtures,
    addr: SocketAddr,
}

impl MockServer {
    /// Create a new server serving the given fixtures
    pub fn new(fixtures: FixtureSet, addr: SocketAddr) -> Self {
        let state = create_shared_fixtures(fixtures);
        Self { state, addr }
    }

    /// Run the server until the process exits
    pub async fn run(self) -> Result<()> {
        let router = create_router(self.state);

        tracing::info!("Starting mock division server on {}", self.addr);

        let listener = TcpListener::bind(self.addr).await?;
        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(())
    }

    /// Get the fixture state for testing
    pub fn state(&self) -> SharedFixtures {
        self.state.clone()
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

/// Builder for MockServer
pub struct ServerBuilder {
    fixtures: FixtureSet,
    addr: SocketAddr,
}

impl ServerBuilder {
    pub fn new(fixtures: FixtureSet) -> Self {
        Self {
            fixtures,
            addr: ([127, 0, 0, 1], 3100).into(),
        }
    }

    pub fn addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.addr = ([127, 0, 0, 1], port).into();
        self
    }

    pub fn build(self) -> MockServer {
        MockServer::new(self.fixtures, self.addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_to_loopback() {
        let server = ServerBuilder::new(FixtureSet::new()).build();
        assert_eq!(server.addr(), SocketAddr::from(([127, 0, 0, 1], 3100)));

        let server = ServerBuilder::new(FixtureSet::new()).port(4000).build();
        assert_eq!(server.addr().port(), 4000);
    }
}
