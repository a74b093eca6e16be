//! urc-mock-server: fixture-backed division endpoints
//!
//! Serves driver lists the way a division sheet endpoint does, for local demos
//! and integration tests. Each fixture can also misbehave on purpose: answer
//! with an HTTP status, an `{"error": ...}` body, or after a delay.

pub mod error;
pub mod fixtures;
pub mod routes;
pub mod server;

pub use error::ServerError;
pub use fixtures::{create_shared_fixtures, DivisionFixture, FixtureSet, SharedFixtures};
pub use routes::create_router;
pub use server::{MockServer, ServerBuilder};
