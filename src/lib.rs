//! urc-announcer: URC announcing dashboard workspace
//!
//! Re-exports the workspace crates so integration tests and downstream tools
//! can depend on one package.

pub use urc_client;
pub use urc_core;
pub use urc_mock_server;
