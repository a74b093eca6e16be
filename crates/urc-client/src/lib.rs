//! urc-client: network and terminal side of the URC announcing dashboard
//!
//! [`DivisionClient`] fetches a division's driver list over HTTP,
//! [`Dashboard`] drives a [`urc_core::ResolutionCore`] from async events, and
//! [`view`] renders snapshots as plain text.

pub mod client;
pub mod dashboard;
pub mod error;
pub mod session;
pub mod view;

pub use client::{decode_payload, DivisionClient};
pub use dashboard::Dashboard;
pub use error::{ClientError, Result};
pub use session::Command;
