//! urc-core: Division registry and driver resolution for the URC announcing dashboard
//!
//! This crate holds everything the dashboard knows without touching the network:
//! - Source registry: the fixed catalog of divisions and their data endpoints
//! - Driver records: the row shape served by each division endpoint
//! - Resolution core: the state machine that turns (division, fetch outcome, query)
//!   into exactly one [`ResolutionState`]
//!
//! # Resolution states
//!
//! | State | Meaning |
//! |-------|---------|
//! | `Idle` | No division selected |
//! | `Loading` | Fetch for the selected division is outstanding |
//! | `Error` | Fetch failed or the endpoint reported an error |
//! | `NoQuery` | Records loaded, car number empty |
//! | `NotFound` | Records loaded, no driver carries the car number |
//! | `Found` | First driver carrying the car number |
//!
//! Fetches are tracked by request token. Only the completion carrying the most
//! recently issued token is applied; anything older is dropped.

mod config;
mod error;
mod record;
mod registry;
mod resolve;
mod state;

pub use config::DashboardConfig;
pub use error::Error;
pub use record::DriverRecord;
pub use registry::{SourceEntry, SourceRegistry, DIVISIONS, SENTINEL_NAME};
pub use resolve::{find_driver, resolve, STATS_FALLBACK};
pub use state::{DashboardView, FetchTicket, ResolutionCore, ResolutionState};

pub type Result<T> = std::result::Result<T, Error>;
