//! Error types for urc-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Registry has no \"no division\" entry (empty endpoint)")]
    MissingSentinel,

    #[error("Registry has more than one entry without an endpoint: {first}, {second}")]
    DuplicateSentinel { first: String, second: String },

    #[error("Division listed twice: {0}")]
    DuplicateSource(String),

    #[error("Unknown division: {0}")]
    UnknownSource(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
