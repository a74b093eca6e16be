//! Client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure, carrying the full cause chain
    #[error("Network error: {0}")]
    Http(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },

    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("{0}")]
    Remote(String),

    #[error("Division {0} has no endpoint")]
    NoEndpoint(String),

    #[error(transparent)]
    Core(#[from] urc_core::Error),

    #[error("Dashboard task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Dashboard closed")]
    Closed,
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(error_chain(&err))
    }
}

/// `err` followed by each of its sources, joined with ": "
///
/// reqwest's own message stops at "error sending request"; the useful part
/// ("Connection refused", DNS failure) lives further down the chain.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

pub type Result<T> = std::result::Result<T, ClientError>;
