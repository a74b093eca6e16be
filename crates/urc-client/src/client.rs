//! HTTP client for division endpoints

use reqwest::Client;
use serde_json::Value;

use urc_core::{DashboardConfig, DriverRecord, SourceEntry};

use crate::error::{ClientError, Result};

/// Fetches driver lists from division endpoints
#[derive(Debug, Clone)]
pub struct DivisionClient {
    http: Client,
    timeout_ms: u64,
}

impl DivisionClient {
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            timeout_ms: config.request_timeout_ms,
        })
    }

    /// GET the division's endpoint and decode its driver list
    pub async fn fetch_drivers(&self, source: &SourceEntry) -> Result<Vec<DriverRecord>> {
        if source.is_sentinel() {
            return Err(ClientError::NoEndpoint(source.name.clone()));
        }

        tracing::debug!(division = %source.name, endpoint = %source.endpoint, "Fetching drivers");

        let resp = self
            .http
            .get(&source.endpoint)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !resp.status().is_success() {
            return Err(ClientError::Status {
                status: resp.status().as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let body = resp.bytes().await.map_err(|e| self.transport_error(e))?;
        let drivers = decode_payload(&body)?;

        tracing::debug!(division = %source.name, drivers = drivers.len(), "Fetched drivers");
        Ok(drivers)
    }

    fn transport_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout(self.timeout_ms)
        } else {
            ClientError::from(e)
        }
    }
}

/// Decode a division response body
///
/// Accepts a JSON array of drivers, or an object carrying an `error` string
/// which becomes [`ClientError::Remote`]. Anything else is malformed.
pub fn decode_payload(body: &[u8]) -> Result<Vec<DriverRecord>> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ClientError::Malformed(e.to_string()))?;

    match value {
        Value::Array(_) => {
            serde_json::from_value(value).map_err(|e| ClientError::Malformed(e.to_string()))
        }
        Value::Object(map) => match map.get("error") {
            Some(Value::String(message)) if !message.trim().is_empty() => {
                Err(ClientError::Remote(message.clone()))
            }
            Some(Value::String(_)) => Err(ClientError::Remote("Endpoint reported an error".into())),
            Some(other) => Err(ClientError::Malformed(format!(
                "error field is not a string: {}",
                other
            ))),
            None => Err(ClientError::Malformed(
                "expected an array of drivers or an error object".into(),
            )),
        },
        other => Err(ClientError::Malformed(format!(
            "expected an array of drivers, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
