//! Division fixtures served by the mock server

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ServerError};

/// How one division endpoint answers
///
/// ```json
/// { "drivers": [{ "carNumber": "24", "name": "Jane Doe" }], "delay_ms": 250 }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DivisionFixture {
    /// Served as-is; normally an array of driver objects
    #[serde(default = "empty_array")]
    pub drivers: Value,
    /// Answer with this HTTP status instead of the drivers
    #[serde(default)]
    pub status: Option<u16>,
    /// Answer `{"error": ...}` with 200 instead of the drivers
    #[serde(default)]
    pub error: Option<String>,
    /// Wait before answering
    #[serde(default)]
    pub delay_ms: u64,
}

fn empty_array() -> Value {
    Value::Array(Vec::new())
}

impl DivisionFixture {
    pub fn drivers(drivers: Value) -> Self {
        Self {
            drivers,
            ..Self::default()
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            drivers: empty_array(),
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            drivers: empty_array(),
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    fn validate(&self, division: &str) -> Result<()> {
        if let Some(status) = self.status {
            if axum::http::StatusCode::from_u16(status).is_err() {
                return Err(ServerError::InvalidFixture {
                    division: division.to_string(),
                    reason: format!("status {} is not a valid HTTP status", status),
                });
            }
        }
        Ok(())
    }

    /// Number of driver rows, when `drivers` is an array
    pub fn driver_count(&self) -> usize {
        self.drivers.as_array().map(Vec::len).unwrap_or(0)
    }
}

/// All divisions the server knows, keyed by lower-cased slug
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureSet {
    #[serde(flatten)]
    divisions: BTreeMap<String, DivisionFixture>,
}

impl FixtureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_division(mut self, slug: &str, fixture: DivisionFixture) -> Self {
        self.insert(slug, fixture);
        self
    }

    pub fn insert(&mut self, slug: &str, fixture: DivisionFixture) {
        self.divisions.insert(slug.to_lowercase(), fixture);
    }

    pub fn get(&self, slug: &str) -> Option<&DivisionFixture> {
        self.divisions.get(&slug.to_lowercase())
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.divisions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.divisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
    }

    /// Load fixtures from a JSON file: an object of slug -> fixture
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let raw: BTreeMap<String, DivisionFixture> = serde_json::from_str(&content)?;

        let mut set = Self::new();
        for (slug, fixture) in raw {
            fixture.validate(&slug)?;
            set.insert(&slug, fixture);
        }
        Ok(set)
    }

    /// Save fixtures to a JSON file
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }
}

/// Shared fixture state type
pub type SharedFixtures = Arc<tokio::sync::RwLock<FixtureSet>>;

/// Create shared state from a fixture set
pub fn create_shared_fixtures(fixtures: FixtureSet) -> SharedFixtures {
    Arc::new(tokio::sync::RwLock::new(fixtures))
}
