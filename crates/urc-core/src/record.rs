//! Driver rows served by a division endpoint

use serde::{Deserialize, Deserializer, Serialize};

/// One driver as published by a division's sheet
///
/// Spreadsheet-backed endpoints emit numbers, booleans or nulls for text
/// columns, so every field is decoded leniently and stored as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub car_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nickname: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hometown: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub car_owner: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sponsors: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub engine_manufacture: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub chassis_manufacture: String,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub stats: Option<String>,
}

impl DriverRecord {
    pub fn new(car_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            car_number: car_number.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_stats(mut self, stats: impl Into<String>) -> Self {
        self.stats = Some(stats.into());
        self
    }

    /// True when this driver carries `query` as car number, ignoring case.
    /// `query` is expected trimmed.
    pub fn matches_car_number(&self, query: &str) -> bool {
        self.car_number.to_lowercase() == query.to_lowercase()
    }

    /// Stats text, or `None` when missing or blank
    pub fn stats_text(&self) -> Option<&str> {
        self.stats.as_deref().filter(|s| !s.trim().is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::UInt(n) => n.to_string(),
            // Whole floats print without a fraction: 24.0 -> "24"
            Scalar::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                (f as i64).to_string()
            }
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_text)
        .unwrap_or_default())
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}
