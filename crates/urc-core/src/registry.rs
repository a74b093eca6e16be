//! Division catalog
//!
//! The registry is built once from a fixed table and never changes. The
//! "no division" entry (empty endpoint) is pinned first; every other division
//! follows in case-insensitive name order.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::Error;

/// Display label of the "no division selected" entry
pub const SENTINEL_NAME: &str = "Select a Division";

/// Compiled-in divisions: (display name, endpoint)
pub const DIVISIONS: &[(&str, &str)] = &[(
    "URC Sprints",
    "https://script.google.com/macros/s/AKfycbwXMRH2IWQNAEGrFf8s_q6ahe08y-a32DEpSZAqbFuIgeL4u7TR_drVRHi95GKGc4ug7Q/exec",
)];

/// A named data source; an empty endpoint marks the "no division" entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceEntry {
    pub name: String,
    pub endpoint: String,
}

impl SourceEntry {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn sentinel(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }

    pub fn is_sentinel(&self) -> bool {
        self.endpoint.trim().is_empty()
    }
}

/// Ordered, immutable division catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRegistry {
    entries: Vec<SourceEntry>,
}

impl SourceRegistry {
    /// Registry from the compiled-in division table
    pub fn builtin() -> Self {
        let mut entries = vec![SourceEntry::sentinel(SENTINEL_NAME)];
        entries.extend(
            DIVISIONS
                .iter()
                .map(|(name, endpoint)| SourceEntry::new(*name, *endpoint)),
        );
        Self::ordered(entries)
    }

    /// Registry from an arbitrary entry list
    ///
    /// Exactly one entry must have an empty endpoint, and names must be
    /// unique ignoring case.
    pub fn from_entries(entries: Vec<SourceEntry>) -> crate::Result<Self> {
        let mut sentinels = entries.iter().filter(|e| e.is_sentinel());
        match (sentinels.next(), sentinels.next()) {
            (None, _) => return Err(Error::MissingSentinel),
            (Some(first), Some(second)) => {
                return Err(Error::DuplicateSentinel {
                    first: first.name.clone(),
                    second: second.name.clone(),
                })
            }
            (Some(_), None) => {}
        }

        let mut seen = std::collections::HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.to_lowercase()) {
                return Err(Error::DuplicateSource(entry.name.clone()));
            }
        }

        Ok(Self::ordered(entries))
    }

    fn ordered(entries: Vec<SourceEntry>) -> Self {
        let (mut sentinel, mut rest): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(SourceEntry::is_sentinel);
        rest.sort_by_cached_key(|e| collation_key(&e.name));
        sentinel.append(&mut rest);
        Self { entries: sentinel }
    }

    /// All entries, "no division" first
    pub fn list_sources(&self) -> &[SourceEntry] {
        &self.entries
    }

    /// The "no division" entry
    pub fn sentinel(&self) -> &SourceEntry {
        // Both constructors place the sentinel at index 0
        &self.entries[0]
    }

    /// Look up a division by display name, ignoring case and surrounding space
    pub fn find(&self, name: &str) -> Option<&SourceEntry> {
        let wanted = name.trim().to_lowercase();
        self.entries.iter().find(|e| e.name.to_lowercase() == wanted)
    }

    /// Like [`find`](Self::find) but unknown names are an error
    pub fn get(&self, name: &str) -> crate::Result<&SourceEntry> {
        self.find(name)
            .ok_or_else(|| Error::UnknownSource(name.trim().to_string()))
    }

    /// Real divisions, without the sentinel
    pub fn divisions(&self) -> impl Iterator<Item = &SourceEntry> {
        self.entries.iter().skip(1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sort key approximating root-locale collation
///
/// Primary: decomposed, accent-stripped, lower-cased text, so "Élite" sorts
/// with "elite". Secondary: lower-cased text (unaccented before accented).
/// Tertiary: the raw name, which keeps the order total.
fn collation_key(name: &str) -> (String, String, String) {
    let primary = name
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    let secondary = name.nfkd().collect::<String>().to_lowercase();
    (primary, secondary, name.to_string())
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
