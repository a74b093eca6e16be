//! Car number lookup over a division's record set

use crate::record::DriverRecord;
use crate::state::ResolutionState;

/// Shown in place of missing or blank driver stats
pub const STATS_FALLBACK: &str = "No specific stats available for this driver.";

/// First driver whose car number equals `query`, ignoring case and
/// surrounding whitespace. Records are scanned in fetch order.
pub fn find_driver<'a>(records: &'a [DriverRecord], query: &str) -> Option<&'a DriverRecord> {
    let query = query.trim();
    records.iter().find(|record| record.matches_car_number(query))
}

/// Resolve a non-empty query against a loaded record set
pub fn resolve(records: &[DriverRecord], query: &str, stats_fallback: &str) -> ResolutionState {
    let query = query.trim();
    if query.is_empty() {
        return ResolutionState::NoQuery;
    }

    match find_driver(records, query) {
        Some(record) => {
            let mut found = record.clone();
            if found.stats_text().is_none() {
                found.stats = Some(stats_fallback.to_string());
            }
            ResolutionState::Found(found)
        }
        None => ResolutionState::NotFound(query.to_string()),
    }
}
