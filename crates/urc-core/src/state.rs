//! Resolution core: selected division, record set, query and derived state

use std::fmt::Display;
use std::sync::Arc;

use serde::Serialize;

use crate::config::DashboardConfig;
use crate::record::DriverRecord;
use crate::registry::{SourceEntry, SourceRegistry};
use crate::resolve::resolve;

/// What the dashboard shows, exactly one at a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum ResolutionState {
    Idle,
    Loading,
    Error(String),
    NoQuery,
    NotFound(String),
    Found(DriverRecord),
}

impl ResolutionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResolutionState::Loading)
    }

    pub fn found(&self) -> Option<&DriverRecord> {
        match self {
            ResolutionState::Found(record) => Some(record),
            _ => None,
        }
    }

    /// Short name for logs
    pub fn label(&self) -> &'static str {
        match self {
            ResolutionState::Idle => "idle",
            ResolutionState::Loading => "loading",
            ResolutionState::Error(_) => "error",
            ResolutionState::NoQuery => "no_query",
            ResolutionState::NotFound(_) => "not_found",
            ResolutionState::Found(_) => "found",
        }
    }
}

/// A fetch the caller must perform for the selected division
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Request token; the completion is applied only if it is still the latest
    pub token: u64,
    pub source: SourceEntry,
}

/// Snapshot handed to the view layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub sources: Vec<SourceEntry>,
    pub selected: SourceEntry,
    pub query: String,
    pub state: ResolutionState,
    /// A reveal-result signal is raised and not yet consumed
    pub reveal_pending: bool,
}

enum Phase {
    Unselected,
    Loading,
    Failed(String),
    Ready(Vec<DriverRecord>),
}

/// Owns the division selection, the record set and the query
///
/// Every mutation re-derives [`ResolutionState`]. Network work is not done
/// here: [`select_source`](Self::select_source) hands back a [`FetchTicket`]
/// and the caller reports the outcome through
/// [`complete_fetch`](Self::complete_fetch).
pub struct ResolutionCore {
    registry: Arc<SourceRegistry>,
    selected: SourceEntry,
    phase: Phase,
    query: String,
    latest_token: u64,
    stats_fallback: String,
    state: ResolutionState,
    reveal_pending: bool,
}

impl ResolutionCore {
    pub fn new(registry: Arc<SourceRegistry>, config: &DashboardConfig) -> Self {
        let selected = registry.sentinel().clone();
        Self {
            registry,
            selected,
            phase: Phase::Unselected,
            query: String::new(),
            latest_token: 0,
            stats_fallback: config.stats_fallback.clone(),
            state: ResolutionState::Idle,
            reveal_pending: false,
        }
    }

    /// Switch division. Clears the query and any held records.
    ///
    /// Returns a ticket when the division has an endpoint; every call
    /// supersedes fetches issued before it, including sentinel selections.
    pub fn select_source(&mut self, entry: SourceEntry) -> Option<FetchTicket> {
        self.latest_token += 1;
        self.query.clear();

        let ticket = if entry.is_sentinel() {
            self.phase = Phase::Unselected;
            None
        } else {
            self.phase = Phase::Loading;
            Some(FetchTicket {
                token: self.latest_token,
                source: entry.clone(),
            })
        };

        tracing::debug!(
            division = %entry.name,
            token = self.latest_token,
            fetch = ticket.is_some(),
            "Division selected"
        );

        self.selected = entry;
        self.refresh();
        ticket
    }

    /// Store the trimmed query and re-resolve against held records
    pub fn set_query(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if trimmed != self.query {
            self.query = trimmed.to_string();
        }
        self.refresh();
    }

    /// Apply a fetch outcome. Returns false when `token` has been superseded,
    /// in which case nothing changes.
    pub fn complete_fetch<E: Display>(
        &mut self,
        token: u64,
        outcome: Result<Vec<DriverRecord>, E>,
    ) -> bool {
        if token != self.latest_token || !matches!(self.phase, Phase::Loading) {
            tracing::debug!(
                token,
                latest = self.latest_token,
                "Discarding superseded fetch result"
            );
            return false;
        }

        self.phase = match outcome {
            Ok(records) => {
                tracing::info!(
                    division = %self.selected.name,
                    records = records.len(),
                    "Division records loaded"
                );
                Phase::Ready(records)
            }
            Err(e) => {
                tracing::warn!(division = %self.selected.name, error = %e, "Division fetch failed");
                Phase::Failed(e.to_string())
            }
        };
        self.refresh();
        true
    }

    fn derive(&self) -> ResolutionState {
        match &self.phase {
            Phase::Unselected => ResolutionState::Idle,
            Phase::Loading => ResolutionState::Loading,
            Phase::Failed(message) => ResolutionState::Error(message.clone()),
            Phase::Ready(records) => resolve(records, &self.query, &self.stats_fallback),
        }
    }

    fn refresh(&mut self) {
        let next = self.derive();

        match (&self.state, &next) {
            (ResolutionState::Found(prev), ResolutionState::Found(cur)) if prev == cur => {}
            (_, ResolutionState::Found(_)) => self.reveal_pending = true,
            _ => self.reveal_pending = false,
        }

        if next != self.state {
            tracing::debug!(from = self.state.label(), to = next.label(), "Resolution changed");
        }
        self.state = next;
    }

    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> &SourceEntry {
        &self.selected
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Records held for the selected division; empty unless loaded
    pub fn records(&self) -> &[DriverRecord] {
        match &self.phase {
            Phase::Ready(records) => records,
            _ => &[],
        }
    }

    /// Latest issued request token
    pub fn latest_token(&self) -> u64 {
        self.latest_token
    }

    /// Consume the reveal-result signal. True at most once per entry into
    /// `Found`.
    pub fn take_reveal_signal(&mut self) -> bool {
        std::mem::take(&mut self.reveal_pending)
    }

    pub fn view(&self) -> DashboardView {
        DashboardView {
            sources: self.registry.list_sources().to_vec(),
            selected: self.selected.clone(),
            query: self.query.clone(),
            state: self.state.clone(),
            reveal_pending: self.reveal_pending,
        }
    }
}
