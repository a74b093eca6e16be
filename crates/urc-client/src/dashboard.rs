//! Async driver around the resolution core
//!
//! Selections and query edits are applied to the core under one lock. Each
//! selection with an endpoint spawns a fetch task that reports back through
//! the same lock with its request token, so a slow fetch for an earlier
//! selection can never overwrite a later one.

use std::sync::Arc;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;

use urc_core::{DashboardConfig, DashboardView, ResolutionCore, SourceEntry, SourceRegistry};

use crate::client::DivisionClient;
use crate::error::{ClientError, Result};

/// Shared core type
pub type SharedCore = Arc<RwLock<ResolutionCore>>;

/// Handle to a running dashboard session. Cheap to clone.
#[derive(Clone)]
pub struct Dashboard {
    core: SharedCore,
    registry: Arc<SourceRegistry>,
    client: DivisionClient,
    updates: Arc<watch::Sender<DashboardView>>,
}

impl Dashboard {
    pub fn new(registry: SourceRegistry, config: &DashboardConfig) -> Result<Self> {
        config.validate()?;
        let registry = Arc::new(registry);
        let core = ResolutionCore::new(registry.clone(), config);
        let (updates, _) = watch::channel(core.view());

        Ok(Self {
            core: Arc::new(RwLock::new(core)),
            registry,
            client: DivisionClient::new(config)?,
            updates: Arc::new(updates),
        })
    }

    /// Dashboard over the compiled-in division table
    pub fn builtin(config: &DashboardConfig) -> Result<Self> {
        Self::new(SourceRegistry::builtin(), config)
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Select a division and start fetching it
    ///
    /// The returned handle resolves once the fetch has been applied or
    /// discarded; dropping it does not cancel the fetch.
    pub async fn select_source(&self, entry: SourceEntry) -> Option<JoinHandle<()>> {
        let ticket = {
            let mut core = self.core.write().await;
            let ticket = core.select_source(entry);
            self.publish(&core);
            ticket
        }?;

        let core = self.core.clone();
        let client = self.client.clone();
        let updates = self.updates.clone();

        Some(tokio::spawn(async move {
            let outcome = client.fetch_drivers(&ticket.source).await;

            let mut core = core.write().await;
            if core.complete_fetch(ticket.token, outcome) {
                updates.send_replace(core.view());
            } else {
                tracing::debug!(
                    division = %ticket.source.name,
                    token = ticket.token,
                    "Fetch superseded by a later selection"
                );
            }
        }))
    }

    /// Select a division by display name
    pub async fn select_division(&self, name: &str) -> Result<Option<JoinHandle<()>>> {
        let entry = self.registry.get(name)?.clone();
        Ok(self.select_source(entry).await)
    }

    /// Select a division by name and wait for its fetch to finish
    pub async fn load_division(&self, name: &str) -> Result<DashboardView> {
        if let Some(handle) = self.select_division(name).await? {
            handle.await?;
        }
        Ok(self.view().await)
    }

    /// Re-select the current division, which refetches it
    pub async fn reload(&self) -> Option<JoinHandle<()>> {
        let selected = self.core.read().await.selected().clone();
        self.select_source(selected).await
    }

    /// Update the car number query; no network activity
    pub async fn set_query(&self, raw: &str) {
        let mut core = self.core.write().await;
        core.set_query(raw);
        self.publish(&core);
    }

    pub async fn view(&self) -> DashboardView {
        self.core.read().await.view()
    }

    /// Consume the reveal-result signal raised on entering `Found`
    ///
    /// Not published: the last broadcast view keeps `reveal_pending` set
    /// until the next state change.
    pub async fn take_reveal_signal(&self) -> bool {
        self.core.write().await.take_reveal_signal()
    }

    /// Current view together with the reveal signal it raised
    ///
    /// Both are read under one lock, so the signal always belongs to the
    /// returned view even while fetches and query edits race with the caller.
    pub async fn take_view(&self) -> (DashboardView, bool) {
        let mut core = self.core.write().await;
        let view = core.view();
        let reveal = core.take_reveal_signal();
        (view, reveal)
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.updates.subscribe()
    }

    /// Wait until no fetch is outstanding and return the view at that point
    pub async fn settled(&self) -> Result<DashboardView> {
        let mut rx = self.subscribe();
        let view = rx
            .wait_for(|view| !view.state.is_loading())
            .await
            .map_err(|_| ClientError::Closed)?;
        Ok(view.clone())
    }

    fn publish(&self, core: &ResolutionCore) {
        self.updates.send_replace(core.view());
    }
}
