// Polling cache over the executions resource

use crate::client::ApiClient;
use crate::models::Execution;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::time::interval;
use tracing::{debug, info, instrument, warn};

/// Snapshot of the executions resource as last observed.
///
/// `loaded` is false only before the first fetch has completed, which is
/// when the loading state is rendered. A failed fetch keeps any previously
/// fetched `data` but sets `error`; the error panel takes precedence in the
/// render until a later fetch succeeds.
#[derive(Debug, Clone, Default)]
pub struct FetchState {
    pub data: Option<Vec<Execution>>,
    pub error: Option<String>,
    pub loaded: bool,
}

/// ExecutionsCache holds the shared fetch state for the executions list and
/// keeps it fresh with a background poll loop.
///
/// Each poll tick and each `revalidate` call performs exactly one request.
/// Overlapping fetches are not deduplicated or sequenced; whichever fetch
/// completes last wins the state.
#[derive(Debug, Clone)]
pub struct ExecutionsCache {
    client: ApiClient,
    state: Arc<RwLock<FetchState>>,
    shutdown_tx: watch::Sender<bool>,
}

impl ExecutionsCache {
    pub fn new(client: ApiClient) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            client,
            state: Arc::new(RwLock::new(FetchState::default())),
            shutdown_tx,
        }
    }

    /// Current snapshot of {data, error, loaded}.
    pub async fn snapshot(&self) -> FetchState {
        self.state.read().await.clone()
    }

    /// Re-issue the request once and apply the outcome to the shared state.
    #[instrument(skip(self))]
    pub async fn revalidate(&self) {
        match self.client.list_executions().await {
            Ok(executions) => {
                debug!(count = executions.len(), "Executions refreshed");
                let mut state = self.state.write().await;
                state.data = Some(executions);
                state.error = None;
                state.loaded = true;
            }
            Err(e) => {
                warn!(error = %e, "Failed to refresh executions");
                let mut state = self.state.write().await;
                state.error = Some(e.display_message());
                state.loaded = true;
            }
        }
    }

    /// Spawn the background poll loop. The first tick fires immediately so
    /// the page has data on its first render; subsequent ticks are spaced by
    /// `interval_seconds`. Stops when `shutdown` is called.
    pub fn spawn_poll_loop(&self, interval_seconds: u64) -> tokio::task::JoinHandle<()> {
        let cache = self.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            info!(interval_seconds, "Starting executions poll loop");
            let mut poll_interval = interval(Duration::from_secs(interval_seconds));

            loop {
                tokio::select! {
                    _ = poll_interval.tick() => {
                        cache.revalidate().await;
                    }
                    _ = shutdown_rx.changed() => {
                        info!("Shutdown signal received, stopping poll loop");
                        break;
                    }
                }
            }
        })
    }

    /// Signal the poll loop to stop.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}
