use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use common::client::ApiClient;
use common::config::Settings;
use common::poller::ExecutionsCache;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
    pub executions: ExecutionsCache,
    pub metrics: PrometheusHandle,
    pub config: Arc<Settings>,
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(
        client: ApiClient,
        executions: ExecutionsCache,
        metrics: PrometheusHandle,
        config: Settings,
    ) -> Self {
        Self {
            client,
            executions,
            metrics,
            config: Arc::new(config),
        }
    }
}
