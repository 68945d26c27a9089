use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::application::services::{AuthService, QuoteService};
use crate::infrastructure::persistence::SqliteQuoteRepository;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub quote_service: Arc<QuoteService<SqliteQuoteRepository>>,
    pub auth_service: Arc<AuthService>,
    /// `None` when no Prometheus recorder is installed (tests).
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        quote_service: Arc<QuoteService<SqliteQuoteRepository>>,
        auth_service: Arc<AuthService>,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            quote_service,
            auth_service,
            metrics,
        }
    }
}
