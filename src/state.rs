use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::MetricsStore;

/// Shared handler state: the data store and the loaded configuration
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MetricsStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn MetricsStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
