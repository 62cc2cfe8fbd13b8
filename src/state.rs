use crate::application::dispatch::DispatchService;
use crate::application::registry::ProviderRegistry;
use std::sync::Arc;
use std::time::Duration;

/// Shared by every HTTP handler
#[derive(Clone)]
pub struct AppState {
    pub dispatch: Arc<DispatchService>,
    /// Deadline handlers put on each translation call
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(registry: ProviderRegistry, request_timeout: Duration) -> Self {
        Self {
            dispatch: Arc::new(DispatchService::new(registry)),
            request_timeout,
        }
    }
}
