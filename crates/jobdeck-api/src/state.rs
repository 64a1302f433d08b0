//! Application state.

use jobdeck_db::{JobFactory, JobStore};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn JobStore>,
    pub job_factory: JobFactory,
    /// Token guarding the all-jobs view; `None` disables it.
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(store: Arc<dyn JobStore>, admin_token: Option<String>) -> Self {
        let job_factory = JobFactory::new(store.clone());

        Self {
            store,
            job_factory,
            admin_token: admin_token.map(Arc::from),
        }
    }
}
