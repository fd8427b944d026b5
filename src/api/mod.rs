pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::ml::TriageService;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TriageService>,
}

impl AppState {
    pub fn new(service: Arc<TriageService>) -> Self {
        Self { service }
    }
}
