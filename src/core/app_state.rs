use std::sync::Arc;

use crate::service::SearchService;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub search_service: Arc<SearchService>,
}

impl AppState {
    pub fn new(search_service: Arc<SearchService>) -> Self {
        Self { search_service }
    }
}
