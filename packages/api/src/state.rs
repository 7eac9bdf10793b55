//! Shared application state.

use std::sync::Arc;

use dle_extractor::DleClient;

/// State handed to every handler: the shared upstream client.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<DleClient>,
}

impl AppState {
    /// Wrap a client into shareable state.
    #[must_use]
    pub fn new(client: DleClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}
