use std::sync::Arc;

use crate::application::services::ShortenerService;

/// Shared application state injected into all handlers.
///
/// The storage backend is chosen at startup and reaches handlers only
/// through the service, keeping the handlers backend-agnostic.
#[derive(Clone)]
pub struct AppState {
    pub shortener_service: Arc<ShortenerService>,
}
