//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::connection::HandleCache;
use crate::service::{BookingService, CachedEventLookup, EventService, ReferentialValidator};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Process-wide lazy store connection.
    pub cache: HandleCache,
    /// Event read path.
    pub event_service: Arc<EventService>,
    /// Booking write path.
    pub booking_service: Arc<BookingService>,
}

impl AppState {
    /// Wires the services around a single shared `cache`.
    #[must_use]
    pub fn new(cache: HandleCache) -> Self {
        let lookup = Arc::new(CachedEventLookup::new(cache.clone()));
        let validator = ReferentialValidator::new(lookup);

        Self {
            event_service: Arc::new(EventService::new(cache.clone())),
            booking_service: Arc::new(BookingService::new(cache.clone(), validator)),
            cache,
        }
    }
}
