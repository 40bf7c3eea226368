//! In-process document store.
//!
//! Backs the `memory://` connection scheme and the test suites. Events
//! and bookings live in two maps behind [`tokio::sync::RwLock`]s; a
//! secondary slug index mirrors the unique index of the SQL backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::domain::{Booking, BookingId, Event, EventId, Slug};
use crate::error::GatewayError;

#[derive(Debug, Default)]
struct Events {
    by_id: HashMap<EventId, Event>,
    by_slug: HashMap<Slug, EventId>,
}

/// Document store kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: RwLock<Events>,
    bookings: RwLock<HashMap<BookingId, Booking>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_event_by_id(&self, id: EventId) -> Result<Option<Event>, GatewayError> {
        Ok(self.events.read().await.by_id.get(&id).cloned())
    }

    async fn find_event_by_slug(&self, slug: &Slug) -> Result<Option<Event>, GatewayError> {
        let events = self.events.read().await;
        Ok(events
            .by_slug
            .get(slug)
            .and_then(|id| events.by_id.get(id))
            .cloned())
    }

    async fn insert_event(&self, event: &Event) -> Result<(), GatewayError> {
        let mut events = self.events.write().await;
        if events.by_slug.contains_key(&event.slug) {
            return Err(GatewayError::Conflict(format!(
                "Event with slug '{}' already exists",
                event.slug
            )));
        }
        events.by_slug.insert(event.slug.clone(), event.id);
        events.by_id.insert(event.id, event.clone());
        Ok(())
    }

    async fn delete_event(&self, id: EventId) -> Result<bool, GatewayError> {
        let mut events = self.events.write().await;
        let Some(event) = events.by_id.remove(&id) else {
            return Ok(false);
        };
        events.by_slug.remove(&event.slug);
        Ok(true)
    }

    async fn find_booking(&self, id: BookingId) -> Result<Option<Booking>, GatewayError> {
        Ok(self.bookings.read().await.get(&id).cloned())
    }

    async fn insert_booking(&self, booking: &Booking) -> Result<(), GatewayError> {
        let mut bookings = self.bookings.write().await;
        if bookings.contains_key(&booking.id) {
            return Err(GatewayError::Conflict(format!(
                "Booking '{}' already exists",
                booking.id
            )));
        }
        bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn update_booking(&self, booking: &Booking) -> Result<(), GatewayError> {
        let mut bookings = self.bookings.write().await;
        let Some(slot) = bookings.get_mut(&booking.id) else {
            return Err(GatewayError::BookingNotFound(booking.id));
        };
        *slot = booking.clone();
        Ok(())
    }

    async fn list_bookings_for_event(
        &self,
        event_id: EventId,
    ) -> Result<Vec<Booking>, GatewayError> {
        let bookings = self.bookings.read().await;
        let mut matching: Vec<Booking> = bookings
            .values()
            .filter(|b| b.event_id == event_id)
            .cloned()
            .collect();
        matching.sort_by_key(|b| b.created_at);
        Ok(matching)
    }
}
