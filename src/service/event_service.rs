//! Event service: slug lookup and event creation.

use crate::connection::HandleCache;
use crate::domain::{Event, NewEvent, Slug};
use crate::error::GatewayError;

/// Outcome of a slug lookup. Absence is a normal result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SlugLookup {
    /// An event with the normalized slug exists.
    Found(Event),
    /// No event has the normalized slug.
    NotFound(Slug),
}

/// Read path and creation of events.
#[derive(Debug, Clone)]
pub struct EventService {
    cache: HandleCache,
}

impl EventService {
    /// Creates a new `EventService`.
    #[must_use]
    pub fn new(cache: HandleCache) -> Self {
        Self { cache }
    }

    /// Finds the event whose normalized slug equals the normalized
    /// `raw_key`.
    ///
    /// The key is validated before the store is touched.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for an empty or blank key, and
    /// any error from acquiring the store or running the query.
    pub async fn find_by_slug(&self, raw_key: &str) -> Result<SlugLookup, GatewayError> {
        let slug = Slug::parse(raw_key)?;
        let store = self.cache.acquire().await?;

        match store.find_event_by_slug(&slug).await? {
            Some(event) => Ok(SlugLookup::Found(event)),
            None => {
                tracing::debug!(%slug, "event not found");
                Ok(SlugLookup::NotFound(slug))
            }
        }
    }

    /// Creates an event. The slug in `input` is already normalized.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Conflict`] if the slug is taken, and any
    /// error from acquiring the store or writing.
    pub async fn create_event(&self, input: NewEvent) -> Result<Event, GatewayError> {
        let store = self.cache.acquire().await?;
        let event = Event::create(input);
        store.insert_event(&event).await?;

        tracing::info!(event_id = %event.id, slug = %event.slug, "event created");
        Ok(event)
    }
}
