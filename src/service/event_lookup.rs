//! Existence checks for events, decoupled from the booking write path.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::connection::HandleCache;
use crate::domain::EventId;
use crate::error::GatewayError;
use crate::store::StoreHandle;

/// Capability to test whether an event exists.
#[async_trait]
pub trait EventLookup: Debug + Send + Sync {
    /// Returns `true` if an event with identity `id` currently exists.
    async fn event_exists(&self, id: EventId) -> Result<bool, GatewayError>;
}

/// Looks events up through the process-wide [`HandleCache`].
#[derive(Debug, Clone)]
pub struct CachedEventLookup {
    cache: HandleCache,
}

impl CachedEventLookup {
    /// Creates a lookup that acquires its handle from `cache` per call.
    #[must_use]
    pub fn new(cache: HandleCache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl EventLookup for CachedEventLookup {
    async fn event_exists(&self, id: EventId) -> Result<bool, GatewayError> {
        let store = self.cache.acquire().await?;
        Ok(store.find_event_by_id(id).await?.is_some())
    }
}

/// Looks events up on an already-acquired handle.
#[derive(Debug, Clone)]
pub struct StoreEventLookup {
    store: StoreHandle,
}

impl StoreEventLookup {
    /// Creates a lookup bound to `store`.
    #[must_use]
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EventLookup for StoreEventLookup {
    async fn event_exists(&self, id: EventId) -> Result<bool, GatewayError> {
        Ok(self.store.find_event_by_id(id).await?.is_some())
    }
}
