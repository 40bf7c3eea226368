//! Document store abstraction and its backends.
//!
//! [`DocumentStore`] is the query surface the services run against once a
//! live handle has been acquired. [`Connector`] turns a connection URL
//! into such a handle; the [`crate::connection::HandleCache`] decides when
//! a connector is invoked.
//!
//! The store does not enforce references between documents. Bookings are
//! checked against events by [`crate::service::ReferentialValidator`]
//! before they are written.

pub mod connector;
pub mod memory;
pub mod postgres;

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Booking, BookingId, Event, EventId, Slug};
use crate::error::GatewayError;

pub use connector::StoreConnector;
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// A live, shareable handle to the backing store.
pub type StoreHandle = Arc<dyn DocumentStore>;

/// Queries and writes against a connected document store.
#[async_trait]
pub trait DocumentStore: Debug + Send + Sync {
    /// Fetches an event by identity.
    async fn find_event_by_id(&self, id: EventId) -> Result<Option<Event>, GatewayError>;

    /// Fetches the event whose stored normalized slug equals `slug`.
    async fn find_event_by_slug(&self, slug: &Slug) -> Result<Option<Event>, GatewayError>;

    /// Inserts a new event.
    ///
    /// Fails with [`GatewayError::Conflict`] if the normalized slug is taken.
    async fn insert_event(&self, event: &Event) -> Result<(), GatewayError>;

    /// Deletes an event, returning whether it existed.
    ///
    /// Bookings that reference the event are left in place; no route
    /// exposes this. It exists for store administration and to exercise
    /// the unlocked check-then-write window of the booking write path.
    async fn delete_event(&self, id: EventId) -> Result<bool, GatewayError>;

    /// Fetches a booking by identity.
    async fn find_booking(&self, id: BookingId) -> Result<Option<Booking>, GatewayError>;

    /// Inserts a new booking.
    async fn insert_booking(&self, booking: &Booking) -> Result<(), GatewayError>;

    /// Replaces an existing booking.
    ///
    /// Fails with [`GatewayError::BookingNotFound`] if it does not exist.
    async fn update_booking(&self, booking: &Booking) -> Result<(), GatewayError>;

    /// Lists the bookings that reference `event_id`, oldest first.
    async fn list_bookings_for_event(
        &self,
        event_id: EventId,
    ) -> Result<Vec<Booking>, GatewayError>;
}

/// Establishes connections to the backing store.
#[async_trait]
pub trait Connector: Debug + Send + Sync {
    /// Opens a new handle for `url`.
    ///
    /// Fails with [`GatewayError::Connection`] when the store is
    /// unreachable and [`GatewayError::Config`] when the URL is unusable.
    async fn connect(&self, url: &str) -> Result<StoreHandle, GatewayError>;
}
