//! Service layer: business logic orchestration.
//!
//! [`EventService`] owns the slug read path, [`BookingService`] owns the
//! booking write path, and [`ReferentialValidator`] sits between the
//! booking write path and the event store.

pub mod booking_service;
pub mod event_lookup;
pub mod event_service;
pub mod referential;

pub use booking_service::BookingService;
pub use event_lookup::{CachedEventLookup, EventLookup, StoreEventLookup};
pub use event_service::{EventService, SlugLookup};
pub use referential::ReferentialValidator;
