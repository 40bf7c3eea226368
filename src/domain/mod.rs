//! Domain layer: identifiers, normalized keys, and stored documents.
//!
//! Events are looked up by their normalized [`Slug`]; bookings reference
//! events by [`EventId`] and carry a validated [`Email`].

pub mod booking;
pub mod email;
pub mod event;
pub mod ids;
pub mod slug;

pub use booking::{Booking, BookingCandidate, BookingPatch};
pub use email::Email;
pub use event::{Event, NewEvent};
pub use ids::{BookingId, EventId};
pub use slug::Slug;
