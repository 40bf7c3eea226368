//! Booking DTOs for creation, update, and listing.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Booking, BookingPatch, Email, EventId};
use crate::error::GatewayError;

/// Request body for `POST /api/bookings`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Identity of the event to book.
    #[serde(default)]
    pub event_id: String,
    /// Contact address.
    #[serde(default)]
    pub email: String,
}

/// Request body for `PATCH /api/bookings/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    /// New event reference.
    #[serde(default)]
    pub event_id: Option<String>,
    /// New contact address.
    #[serde(default)]
    pub email: Option<String>,
}

impl UpdateBookingRequest {
    /// Validates the request into a [`BookingPatch`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for a malformed event ID or
    /// email.
    pub fn into_patch(self) -> Result<BookingPatch, GatewayError> {
        Ok(BookingPatch {
            event_id: self.event_id.as_deref().map(parse_event_id).transpose()?,
            email: self.email.as_deref().map(Email::parse).transpose()?,
        })
    }
}

/// Parses an event identity supplied by a client.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] if `raw` is not a UUID.
pub fn parse_event_id(raw: &str) -> Result<EventId, GatewayError> {
    uuid::Uuid::parse_str(raw.trim())
        .map(EventId::from_uuid)
        .map_err(|_| GatewayError::Validation("Invalid event ID".to_string()))
}

/// Success envelope carrying one booking.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingEnvelope {
    /// Always `true`.
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
    /// The booking.
    pub booking: Booking,
}

/// Success envelope carrying the bookings of one event.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingListResponse {
    /// Always `true`.
    pub success: bool,
    /// Bookings, oldest first.
    pub bookings: Vec<Booking>,
}
