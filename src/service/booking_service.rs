//! Booking write path.
//!
//! Every write builds a [`BookingCandidate`], runs the
//! [`ReferentialValidator`] when the event reference is new or changed,
//! and only then commits.

use crate::connection::HandleCache;
use crate::domain::{Booking, BookingCandidate, BookingId, BookingPatch, Email, EventId};
use crate::error::GatewayError;

use super::ReferentialValidator;

/// Creates, updates, and reads bookings.
#[derive(Debug, Clone)]
pub struct BookingService {
    cache: HandleCache,
    validator: ReferentialValidator,
}

impl BookingService {
    /// Creates a new `BookingService`.
    #[must_use]
    pub fn new(cache: HandleCache, validator: ReferentialValidator) -> Self {
        Self { cache, validator }
    }

    /// Books `raw_email` onto `event_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for a malformed email,
    /// [`GatewayError::ReferentialIntegrity`] if the event does not exist,
    /// and any store or connection error.
    pub async fn create_booking(
        &self,
        event_id: EventId,
        raw_email: &str,
    ) -> Result<Booking, GatewayError> {
        let candidate = BookingCandidate {
            event_id,
            email: Email::parse(raw_email)?,
        };
        self.validator.validate_change(None, &candidate).await?;

        let store = self.cache.acquire().await?;
        let booking = Booking::create(candidate);
        store.insert_booking(&booking).await?;

        tracing::info!(booking_id = %booking.id, %event_id, "booking created");
        Ok(booking)
    }

    /// Applies `patch` to booking `id`.
    ///
    /// The event reference is re-checked only when `patch` moves the
    /// booking to a different event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::BookingNotFound`] if the booking does not
    /// exist, [`GatewayError::ReferentialIntegrity`] if the new event does
    /// not exist, and any store or connection error.
    pub async fn update_booking(
        &self,
        id: BookingId,
        patch: &BookingPatch,
    ) -> Result<Booking, GatewayError> {
        let store = self.cache.acquire().await?;
        let mut booking = store
            .find_booking(id)
            .await?
            .ok_or(GatewayError::BookingNotFound(id))?;

        let candidate = booking.candidate_after(patch);
        self.validator
            .validate_change(Some(&booking), &candidate)
            .await?;

        booking.apply(candidate);
        store.update_booking(&booking).await?;

        tracing::info!(booking_id = %id, event_id = %booking.event_id, "booking updated");
        Ok(booking)
    }

    /// Fetches booking `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::BookingNotFound`] if it does not exist, and
    /// any store or connection error.
    pub async fn get_booking(&self, id: BookingId) -> Result<Booking, GatewayError> {
        let store = self.cache.acquire().await?;
        store
            .find_booking(id)
            .await?
            .ok_or(GatewayError::BookingNotFound(id))
    }

    /// Lists bookings for `event_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns any store or connection error.
    pub async fn list_for_event(&self, event_id: EventId) -> Result<Vec<Booking>, GatewayError> {
        let store = self.cache.acquire().await?;
        store.list_bookings_for_event(event_id).await
    }
}
