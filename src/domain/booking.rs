//! Booking documents and write-path inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{BookingId, Email, EventId};

/// A stored booking. References, but does not own, an [`super::Event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Store-assigned identity.
    pub id: BookingId,
    /// Referenced event. Must resolve when the booking is persisted.
    pub event_id: EventId,
    /// Normalized contact address.
    pub email: Email,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// The fields of a booking that are about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingCandidate {
    /// Event the booking will reference.
    pub event_id: EventId,
    /// Normalized contact address.
    pub email: Email,
}

/// Partial update of an existing booking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingPatch {
    /// New event reference.
    pub event_id: Option<EventId>,
    /// New contact address.
    pub email: Option<Email>,
}

impl Booking {
    /// Materializes a new booking with a fresh identity and timestamps.
    #[must_use]
    pub fn create(candidate: BookingCandidate) -> Self {
        let now = Utc::now();
        Self {
            id: BookingId::new(),
            event_id: candidate.event_id,
            email: candidate.email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the candidate this booking would become after `patch`.
    #[must_use]
    pub fn candidate_after(&self, patch: &BookingPatch) -> BookingCandidate {
        BookingCandidate {
            event_id: patch.event_id.unwrap_or(self.event_id),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
        }
    }

    /// Applies a candidate and bumps `updated_at`.
    pub fn apply(&mut self, candidate: BookingCandidate) {
        self.event_id = candidate.event_id;
        self.email = candidate.email;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn email(raw: &str) -> Email {
        let Ok(email) = Email::parse(raw) else {
            panic!("valid email rejected");
        };
        email
    }

    #[test]
    fn create_sets_matching_timestamps() {
        let booking = Booking::create(BookingCandidate {
            event_id: EventId::new(),
            email: email("a@b.com"),
        });
        assert_eq!(booking.created_at, booking.updated_at);
    }

    #[test]
    fn candidate_after_keeps_unpatched_fields() {
        let booking = Booking::create(BookingCandidate {
            event_id: EventId::new(),
            email: email("a@b.com"),
        });
        let patch = BookingPatch {
            event_id: None,
            email: Some(email("c@d.com")),
        };
        let candidate = booking.candidate_after(&patch);
        assert_eq!(candidate.event_id, booking.event_id);
        assert_eq!(candidate.email.as_str(), "c@d.com");
    }

    #[test]
    fn apply_bumps_updated_at() {
        let mut booking = Booking::create(BookingCandidate {
            event_id: EventId::new(),
            email: email("a@b.com"),
        });
        let created = booking.created_at;
        let next = booking.candidate_after(&BookingPatch::default());
        booking.apply(next);
        assert_eq!(booking.created_at, created);
        assert!(booking.updated_at >= created);
    }
}
