//! Booking → event reference check.
//!
//! The store does not enforce the reference, so the booking write path
//! calls [`ReferentialValidator`] before committing. The check and the
//! write are not atomic: an event deleted between the two leaves a
//! dangling booking. Writers are assumed not to race with event deletion.

use std::sync::Arc;

use crate::domain::{Booking, BookingCandidate};
use crate::error::GatewayError;

use super::EventLookup;

/// Confirms that a booking's `event_id` names an existing event.
#[derive(Debug, Clone)]
pub struct ReferentialValidator {
    lookup: Arc<dyn EventLookup>,
}

impl ReferentialValidator {
    /// Creates a validator backed by `lookup`.
    #[must_use]
    pub fn new(lookup: Arc<dyn EventLookup>) -> Self {
        Self { lookup }
    }

    /// Checks that `candidate.event_id` exists right now.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ReferentialIntegrity`] if the event is
    /// absent. Lookup failures (connection, persistence) are returned
    /// unchanged.
    pub async fn validate(&self, candidate: &BookingCandidate) -> Result<(), GatewayError> {
        if self.lookup.event_exists(candidate.event_id).await? {
            return Ok(());
        }
        tracing::warn!(event_id = %candidate.event_id, "booking references a missing event");
        Err(GatewayError::ReferentialIntegrity(candidate.event_id))
    }

    /// Validates only when the event reference is new or changed.
    ///
    /// `previous` is the stored booking for updates and `None` for
    /// inserts.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate).
    pub async fn validate_change(
        &self,
        previous: Option<&Booking>,
        candidate: &BookingCandidate,
    ) -> Result<(), GatewayError> {
        if let Some(previous) = previous
            && previous.event_id == candidate.event_id
        {
            return Ok(());
        }
        self.validate(candidate).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::{Email, EventId};

    #[derive(Debug)]
    struct FixedLookup {
        known: EventId,
        calls: AtomicUsize,
        fail: bool,
    }

    impl FixedLookup {
        fn new(known: EventId) -> Arc<Self> {
            Arc::new(Self {
                known,
                calls: AtomicUsize::new(0),
                fail: false,
            })
        }
    }

    #[async_trait]
    impl EventLookup for FixedLookup {
        async fn event_exists(&self, id: EventId) -> Result<bool, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GatewayError::Connection("connection refused".to_string()));
            }
            Ok(id == self.known)
        }
    }

    fn candidate(event_id: EventId) -> BookingCandidate {
        let Ok(email) = Email::parse("x@y.com") else {
            panic!("valid email rejected");
        };
        BookingCandidate { event_id, email }
    }

    #[tokio::test]
    async fn existing_event_passes() {
        let known = EventId::new();
        let validator = ReferentialValidator::new(FixedLookup::new(known));
        assert!(validator.validate(&candidate(known)).await.is_ok());
    }

    #[tokio::test]
    async fn missing_event_is_rejected() {
        let validator = ReferentialValidator::new(FixedLookup::new(EventId::new()));
        let missing = EventId::new();
        let result = validator.validate(&candidate(missing)).await;
        assert_eq!(result, Err(GatewayError::ReferentialIntegrity(missing)));
    }

    #[tokio::test]
    async fn lookup_errors_are_not_masked() {
        let lookup = Arc::new(FixedLookup {
            known: EventId::new(),
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let validator = ReferentialValidator::new(lookup);
        let result = validator.validate(&candidate(EventId::new())).await;
        assert!(matches!(result, Err(GatewayError::Connection(_))));
    }

    #[tokio::test]
    async fn unchanged_reference_skips_lookup() {
        let known = EventId::new();
        let lookup = FixedLookup::new(known);
        let validator = ReferentialValidator::new(Arc::clone(&lookup) as Arc<dyn EventLookup>);

        let existing = Booking::create(candidate(known));
        let mut same_event = candidate(known);
        let Ok(other_email) = Email::parse("other@y.com") else {
            panic!("valid email rejected");
        };
        same_event.email = other_email;

        assert!(
            validator
                .validate_change(Some(&existing), &same_event)
                .await
                .is_ok()
        );
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);

        let moved = candidate(EventId::new());
        let result = validator.validate_change(Some(&existing), &moved).await;
        assert!(matches!(result, Err(GatewayError::ReferentialIntegrity(_))));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn inserts_always_validate() {
        let known = EventId::new();
        let lookup = FixedLookup::new(known);
        let validator = ReferentialValidator::new(Arc::clone(&lookup) as Arc<dyn EventLookup>);

        assert!(validator.validate_change(None, &candidate(known)).await.is_ok());
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }
}
