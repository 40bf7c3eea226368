//! The event/booking scenario run directly against the service layer.

#![allow(clippy::panic)]

use std::sync::Arc;

use event_gateway::domain::{BookingCandidate, Email, Event, EventId, NewEvent, Slug};
use event_gateway::error::GatewayError;
use event_gateway::service::{ReferentialValidator, StoreEventLookup};
use event_gateway::store::{MemoryStore, StoreHandle};

fn demo_event() -> Event {
    let Ok(slug) = Slug::parse("demo-2024") else {
        panic!("valid slug rejected");
    };
    Event::create(NewEvent {
        slug,
        title: "Demo".to_string(),
        description: "Demo day".to_string(),
        location: None,
        starts_at: None,
        details: serde_json::Value::Null,
    })
}

fn candidate(event_id: EventId) -> BookingCandidate {
    let Ok(email) = Email::parse("x@y.com") else {
        panic!("valid email rejected");
    };
    BookingCandidate { event_id, email }
}

#[tokio::test]
async fn demo_scenario() {
    let store: StoreHandle = Arc::new(MemoryStore::new());
    let event = demo_event();
    tokio_test::assert_ok!(store.insert_event(&event).await);

    let Ok(key) = Slug::parse("Demo-2024") else {
        panic!("valid slug rejected");
    };
    let found = store.find_event_by_slug(&key).await.ok().flatten();
    assert_eq!(found.map(|e| e.id), Some(event.id));

    let validator = ReferentialValidator::new(Arc::new(StoreEventLookup::new(Arc::clone(&store))));
    tokio_test::assert_ok!(validator.validate(&candidate(event.id)).await);

    let missing = EventId::new();
    assert_eq!(
        validator.validate(&candidate(missing)).await,
        Err(GatewayError::ReferentialIntegrity(missing))
    );

    let Ok(absent) = Slug::parse("missing") else {
        panic!("valid slug rejected");
    };
    assert!(matches!(store.find_event_by_slug(&absent).await, Ok(None)));
}

#[tokio::test]
async fn deleted_event_no_longer_validates() {
    let store: StoreHandle = Arc::new(MemoryStore::new());
    let event = demo_event();
    tokio_test::assert_ok!(store.insert_event(&event).await);

    let validator = ReferentialValidator::new(Arc::new(StoreEventLookup::new(Arc::clone(&store))));
    tokio_test::assert_ok!(validator.validate(&candidate(event.id)).await);

    assert_eq!(store.delete_event(event.id).await.ok(), Some(true));
    let result = validator.validate(&candidate(event.id)).await;
    assert!(matches!(result, Err(GatewayError::ReferentialIntegrity(_))));
}
