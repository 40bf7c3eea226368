//! Event documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EventId, Slug};

/// A stored event, keyed externally by its normalized [`Slug`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-assigned identity.
    pub id: EventId,
    /// Unique, normalized human key.
    pub slug: Slug,
    /// Display title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Venue or online location.
    pub location: Option<String>,
    /// Scheduled start, if known.
    pub starts_at: Option<DateTime<Utc>>,
    /// Arbitrary descriptive fields.
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating an [`Event`].
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Normalized slug.
    pub slug: Slug,
    /// Display title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Venue or online location.
    pub location: Option<String>,
    /// Scheduled start.
    pub starts_at: Option<DateTime<Utc>>,
    /// Arbitrary descriptive fields.
    pub details: serde_json::Value,
}

impl Event {
    /// Materializes a new event with a fresh identity and timestamps.
    #[must_use]
    pub fn create(input: NewEvent) -> Self {
        let now = Utc::now();
        Self {
            id: EventId::new(),
            slug: input.slug,
            title: input.title,
            description: input.description,
            location: input.location,
            starts_at: input.starts_at,
            details: input.details,
            created_at: now,
            updated_at: now,
        }
    }
}
