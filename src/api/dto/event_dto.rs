//! Event DTOs for lookup and creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Event, NewEvent, Slug};
use crate::error::GatewayError;

/// Request body for `POST /api/events`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Human key; normalized before storage.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Venue or online location.
    #[serde(default)]
    pub location: Option<String>,
    /// Scheduled start.
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    /// Arbitrary descriptive fields.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
}

impl CreateEventRequest {
    /// Validates the request into a [`NewEvent`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for a blank slug or title.
    pub fn into_new_event(self) -> Result<NewEvent, GatewayError> {
        let slug = Slug::parse(&self.slug)?;
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(GatewayError::Validation("Title is required".to_string()));
        }
        Ok(NewEvent {
            slug,
            title,
            description: self.description.trim().to_string(),
            location: self.location.map(|l| l.trim().to_string()).filter(|l| !l.is_empty()),
            starts_at: self.starts_at,
            details: self.details,
        })
    }
}

/// Success envelope carrying one event.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventEnvelope {
    /// Always `true`.
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
    /// The event.
    pub event: Event,
}
