//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Every
//! failure kind stays distinct all the way to the boundary, where
//! [`IntoResponse`] maps it onto the JSON envelope clients expect.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{BookingId, EventId};

/// Error body for malformed input and server-side failures.
///
/// ```json
/// { "message": "Invalid or missing slug parameter" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable error message.
    pub message: String,
}

/// Error body for absent resources and rejected writes.
///
/// ```json
/// { "success": false, "error": "Event with slug 'missing' not found" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct FailureResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable error message.
    pub error: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant                | HTTP Status | Body                    |
/// |------------------------|-------------|-------------------------|
/// | `Validation`           | 400         | `{message}`             |
/// | `EventNotFound`        | 404         | `{success, error}`      |
/// | `BookingNotFound`      | 404         | `{success, error}`      |
/// | `Conflict`             | 409         | `{success, error}`      |
/// | `ReferentialIntegrity` | 422         | `{success, error}`      |
/// | `Config`               | 500         | `{message}`             |
/// | `Connection`           | 500         | `{message}`             |
/// | `Persistence`          | 500         | `{message}`             |
///
/// The type is `Clone` because a single connection outcome is delivered
/// to every caller that joined the same attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Malformed caller input.
    #[error("{0}")]
    Validation(String),

    /// No event matches the given normalized slug.
    #[error("Event with slug '{0}' not found")]
    EventNotFound(String),

    /// No booking has the given identity.
    #[error("Booking '{0}' not found")]
    BookingNotFound(BookingId),

    /// A unique key is already taken.
    #[error("{0}")]
    Conflict(String),

    /// A booking references an event that does not exist.
    #[error("Referenced event {0} does not exist")]
    ReferentialIntegrity(EventId),

    /// Required connection parameters are missing or unusable.
    #[error("Database configuration error: {0}")]
    Config(String),

    /// The connection attempt to the backing store failed.
    #[error("Database connection failed: {0}")]
    Connection(String),

    /// A query against a live store failed.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl GatewayError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::EventNotFound(_) | Self::BookingNotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::ReferentialIntegrity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Config(_) | Self::Connection(_) | Self::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns `true` for the kinds that carry a `{success, error}` body.
    #[must_use]
    pub const fn is_failure_envelope(&self) -> bool {
        matches!(
            self,
            Self::EventNotFound(_)
                | Self::BookingNotFound(_)
                | Self::Conflict(_)
                | Self::ReferentialIntegrity(_)
        )
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for GatewayError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let mut response = if self.is_failure_envelope() {
            axum::Json(FailureResponse {
                success: false,
                error: self.to_string(),
            })
            .into_response()
        } else {
            axum::Json(MessageResponse {
                message: self.to_string(),
            })
            .into_response()
        };
        *response.status_mut() = status;
        response
    }
}
