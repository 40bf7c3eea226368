//! Event handlers: slug lookup, creation, and per-event bookings.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{BookingListResponse, CreateEventRequest, EventEnvelope};
use crate::app_state::AppState;
use crate::domain::Event;
use crate::error::{FailureResponse, GatewayError, MessageResponse};
use crate::service::SlugLookup;

/// `GET /api/events/{slug}` — Fetch a single event by its slug.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] for a blank slug,
/// [`GatewayError::EventNotFound`] when nothing matches, and connection or
/// configuration errors from the store.
#[utoipa::path(
    get,
    path = "/api/events/{slug}",
    tag = "Events",
    summary = "Get event by slug",
    description = "Looks up an event by slug. The slug is trimmed and lower-cased before matching.",
    params(
        ("slug" = String, Path, description = "Event slug (case-insensitive)"),
    ),
    responses(
        (status = 200, description = "Event found", body = EventEnvelope),
        (status = 400, description = "Invalid or missing slug", body = MessageResponse),
        (status = 404, description = "Event not found", body = FailureResponse),
        (status = 500, description = "Database configuration or connection error", body = MessageResponse),
    )
)]
pub async fn get_event_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let event = found_or_404(state.event_service.find_by_slug(&slug).await?)?;

    Ok(Json(EventEnvelope {
        success: true,
        message: "Event Fetched Successfully".to_string(),
        event,
    }))
}

/// `POST /api/events` — Create an event.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] for a blank slug or title and
/// [`GatewayError::Conflict`] if the normalized slug is taken.
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    summary = "Create an event",
    description = "Creates an event. The slug is normalized and must be unique.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventEnvelope),
        (status = 400, description = "Invalid request", body = MessageResponse),
        (status = 409, description = "Slug already in use", body = FailureResponse),
        (status = 500, description = "Database configuration or connection error", body = MessageResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) = payload?;
    let input = req.into_new_event()?;
    let event = state.event_service.create_event(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(EventEnvelope {
            success: true,
            message: "Event Created Successfully".to_string(),
            event,
        }),
    ))
}

/// `GET /api/events/{slug}/bookings` — List bookings for an event.
///
/// # Errors
///
/// Same as [`get_event_by_slug`].
#[utoipa::path(
    get,
    path = "/api/events/{slug}/bookings",
    tag = "Events",
    summary = "List bookings for an event",
    description = "Returns every booking that references the event, oldest first.",
    params(
        ("slug" = String, Path, description = "Event slug (case-insensitive)"),
    ),
    responses(
        (status = 200, description = "Bookings for the event", body = BookingListResponse),
        (status = 400, description = "Invalid or missing slug", body = MessageResponse),
        (status = 404, description = "Event not found", body = FailureResponse),
        (status = 500, description = "Database configuration or connection error", body = MessageResponse),
    )
)]
pub async fn list_event_bookings(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let event = found_or_404(state.event_service.find_by_slug(&slug).await?)?;
    let bookings = state.booking_service.list_for_event(event.id).await?;

    Ok(Json(BookingListResponse {
        success: true,
        bookings,
    }))
}

fn found_or_404(lookup: SlugLookup) -> Result<Event, GatewayError> {
    match lookup {
        SlugLookup::Found(event) => Ok(event),
        SlugLookup::NotFound(slug) => Err(GatewayError::EventNotFound(slug.to_string())),
    }
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event))
        .route("/events/{slug}", get(get_event_by_slug))
        .route("/events/{slug}/bookings", get(list_event_bookings))
}
