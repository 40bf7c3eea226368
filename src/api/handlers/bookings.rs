//! Booking handlers: create, update, get.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    BookingEnvelope, CreateBookingRequest, UpdateBookingRequest, parse_event_id,
};
use crate::app_state::AppState;
use crate::domain::BookingId;
use crate::error::{FailureResponse, GatewayError, MessageResponse};

/// `POST /api/bookings` — Book an email address onto an event.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] for malformed input and
/// [`GatewayError::ReferentialIntegrity`] if the event does not exist.
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    summary = "Create a booking",
    description = "Creates a booking after confirming the referenced event exists.",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingEnvelope),
        (status = 400, description = "Invalid event ID or email", body = MessageResponse),
        (status = 422, description = "Referenced event does not exist", body = FailureResponse),
        (status = 500, description = "Database configuration or connection error", body = MessageResponse),
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) = payload?;
    let event_id = parse_event_id(&req.event_id)?;
    let booking = state
        .booking_service
        .create_booking(event_id, &req.email)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingEnvelope {
            success: true,
            message: "Booking Created Successfully".to_string(),
            booking,
        }),
    ))
}

/// `PATCH /api/bookings/{id}` — Change a booking's event or email.
///
/// # Errors
///
/// Returns [`GatewayError::BookingNotFound`] for an unknown booking and
/// [`GatewayError::ReferentialIntegrity`] if it is moved to a missing
/// event.
#[utoipa::path(
    patch,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    summary = "Update a booking",
    description = "Updates the event reference and/or email. The event is re-checked only when it changes.",
    params(
        ("id" = uuid::Uuid, Path, description = "Booking UUID"),
    ),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = BookingEnvelope),
        (status = 400, description = "Invalid event ID or email", body = MessageResponse),
        (status = 404, description = "Booking not found", body = FailureResponse),
        (status = 422, description = "Referenced event does not exist", body = FailureResponse),
    )
)]
pub async fn update_booking(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
    payload: Result<Json<UpdateBookingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let patch = req.into_patch()?;
    let booking = state
        .booking_service
        .update_booking(BookingId::from_uuid(id), &patch)
        .await?;

    Ok(Json(BookingEnvelope {
        success: true,
        message: "Booking Updated Successfully".to_string(),
        booking,
    }))
}

/// `GET /api/bookings/{id}` — Fetch a booking.
///
/// # Errors
///
/// Returns [`GatewayError::BookingNotFound`] if the booking does not exist.
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    summary = "Get a booking",
    params(
        ("id" = uuid::Uuid, Path, description = "Booking UUID"),
    ),
    responses(
        (status = 200, description = "Booking found", body = BookingEnvelope),
        (status = 400, description = "Invalid booking ID", body = MessageResponse),
        (status = 404, description = "Booking not found", body = FailureResponse),
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Path(id) = id?;
    let booking = state
        .booking_service
        .get_booking(BookingId::from_uuid(id))
        .await?;

    Ok(Json(BookingEnvelope {
        success: true,
        message: "Booking Fetched Successfully".to_string(),
        booking,
    }))
}

/// Booking routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/{id}", get(get_booking).patch(update_booking))
}
