//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::{
    BookingEnvelope, BookingListResponse, CreateBookingRequest, CreateEventRequest, EventEnvelope,
    UpdateBookingRequest,
};
use super::handlers::{bookings, events, system};
use crate::connection::CacheState;
use crate::domain::{Booking, Event};
use crate::error::{FailureResponse, MessageResponse};

/// Generated OpenAPI specification, served by Swagger UI when the
/// `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "event-gateway", description = "Events and bookings over a document store"),
    paths(
        events::get_event_by_slug,
        events::create_event,
        events::list_event_bookings,
        bookings::create_booking,
        bookings::update_booking,
        bookings::get_booking,
        system::health_handler,
    ),
    components(schemas(
        Event,
        Booking,
        EventEnvelope,
        BookingEnvelope,
        BookingListResponse,
        CreateEventRequest,
        CreateBookingRequest,
        UpdateBookingRequest,
        MessageResponse,
        FailureResponse,
        CacheState,
        system::HealthResponse,
    )),
    tags(
        (name = "Events", description = "Event lookup and creation"),
        (name = "Bookings", description = "Booking write path"),
        (name = "System", description = "Health"),
    )
)]
pub struct ApiDoc;
