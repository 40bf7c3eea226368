//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names are camelCase on the wire.

pub mod booking_dto;
pub mod event_dto;

pub use booking_dto::*;
pub use event_dto::*;
