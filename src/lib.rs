//! # event-gateway
//!
//! REST gateway exposing events and bookings backed by a document store.
//!
//! The HTTP layer is thin glue. The interesting parts sit underneath it:
//! a process-wide lazy connection cache that establishes at most one
//! store connection however many requests arrive at once, and a
//! referential check that keeps bookings pointing at existing events in
//! a store that does not enforce references itself.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── EventService / BookingService (service/)
//!     ├── ReferentialValidator (service/)
//!     │
//!     ├── HandleCache (connection/)
//!     │
//!     └── DocumentStore: PostgreSQL | in-memory (store/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod connection;
pub mod domain;
pub mod error;
pub mod service;
pub mod store;
