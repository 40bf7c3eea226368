//! Process-wide lazy connection to the backing store.
//!
//! [`HandleCache`] owns the single shared [`crate::store::StoreHandle`].
//! It is created once at startup, stored in [`crate::app_state::AppState`]
//! and connects on the first [`HandleCache::acquire`] call.

pub mod cache;

pub use cache::{CacheState, HandleCache};
