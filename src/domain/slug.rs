//! Normalized, case-insensitive event keys.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::GatewayError;

/// An event slug after trimming and lower-casing.
///
/// Every slug that reaches the store, whether written or looked up, goes
/// through [`Slug::parse`], so comparisons are insensitive to case and to
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Normalizes a raw external key.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the key is empty or
    /// whitespace-only.
    pub fn parse(raw: &str) -> Result<Self, GatewayError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GatewayError::Validation(
                "Invalid or missing slug parameter".to_string(),
            ));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Returns the normalized key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
