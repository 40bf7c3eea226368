//! Booking contact addresses.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::GatewayError;

// Pattern is a literal.
#[allow(clippy::expect_used)]
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// A trimmed, lower-cased address with a basic `local@domain.tld` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Normalizes and validates a raw address.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the address is missing or
    /// does not look like an email address.
    pub fn parse(raw: &str) -> Result<Self, GatewayError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(GatewayError::Validation("Email is required".to_string()));
        }
        if !EMAIL_SHAPE.is_match(&normalized) {
            return Err(GatewayError::Validation("Invalid email format".to_string()));
        }
        Ok(Self(normalized))
    }

    /// Returns the normalized address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let Ok(email) = Email::parse("  X@Y.com ") else {
            panic!("valid email rejected");
        };
        assert_eq!(email.as_str(), "x@y.com");
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in ["", "plain", "a@b", "a b@c.com", "@b.com", "a@@b.com"] {
            assert!(Email::parse(raw).is_err(), "{raw:?} accepted");
        }
    }
}
