//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). The connection string is optional at
//! startup; a missing `DATABASE_URL` only surfaces as
//! [`crate::error::GatewayError::Config`] when a request first needs the
//! store.

use std::net::SocketAddr;

/// Connection pool tuning passed to SQL backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum number of database connections in the pool.
    pub max_connections: u32,

    /// Minimum idle connections in the pool.
    pub min_connections: u32,

    /// Timeout in seconds for establishing a database connection.
    pub connect_timeout_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 0,
            connect_timeout_secs: 5,
        }
    }
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Store connection string (`postgres://...` or `memory://`).
    pub database_url: Option<String>,

    /// Pool tuning for SQL backends.
    pub pool: PoolSettings,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let database_url = non_blank(std::env::var("DATABASE_URL").ok());

        let defaults = PoolSettings::default();
        let pool = PoolSettings {
            max_connections: parse_env("DATABASE_MAX_CONNECTIONS", defaults.max_connections),
            min_connections: parse_env("DATABASE_MIN_CONNECTIONS", defaults.min_connections),
            connect_timeout_secs: parse_env(
                "DATABASE_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            ),
        };

        Ok(Self {
            listen_addr,
            database_url,
            pool,
        })
    }
}

/// Treats empty or whitespace-only values as unset.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_urls_are_unset() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(
            non_blank(Some(" memory:// ".to_string())),
            Some("memory://".to_string())
        );
    }

    #[test]
    fn parse_env_falls_back_on_missing_key() {
        let value: u32 = parse_env("EVENT_GATEWAY_TEST_UNSET_KEY", 7);
        assert_eq!(value, 7);
    }
}
