//! URL-scheme dispatch from a connection string to a store backend.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Connector, MemoryStore, PostgresStore, StoreHandle};
use crate::config::PoolSettings;
use crate::error::GatewayError;

/// Default [`Connector`]: `postgres://` and `postgresql://` open a
/// [`PostgresStore`]; `memory://` creates a fresh [`MemoryStore`].
#[derive(Debug, Clone, Default)]
pub struct StoreConnector {
    pool: PoolSettings,
}

impl StoreConnector {
    /// Creates a connector using the given pool tuning for SQL backends.
    #[must_use]
    pub fn new(pool: PoolSettings) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Connector for StoreConnector {
    async fn connect(&self, url: &str) -> Result<StoreHandle, GatewayError> {
        let scheme = url.split_once("://").map(|(scheme, _)| scheme);
        match scheme {
            Some("postgres" | "postgresql") => {
                let store = PostgresStore::connect(url, &self.pool).await?;
                Ok(Arc::new(store))
            }
            Some("memory") => Ok(Arc::new(MemoryStore::new())),
            _ => Err(GatewayError::Config(format!(
                "unsupported DATABASE_URL scheme in '{}'",
                redact(url)
            ))),
        }
    }
}

/// Strips credentials so connection strings can be logged.
fn redact(url: &str) -> String {
    match (url.split_once("://"), url.rsplit_once('@')) {
        (Some((scheme, _)), Some((_, host))) => format!("{scheme}://***@{host}"),
        _ => url.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_scheme_connects() {
        let connector = StoreConnector::default();
        assert!(connector.connect("memory://").await.is_ok());
    }

    #[tokio::test]
    async fn unknown_scheme_is_a_config_error() {
        let connector = StoreConnector::default();
        let result = connector.connect("mongodb://user:pw@host/db").await;
        let Err(GatewayError::Config(message)) = result else {
            panic!("expected config error");
        };
        assert!(!message.contains("pw"));
    }

    #[test]
    fn redact_hides_credentials() {
        assert_eq!(redact("postgres://u:p@db:5432/x"), "postgres://***@db:5432/x");
        assert_eq!(redact("memory://"), "memory://");
    }
}
