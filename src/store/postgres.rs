//! PostgreSQL implementation of the document store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::DocumentStore;
use crate::config::PoolSettings;
use crate::domain::{Booking, BookingId, Email, Event, EventId, Slug};
use crate::error::GatewayError;

/// Tables are created on connect when absent. There is deliberately no
/// foreign key from `bookings.event_id` to `events.id`.
const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS events (\
        id UUID PRIMARY KEY, \
        slug TEXT NOT NULL UNIQUE, \
        title TEXT NOT NULL, \
        description TEXT NOT NULL, \
        location TEXT, \
        starts_at TIMESTAMPTZ, \
        details JSONB NOT NULL DEFAULT 'null'::jsonb, \
        created_at TIMESTAMPTZ NOT NULL, \
        updated_at TIMESTAMPTZ NOT NULL)",
    "CREATE TABLE IF NOT EXISTS bookings (\
        id UUID PRIMARY KEY, \
        event_id UUID NOT NULL, \
        email TEXT NOT NULL, \
        created_at TIMESTAMPTZ NOT NULL, \
        updated_at TIMESTAMPTZ NOT NULL)",
    "CREATE INDEX IF NOT EXISTS bookings_event_id_idx ON bookings (event_id)",
];

const EVENT_COLUMNS: &str =
    "id, slug, title, description, location, starts_at, details, created_at, updated_at";

type EventRow = (
    Uuid,
    String,
    String,
    String,
    Option<String>,
    Option<DateTime<Utc>>,
    serde_json::Value,
    DateTime<Utc>,
    DateTime<Utc>,
);

type BookingRow = (Uuid, Uuid, String, DateTime<Utc>, DateTime<Utc>);

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wraps an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `url` and makes sure the tables exist.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Connection`] if the server cannot be reached
    /// or the schema statements fail.
    pub async fn connect(url: &str, settings: &PoolSettings) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .connect(url)
            .await
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(|e| GatewayError::Connection(e.to_string()))?;
        }

        Ok(Self::new(pool))
    }
}

fn event_from_row(row: EventRow) -> Result<Event, GatewayError> {
    let (id, slug, title, description, location, starts_at, details, created_at, updated_at) = row;
    Ok(Event {
        id: EventId::from_uuid(id),
        slug: Slug::parse(&slug)
            .map_err(|_| GatewayError::Persistence(format!("stored event {id} has no slug")))?,
        title,
        description,
        location,
        starts_at,
        details,
        created_at,
        updated_at,
    })
}

fn booking_from_row(row: BookingRow) -> Result<Booking, GatewayError> {
    let (id, event_id, email, created_at, updated_at) = row;
    Ok(Booking {
        id: BookingId::from_uuid(id),
        event_id: EventId::from_uuid(event_id),
        email: Email::parse(&email).map_err(|_| {
            GatewayError::Persistence(format!("stored booking {id} has an invalid email"))
        })?,
        created_at,
        updated_at,
    })
}

fn conflict_or_persistence(err: sqlx::Error, conflict: impl FnOnce() -> String) -> GatewayError {
    if let sqlx::Error::Database(db) = &err
        && db.is_unique_violation()
    {
        return GatewayError::Conflict(conflict());
    }
    GatewayError::from(err)
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn find_event_by_id(&self, id: EventId) -> Result<Option<Event>, GatewayError> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(event_from_row).transpose()
    }

    async fn find_event_by_slug(&self, slug: &Slug) -> Result<Option<Event>, GatewayError> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(event_from_row).transpose()
    }

    async fn insert_event(&self, event: &Event) -> Result<(), GatewayError> {
        sqlx::query(&format!(
            "INSERT INTO events ({EVENT_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        ))
        .bind(*event.id.as_uuid())
        .bind(event.slug.as_str())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.location.as_deref())
        .bind(event.starts_at)
        .bind(&event.details)
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            conflict_or_persistence(e, || {
                format!("Event with slug '{}' already exists", event.slug)
            })
        })?;

        Ok(())
    }

    async fn delete_event(&self, id: EventId) -> Result<bool, GatewayError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_booking(&self, id: BookingId) -> Result<Option<Booking>, GatewayError> {
        let row = sqlx::query_as::<_, BookingRow>(
            "SELECT id, event_id, email, created_at, updated_at FROM bookings WHERE id = $1",
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(booking_from_row).transpose()
    }

    async fn insert_booking(&self, booking: &Booking) -> Result<(), GatewayError> {
        sqlx::query(
            "INSERT INTO bookings (id, event_id, email, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(*booking.id.as_uuid())
        .bind(*booking.event_id.as_uuid())
        .bind(booking.email.as_str())
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_or_persistence(e, || format!("Booking '{}' already exists", booking.id)))?;

        Ok(())
    }

    async fn update_booking(&self, booking: &Booking) -> Result<(), GatewayError> {
        let result = sqlx::query(
            "UPDATE bookings SET event_id = $2, email = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(*booking.id.as_uuid())
        .bind(*booking.event_id.as_uuid())
        .bind(booking.email.as_str())
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(GatewayError::BookingNotFound(booking.id));
        }
        Ok(())
    }

    async fn list_bookings_for_event(
        &self,
        event_id: EventId,
    ) -> Result<Vec<Booking>, GatewayError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT id, event_id, email, created_at, updated_at FROM bookings \
             WHERE event_id = $1 ORDER BY created_at ASC",
        )
        .bind(*event_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(booking_from_row).collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn event_row(slug: &str) -> EventRow {
        let now = Utc::now();
        (
            Uuid::new_v4(),
            slug.to_string(),
            "Demo".to_string(),
            "Demo day".to_string(),
            None,
            None,
            serde_json::Value::Null,
            now,
            now,
        )
    }

    fn booking_row(email: &str) -> BookingRow {
        let now = Utc::now();
        (Uuid::new_v4(), Uuid::new_v4(), email.to_string(), now, now)
    }

    #[test]
    fn maps_stored_event_row() {
        let row = event_row("demo-2024");
        let id = row.0;
        let Ok(event) = event_from_row(row) else {
            panic!("valid row rejected");
        };
        assert_eq!(event.id, EventId::from_uuid(id));
        assert_eq!(event.slug.as_str(), "demo-2024");
    }

    #[test]
    fn blank_stored_slug_is_a_persistence_error() {
        let result = event_from_row(event_row("   "));
        assert!(matches!(result, Err(GatewayError::Persistence(_))));
    }

    #[test]
    fn maps_stored_booking_row() {
        let Ok(booking) = booking_from_row(booking_row("x@y.com")) else {
            panic!("valid row rejected");
        };
        assert_eq!(booking.email.as_str(), "x@y.com");
    }

    #[test]
    fn invalid_stored_email_is_a_persistence_error() {
        let result = booking_from_row(booking_row("not-an-email"));
        assert!(matches!(result, Err(GatewayError::Persistence(_))));
    }
}
