// ABOUTME: Database management for the Trailfit server
// ABOUTME: Owns the SQLite pool, runs migrations, and hosts per-entity operation modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Database Management
//!
//! A [`Database`] wraps a pooled SQLite connection and exposes one method per
//! entity operation, each issuing a single statement. The handle is cloned
//! into request handlers (no global singleton), so tests can construct their
//! own isolated instances against `sqlite::memory:`.

mod health_metrics;
mod hiking;
mod notifications;
mod profiles;
mod users;
mod workouts;

pub mod test_utils;

pub use health_metrics::CreateHealthMetricRequest;
pub use hiking::CreateHikingSessionRequest;
pub use notifications::CreateNotificationRequest;
pub use profiles::{CreateFitnessProfileRequest, UpdateFitnessProfileRequest};
pub use workouts::{CreateWorkoutRequest, UpdateWorkoutRequest};

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database handle for all persisted entities
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a database connection pool and run migrations
    ///
    /// Foreign keys are enforced on every connection; cascade and set-null
    /// behavior on user and workout deletion depends on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the pool cannot connect, or a
    /// migration statement fails.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory SQLite database exists per connection, so the pool must
        // hold exactly one connection and never recycle it.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the underlying pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run schema migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails.
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_fitness_profiles().await?;
        self.migrate_workouts().await?;
        self.migrate_health_metrics().await?;
        self.migrate_hiking_sessions().await?;
        self.migrate_notifications().await?;
        Ok(())
    }
}

/// Parse an RFC 3339 timestamp stored as TEXT
pub(super) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid timestamp in database: {e}")))
}

/// Parse an optional fixed-point decimal stored as TEXT
pub(super) fn parse_decimal(value: Option<String>) -> AppResult<Option<rust_decimal::Decimal>> {
    value
        .map(|s| {
            rust_decimal::Decimal::from_str(&s)
                .map_err(|e| AppError::internal(format!("Invalid decimal in database: {e}")))
        })
        .transpose()
}

/// Parse a UUID stored as TEXT
pub(super) fn parse_uuid(value: &str) -> AppResult<uuid::Uuid> {
    uuid::Uuid::parse_str(value)
        .map_err(|e| AppError::internal(format!("Invalid UUID in database: {e}")))
}
