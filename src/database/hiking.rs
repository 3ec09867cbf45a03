// ABOUTME: Hiking session table operations
// ABOUTME: Immutable sessions with list, by-id, recent window and create
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{parse_decimal, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::HikingSession;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

/// Maximum rows returned by the recent-hikes query
const RECENT_HIKES_LIMIT: i64 = 3;

/// Request to log a hiking session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHikingSessionRequest {
    /// Calendar day of the hike
    pub date: NaiveDate,
    /// Distance covered in kilometers
    pub distance_km: Option<Decimal>,
    /// Elevation gained in meters
    pub elevation_gain_m: Option<Decimal>,
    /// Duration in minutes
    pub duration_minutes: Option<i32>,
    /// Calories burned
    pub calories_burned: Option<i32>,
    /// Route or trail name
    pub route_name: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl Database {
    /// Create the hiking_sessions table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_hiking_sessions(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS hiking_sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                distance_km TEXT,
                elevation_gain_m TEXT,
                duration_minutes INTEGER,
                calories_burned INTEGER,
                route_name TEXT,
                notes TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_hiking_sessions_user_date ON hiking_sessions(user_id, date)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get all hiking sessions for a user, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_hiking_sessions(&self, user_id: Uuid) -> AppResult<Vec<HikingSession>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, date, distance_km, elevation_gain_m,
                   duration_minutes, calories_burned, route_name, notes, created_at
            FROM hiking_sessions
            WHERE user_id = $1
            ORDER BY date DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(row_to_session).collect()
    }

    /// Get a hiking session by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_hiking_session(&self, id: Uuid) -> AppResult<Option<HikingSession>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, date, distance_km, elevation_gain_m,
                   duration_minutes, calories_burned, route_name, notes, created_at
            FROM hiking_sessions
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await?;

        row.map(|r| row_to_session(&r)).transpose()
    }

    /// Get the three most recent hiking sessions by date
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_recent_hiking_sessions(
        &self,
        user_id: Uuid,
    ) -> AppResult<Vec<HikingSession>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, date, distance_km, elevation_gain_m,
                   duration_minutes, calories_burned, route_name, notes, created_at
            FROM hiking_sessions
            WHERE user_id = $1
            ORDER BY date DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(RECENT_HIKES_LIMIT)
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(row_to_session).collect()
    }

    /// Log a hiking session
    ///
    /// Sessions are immutable: no update or delete path exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_hiking_session(
        &self,
        user_id: Uuid,
        request: &CreateHikingSessionRequest,
    ) -> AppResult<HikingSession> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO hiking_sessions (
                id, user_id, date, distance_km, elevation_gain_m,
                duration_minutes, calories_burned, route_name, notes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(request.date)
        .bind(request.distance_km.map(|d| d.to_string()))
        .bind(request.elevation_gain_m.map(|d| d.to_string()))
        .bind(request.duration_minutes)
        .bind(request.calories_burned)
        .bind(&request.route_name)
        .bind(&request.notes)
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create hiking session: {e}")))?;

        Ok(HikingSession {
            id,
            user_id,
            date: request.date,
            distance_km: request.distance_km,
            elevation_gain_m: request.elevation_gain_m,
            duration_minutes: request.duration_minutes,
            calories_burned: request.calories_burned,
            route_name: request.route_name.clone(),
            notes: request.notes.clone(),
            created_at: now,
        })
    }
}

/// Convert a database row to a `HikingSession`
fn row_to_session(row: &SqliteRow) -> AppResult<HikingSession> {
    let id_str: String = row.get("id");
    let user_id_str: String = row.get("user_id");
    let distance: Option<String> = row.get("distance_km");
    let elevation: Option<String> = row.get("elevation_gain_m");
    let created_at_str: String = row.get("created_at");

    Ok(HikingSession {
        id: parse_uuid(&id_str)?,
        user_id: parse_uuid(&user_id_str)?,
        date: row.get("date"),
        distance_km: parse_decimal(distance)?,
        elevation_gain_m: parse_decimal(elevation)?,
        duration_minutes: row.get("duration_minutes"),
        calories_burned: row.get("calories_burned"),
        route_name: row.get("route_name"),
        notes: row.get("notes"),
        created_at: parse_timestamp(&created_at_str)?,
    })
}
