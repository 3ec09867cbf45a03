// ABOUTME: Health metric table operations
// ABOUTME: Immutable readings with list, by-id, today filter and create
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::HealthMetric;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

/// Request to record a health metric reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHealthMetricRequest {
    /// Calendar day the reading belongs to
    pub date: NaiveDate,
    /// Resting heart rate before activity (bpm)
    pub heart_rate_pre: Option<i32>,
    /// Heart rate after activity (bpm)
    pub heart_rate_post: Option<i32>,
    /// Step count
    pub steps: Option<i32>,
    /// Calories burned
    pub calories_burned: Option<i32>,
    /// Workout this reading is attached to
    pub workout_id: Option<Uuid>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl Database {
    /// Create the health_metrics table
    ///
    /// `workout_id` is nulled rather than cascaded when the referenced workout
    /// is deleted; the reading itself survives.
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_health_metrics(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS health_metrics (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                heart_rate_pre INTEGER,
                heart_rate_post INTEGER,
                steps INTEGER,
                calories_burned INTEGER,
                workout_id TEXT REFERENCES workouts(id) ON DELETE SET NULL,
                notes TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_health_metrics_user_date ON health_metrics(user_id, date)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get all health metrics for a user, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_health_metrics(&self, user_id: Uuid) -> AppResult<Vec<HealthMetric>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, date, heart_rate_pre, heart_rate_post,
                   steps, calories_burned, workout_id, notes, created_at
            FROM health_metrics
            WHERE user_id = $1
            ORDER BY date DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(row_to_metric).collect()
    }

    /// Get a health metric by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_health_metric(&self, id: Uuid) -> AppResult<Option<HealthMetric>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, date, heart_rate_pre, heart_rate_post,
                   steps, calories_burned, workout_id, notes, created_at
            FROM health_metrics
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await?;

        row.map(|r| row_to_metric(&r)).transpose()
    }

    /// Get the metrics recorded for the given calendar day
    ///
    /// Multiple readings per day are allowed; all of them are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_today_health_metrics(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<Vec<HealthMetric>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, date, heart_rate_pre, heart_rate_post,
                   steps, calories_burned, workout_id, notes, created_at
            FROM health_metrics
            WHERE user_id = $1 AND date = $2
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.to_string())
        .bind(today)
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(row_to_metric).collect()
    }

    /// Record a health metric reading
    ///
    /// Readings are immutable: no update or delete path exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (for example a `workout_id`
    /// referencing no workout).
    pub async fn create_health_metric(
        &self,
        user_id: Uuid,
        request: &CreateHealthMetricRequest,
    ) -> AppResult<HealthMetric> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO health_metrics (
                id, user_id, date, heart_rate_pre, heart_rate_post,
                steps, calories_burned, workout_id, notes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(request.date)
        .bind(request.heart_rate_pre)
        .bind(request.heart_rate_post)
        .bind(request.steps)
        .bind(request.calories_burned)
        .bind(request.workout_id.map(|w| w.to_string()))
        .bind(&request.notes)
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create health metric: {e}")))?;

        Ok(HealthMetric {
            id,
            user_id,
            date: request.date,
            heart_rate_pre: request.heart_rate_pre,
            heart_rate_post: request.heart_rate_post,
            steps: request.steps,
            calories_burned: request.calories_burned,
            workout_id: request.workout_id,
            notes: request.notes.clone(),
            created_at: now,
        })
    }
}

/// Convert a database row to a `HealthMetric`
fn row_to_metric(row: &SqliteRow) -> AppResult<HealthMetric> {
    let id_str: String = row.get("id");
    let user_id_str: String = row.get("user_id");
    let workout_id_str: Option<String> = row.get("workout_id");
    let created_at_str: String = row.get("created_at");

    Ok(HealthMetric {
        id: parse_uuid(&id_str)?,
        user_id: parse_uuid(&user_id_str)?,
        date: row.get("date"),
        heart_rate_pre: row.get("heart_rate_pre"),
        heart_rate_post: row.get("heart_rate_post"),
        steps: row.get("steps"),
        calories_burned: row.get("calories_burned"),
        workout_id: workout_id_str.as_deref().map(parse_uuid).transpose()?,
        notes: row.get("notes"),
        created_at: parse_timestamp(&created_at_str)?,
    })
}
