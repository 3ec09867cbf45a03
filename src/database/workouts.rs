// ABOUTME: Workout table operations
// ABOUTME: CRUD plus the upcoming-window query and the one-way completion transition
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{Workout, WorkoutType};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

/// Maximum rows returned by the upcoming-workouts query
const UPCOMING_WORKOUTS_LIMIT: i64 = 5;

/// Request to create a workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkoutRequest {
    /// Display name
    pub name: String,
    /// Workout classification
    #[serde(rename = "type", default)]
    pub workout_type: WorkoutType,
    /// Optional description
    pub description: Option<String>,
    /// Exercise list as an opaque text blob
    pub exercises: Option<String>,
    /// Planned duration in minutes
    pub duration_minutes: Option<i32>,
    /// Calendar day the workout is scheduled for
    pub scheduled_date: Option<NaiveDate>,
}

/// Request to partially update a workout; absent fields keep their value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWorkoutRequest {
    /// New name (if provided)
    pub name: Option<String>,
    /// New classification (if provided)
    #[serde(rename = "type")]
    pub workout_type: Option<WorkoutType>,
    /// New description (if provided)
    pub description: Option<String>,
    /// New exercise blob (if provided)
    pub exercises: Option<String>,
    /// New duration in minutes (if provided)
    pub duration_minutes: Option<i32>,
    /// New scheduled day (if provided)
    pub scheduled_date: Option<NaiveDate>,
}

impl Database {
    /// Create the workouts table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                type TEXT NOT NULL,
                description TEXT,
                exercises TEXT,
                duration_minutes INTEGER,
                scheduled_date TEXT,
                completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_workouts_user ON workouts(user_id)")
            .execute(self.pool())
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workouts_scheduled ON workouts(user_id, scheduled_date)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get all workouts for a user, newest scheduled first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_workouts(&self, user_id: Uuid) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, type, description, exercises,
                   duration_minutes, scheduled_date, completed, created_at
            FROM workouts
            WHERE user_id = $1
            ORDER BY scheduled_date DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(row_to_workout).collect()
    }

    /// Get a workout by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_workout(&self, id: Uuid) -> AppResult<Option<Workout>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, name, type, description, exercises,
                   duration_minutes, scheduled_date, completed, created_at
            FROM workouts
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await?;

        row.map(|r| row_to_workout(&r)).transpose()
    }

    /// Get up to five workouts scheduled today or later, ascending by date
    ///
    /// Workouts with no scheduled date are excluded.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_upcoming_workouts(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, type, description, exercises,
                   duration_minutes, scheduled_date, completed, created_at
            FROM workouts
            WHERE user_id = $1 AND scheduled_date >= $2
            ORDER BY scheduled_date ASC
            LIMIT $3
            ",
        )
        .bind(user_id.to_string())
        .bind(today)
        .bind(UPCOMING_WORKOUTS_LIMIT)
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(row_to_workout).collect()
    }

    /// Create a workout, scheduled and incomplete
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_workout(
        &self,
        user_id: Uuid,
        request: &CreateWorkoutRequest,
    ) -> AppResult<Workout> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO workouts (
                id, user_id, name, type, description, exercises,
                duration_minutes, scheduled_date, completed, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, $9)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(&request.name)
        .bind(request.workout_type.as_str())
        .bind(&request.description)
        .bind(&request.exercises)
        .bind(request.duration_minutes)
        .bind(request.scheduled_date)
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

        Ok(Workout {
            id,
            user_id,
            name: request.name.clone(),
            workout_type: request.workout_type,
            description: request.description.clone(),
            exercises: request.exercises.clone(),
            duration_minutes: request.duration_minutes,
            scheduled_date: request.scheduled_date,
            completed: false,
            created_at: now,
        })
    }

    /// Partially update a workout
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the workout does not exist.
    pub async fn update_workout(
        &self,
        id: Uuid,
        request: &UpdateWorkoutRequest,
    ) -> AppResult<Workout> {
        let result = sqlx::query(
            r"
            UPDATE workouts SET
                name = COALESCE($2, name),
                type = COALESCE($3, type),
                description = COALESCE($4, description),
                exercises = COALESCE($5, exercises),
                duration_minutes = COALESCE($6, duration_minutes),
                scheduled_date = COALESCE($7, scheduled_date)
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(&request.name)
        .bind(request.workout_type.map(|t| t.as_str()))
        .bind(&request.description)
        .bind(&request.exercises)
        .bind(request.duration_minutes)
        .bind(request.scheduled_date)
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to update workout: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::entity_not_found("Workout", id));
        }

        self.get_workout(id)
            .await?
            .ok_or_else(|| AppError::entity_not_found("Workout", id))
    }

    /// Mark a workout completed
    ///
    /// Unconditional set-to-true: reapplying to an already-completed workout
    /// succeeds with no further effect.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the workout does not exist or belongs to
    /// another user.
    pub async fn mark_workout_complete(&self, user_id: Uuid, id: Uuid) -> AppResult<Workout> {
        let result = sqlx::query("UPDATE workouts SET completed = 1 WHERE id = $1 AND user_id = $2")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::entity_not_found("Workout", id));
        }

        self.get_workout(id)
            .await?
            .ok_or_else(|| AppError::entity_not_found("Workout", id))
    }

    /// Delete a workout
    ///
    /// Not exposed over REST (workouts have no delete transition); retained
    /// for maintenance. Health metrics referencing the workout keep their rows
    /// with `workout_id` nulled.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the workout does not exist.
    pub async fn delete_workout(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id.to_string())
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::entity_not_found("Workout", id));
        }
        Ok(())
    }
}

/// Convert a database row to a `Workout`
fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
    let id_str: String = row.get("id");
    let user_id_str: String = row.get("user_id");
    let type_str: String = row.get("type");
    let completed: i64 = row.get("completed");
    let created_at_str: String = row.get("created_at");

    Ok(Workout {
        id: parse_uuid(&id_str)?,
        user_id: parse_uuid(&user_id_str)?,
        name: row.get("name"),
        workout_type: WorkoutType::parse(&type_str),
        description: row.get("description"),
        exercises: row.get("exercises"),
        duration_minutes: row.get("duration_minutes"),
        scheduled_date: row.get("scheduled_date"),
        completed: completed == 1,
        created_at: parse_timestamp(&created_at_str)?,
    })
}
