// ABOUTME: Fitness profile table operations
// ABOUTME: Create-then-replace lifecycle with partial updates and most-recent-row lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{parse_decimal, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{FitnessGoal, FitnessLevel, FitnessProfile};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

/// Request to create a fitness profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateFitnessProfileRequest {
    /// Self-reported gender
    pub gender: Option<String>,
    /// Age in years
    pub age: Option<i32>,
    /// Body weight in kilograms
    pub weight_kg: Option<Decimal>,
    /// Height in centimeters
    pub height_cm: Option<Decimal>,
    /// Declared fitness goal
    pub fitness_goal: Option<FitnessGoal>,
    /// Declared experience level
    pub fitness_level: Option<FitnessLevel>,
    /// Free-text training preferences
    pub preferences: Option<String>,
}

/// Request to partially update a fitness profile; absent fields keep their value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFitnessProfileRequest {
    /// New gender (if provided)
    pub gender: Option<String>,
    /// New age (if provided)
    pub age: Option<i32>,
    /// New weight in kilograms (if provided)
    pub weight_kg: Option<Decimal>,
    /// New height in centimeters (if provided)
    pub height_cm: Option<Decimal>,
    /// New fitness goal (if provided)
    pub fitness_goal: Option<FitnessGoal>,
    /// New experience level (if provided)
    pub fitness_level: Option<FitnessLevel>,
    /// New preferences (if provided)
    pub preferences: Option<String>,
}

impl Database {
    /// Create the fitness_profiles table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_fitness_profiles(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS fitness_profiles (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                gender TEXT,
                age INTEGER,
                weight_kg TEXT,
                height_cm TEXT,
                fitness_goal TEXT,
                fitness_level TEXT,
                preferences TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_fitness_profiles_user ON fitness_profiles(user_id)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get the fitness profile for a user
    ///
    /// The store does not enforce one profile per user; when several exist the
    /// most recently created row wins, with id as the deterministic tiebreak.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_fitness_profile(&self, user_id: Uuid) -> AppResult<Option<FitnessProfile>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, gender, age, weight_kg, height_cm,
                   fitness_goal, fitness_level, preferences, created_at, updated_at
            FROM fitness_profiles
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(self.pool())
        .await?;

        row.map(|r| row_to_profile(&r)).transpose()
    }

    /// Get a fitness profile by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_fitness_profile_by_id(&self, id: Uuid) -> AppResult<Option<FitnessProfile>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, gender, age, weight_kg, height_cm,
                   fitness_goal, fitness_level, preferences, created_at, updated_at
            FROM fitness_profiles
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await?;

        row.map(|r| row_to_profile(&r)).transpose()
    }

    /// Create a fitness profile for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_fitness_profile(
        &self,
        user_id: Uuid,
        request: &CreateFitnessProfileRequest,
    ) -> AppResult<FitnessProfile> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO fitness_profiles (
                id, user_id, gender, age, weight_kg, height_cm,
                fitness_goal, fitness_level, preferences, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(&request.gender)
        .bind(request.age)
        .bind(request.weight_kg.map(|d| d.to_string()))
        .bind(request.height_cm.map(|d| d.to_string()))
        .bind(request.fitness_goal.map(|g| g.as_str()))
        .bind(request.fitness_level.map(|l| l.as_str()))
        .bind(&request.preferences)
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create fitness profile: {e}")))?;

        Ok(FitnessProfile {
            id,
            user_id,
            gender: request.gender.clone(),
            age: request.age,
            weight_kg: request.weight_kg,
            height_cm: request.height_cm,
            fitness_goal: request.fitness_goal,
            fitness_level: request.fitness_level,
            preferences: request.preferences.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Partially update a fitness profile
    ///
    /// Only supplied fields are overwritten; `updated_at` is always refreshed.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the profile does not exist or belongs to
    /// another user.
    pub async fn update_fitness_profile(
        &self,
        user_id: Uuid,
        id: Uuid,
        request: &UpdateFitnessProfileRequest,
    ) -> AppResult<FitnessProfile> {
        let now = Utc::now();

        let result = sqlx::query(
            r"
            UPDATE fitness_profiles SET
                gender = COALESCE($2, gender),
                age = COALESCE($3, age),
                weight_kg = COALESCE($4, weight_kg),
                height_cm = COALESCE($5, height_cm),
                fitness_goal = COALESCE($6, fitness_goal),
                fitness_level = COALESCE($7, fitness_level),
                preferences = COALESCE($8, preferences),
                updated_at = $9
            WHERE id = $1 AND user_id = $10
            ",
        )
        .bind(id.to_string())
        .bind(&request.gender)
        .bind(request.age)
        .bind(request.weight_kg.map(|d| d.to_string()))
        .bind(request.height_cm.map(|d| d.to_string()))
        .bind(request.fitness_goal.map(|g| g.as_str()))
        .bind(request.fitness_level.map(|l| l.as_str()))
        .bind(&request.preferences)
        .bind(now.to_rfc3339())
        .bind(user_id.to_string())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to update fitness profile: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::entity_not_found("Fitness profile", id));
        }

        self.get_fitness_profile_by_id(id)
            .await?
            .ok_or_else(|| AppError::entity_not_found("Fitness profile", id))
    }
}

/// Convert a database row to a `FitnessProfile`
fn row_to_profile(row: &SqliteRow) -> AppResult<FitnessProfile> {
    let id_str: String = row.get("id");
    let user_id_str: String = row.get("user_id");
    let weight: Option<String> = row.get("weight_kg");
    let height: Option<String> = row.get("height_cm");
    let goal: Option<String> = row.get("fitness_goal");
    let level: Option<String> = row.get("fitness_level");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    Ok(FitnessProfile {
        id: parse_uuid(&id_str)?,
        user_id: parse_uuid(&user_id_str)?,
        gender: row.get("gender"),
        age: row.get("age"),
        weight_kg: parse_decimal(weight)?,
        height_cm: parse_decimal(height)?,
        fitness_goal: goal.as_deref().map(FitnessGoal::parse),
        fitness_level: level.as_deref().map(FitnessLevel::parse),
        preferences: row.get("preferences"),
        created_at: parse_timestamp(&created_at_str)?,
        updated_at: parse_timestamp(&updated_at_str)?,
    })
}
