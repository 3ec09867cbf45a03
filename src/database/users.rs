// ABOUTME: User table operations
// ABOUTME: Handles identity-provider sync via upsert plus lookup and cascading deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{UpsertUser, User};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                first_name TEXT,
                last_name TEXT,
                profile_image_url TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Insert or overwrite a user row, keyed by id
    ///
    /// Only the identity-provider sync path writes users; conflicting rows are
    /// overwritten with the fresh claims and `updated_at` is refreshed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (for example an email collision
    /// with a different user id).
    pub async fn upsert_user(&self, identity: &UpsertUser) -> AppResult<User> {
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO users (id, email, first_name, last_name, profile_image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ON CONFLICT(id) DO UPDATE SET
                email = excluded.email,
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                profile_image_url = excluded.profile_image_url,
                updated_at = excluded.updated_at
            ",
        )
        .bind(identity.id.to_string())
        .bind(&identity.email)
        .bind(&identity.first_name)
        .bind(&identity.last_name)
        .bind(&identity.profile_image_url)
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert user: {e}")))?;

        self.get_user(identity.id)
            .await?
            .ok_or_else(|| AppError::internal("Upserted user row missing"))
    }

    /// Get a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, email, first_name, last_name, profile_image_url, created_at, updated_at
            FROM users WHERE id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(self.pool())
        .await?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Delete a user and, via foreign keys, all rows it owns
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the user does not exist.
    pub async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.to_string())
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::entity_not_found("User", user_id));
        }
        Ok(())
    }
}

/// Convert a database row to a `User`
fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id_str: String = row.get("id");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    Ok(User {
        id: parse_uuid(&id_str)?,
        email: row.get("email"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        profile_image_url: row.get("profile_image_url"),
        created_at: parse_timestamp(&created_at_str)?,
        updated_at: parse_timestamp(&updated_at_str)?,
    })
}
