// ABOUTME: Notification table operations
// ABOUTME: Create, list, unread filter and the one-way read transition
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{Notification, NotificationType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

/// Request to create a notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotificationRequest {
    /// Notification category
    #[serde(rename = "type", default)]
    pub notification_type: NotificationType,
    /// Short title
    pub title: String,
    /// Message body
    pub message: String,
    /// When the notification is scheduled to be shown
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl Database {
    /// Create the notifications table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_notifications(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS notifications (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                type TEXT NOT NULL,
                title TEXT NOT NULL,
                message TEXT NOT NULL,
                read INTEGER NOT NULL DEFAULT 0,
                scheduled_for TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_notifications_user_read ON notifications(user_id, read)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get all notifications for a user, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_notifications(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, type, title, message, read, scheduled_for, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(row_to_notification).collect()
    }

    /// Get a notification by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_notification(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, type, title, message, read, scheduled_for, created_at
            FROM notifications
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await?;

        row.map(|r| row_to_notification(&r)).transpose()
    }

    /// Get unread notifications for a user, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_unread_notifications(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, type, title, message, read, scheduled_for, created_at
            FROM notifications
            WHERE user_id = $1 AND read = 0
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(row_to_notification).collect()
    }

    /// Create a notification, unread
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_notification(
        &self,
        user_id: Uuid,
        request: &CreateNotificationRequest,
    ) -> AppResult<Notification> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO notifications (
                id, user_id, type, title, message, read, scheduled_for, created_at
            ) VALUES ($1, $2, $3, $4, $5, 0, $6, $7)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(request.notification_type.as_str())
        .bind(&request.title)
        .bind(&request.message)
        .bind(request.scheduled_for.map(|dt| dt.to_rfc3339()))
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create notification: {e}")))?;

        Ok(Notification {
            id,
            user_id,
            notification_type: request.notification_type,
            title: request.title.clone(),
            message: request.message.clone(),
            read: false,
            scheduled_for: request.scheduled_for,
            created_at: now,
        })
    }

    /// Mark a notification read
    ///
    /// Unconditional set-to-true: reapplying to an already-read notification
    /// succeeds with no further effect.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the notification does not exist or
    /// belongs to another user.
    pub async fn mark_notification_read(&self, user_id: Uuid, id: Uuid) -> AppResult<Notification> {
        let result =
            sqlx::query("UPDATE notifications SET read = 1 WHERE id = $1 AND user_id = $2")
                .bind(id.to_string())
                .bind(user_id.to_string())
                .execute(self.pool())
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::entity_not_found("Notification", id));
        }

        self.get_notification(id)
            .await?
            .ok_or_else(|| AppError::entity_not_found("Notification", id))
    }
}

/// Convert a database row to a `Notification`
fn row_to_notification(row: &SqliteRow) -> AppResult<Notification> {
    let id_str: String = row.get("id");
    let user_id_str: String = row.get("user_id");
    let type_str: String = row.get("type");
    let read: i64 = row.get("read");
    let scheduled_for_str: Option<String> = row.get("scheduled_for");
    let created_at_str: String = row.get("created_at");

    Ok(Notification {
        id: parse_uuid(&id_str)?,
        user_id: parse_uuid(&user_id_str)?,
        notification_type: NotificationType::parse(&type_str),
        title: row.get("title"),
        message: row.get("message"),
        read: read == 1,
        scheduled_for: scheduled_for_str.as_deref().map(parse_timestamp).transpose()?,
        created_at: parse_timestamp(&created_at_str)?,
    })
}
