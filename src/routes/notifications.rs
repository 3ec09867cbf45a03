// ABOUTME: Route handlers for the notifications REST API
// ABOUTME: Provides notification listing, creation and read-state endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification routes
//!
//! Marking a notification read is idempotent; repeating the call returns
//! the same read record.

use crate::{
    auth::AuthResult,
    database::CreateNotificationRequest,
    errors::AppError,
    routes::{AppJson, AppPath},
    server::ServerResources,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

/// Notification routes handler
pub struct NotificationRoutes;

impl NotificationRoutes {
    /// Create all notification routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/notifications", get(Self::handle_list))
            .route("/api/notifications", post(Self::handle_create))
            .route("/api/notifications/unread", get(Self::handle_unread))
            .route(
                "/api/notifications/:id/read",
                patch(Self::handle_mark_read),
            )
            .with_state(resources)
    }

    /// Extract and authenticate the user from the authorization header
    async fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthResult, AppError> {
        let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok());
        resources
            .auth_middleware
            .authenticate_request(auth_header)
            .await
    }

    /// Handle GET /api/notifications - List the caller's notifications, newest first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let notifications = resources.database.get_notifications(auth.user_id).await?;

        Ok((StatusCode::OK, Json(notifications)).into_response())
    }

    /// Handle GET /api/notifications/unread - The caller's unread notifications
    async fn handle_unread(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let notifications = resources
            .database
            .get_unread_notifications(auth.user_id)
            .await?;

        Ok((StatusCode::OK, Json(notifications)).into_response())
    }

    /// Handle POST /api/notifications - Create a notification for the caller
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppJson(request): AppJson<CreateNotificationRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let notification = resources
            .database
            .create_notification(auth.user_id, &request)
            .await?;

        Ok((StatusCode::CREATED, Json(notification)).into_response())
    }

    /// Handle PATCH /api/notifications/:id/read - Mark a notification read
    async fn handle_mark_read(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(notification_id): AppPath<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let notification = resources
            .database
            .mark_notification_read(auth.user_id, notification_id)
            .await?;

        Ok((StatusCode::OK, Json(notification)).into_response())
    }
}
