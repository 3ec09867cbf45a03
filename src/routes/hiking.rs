// ABOUTME: Route handlers for the hiking sessions REST API
// ABOUTME: Provides hike logging and retrieval endpoints scoped to the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hiking session routes

use crate::{
    auth::AuthResult,
    database::CreateHikingSessionRequest,
    errors::AppError,
    routes::AppJson,
    server::ServerResources,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Hiking routes handler
pub struct HikingRoutes;

impl HikingRoutes {
    /// Create all hiking routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/hiking", get(Self::handle_list))
            .route("/api/hiking", post(Self::handle_create))
            .route("/api/hiking/recent", get(Self::handle_recent))
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

    /// Handle GET /api/hiking - List the caller's hikes, newest first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let sessions = resources.database.get_hiking_sessions(auth.user_id).await?;

        Ok((StatusCode::OK, Json(sessions)).into_response())
    }

    /// Handle GET /api/hiking/recent - The caller's most recent hikes
    async fn handle_recent(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let sessions = resources
            .database
            .get_recent_hiking_sessions(auth.user_id)
            .await?;

        Ok((StatusCode::OK, Json(sessions)).into_response())
    }

    /// Handle POST /api/hiking - Log a hiking session for the caller
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppJson(request): AppJson<CreateHikingSessionRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let session = resources
            .database
            .create_hiking_session(auth.user_id, &request)
            .await?;

        Ok((StatusCode::CREATED, Json(session)).into_response())
    }
}
