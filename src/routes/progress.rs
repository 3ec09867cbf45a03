// ABOUTME: Route handler for the aggregated progress report endpoint
// ABOUTME: Fetches the caller's collections and reduces them to one summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Progress report routes
//!
//! The report is computed server-side on every request so all clients see
//! identical numbers; nothing derived is persisted.

use crate::{
    auth::AuthResult,
    errors::AppError,
    progress,
    server::ServerResources,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Local;
use std::sync::Arc;

/// Progress routes handler
pub struct ProgressRoutes;

impl ProgressRoutes {
    /// Create the progress routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/progress", get(Self::handle_get))
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

    /// Handle GET /api/progress - Aggregated progress report for the caller
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let workouts = resources.database.get_workouts(auth.user_id).await?;
        let metrics = resources.database.get_health_metrics(auth.user_id).await?;
        let hikes = resources.database.get_hiking_sessions(auth.user_id).await?;

        let today = Local::now().date_naive();
        let report = progress::build_report(&workouts, &metrics, &hikes, today);

        Ok((StatusCode::OK, Json(report)).into_response())
    }
}
