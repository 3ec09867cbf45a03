// ABOUTME: Route handlers for the workouts REST API
// ABOUTME: Provides listing, scheduling and completion endpoints scoped to the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workout routes
//!
//! Workouts are created as pending and flipped to completed via a dedicated
//! endpoint. The upcoming listing is anchored to the server's local calendar
//! date, never returning past sessions.

use crate::{
    auth::AuthResult,
    database::CreateWorkoutRequest,
    errors::AppError,
    server::ServerResources,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Local;
use std::sync::Arc;
use uuid::Uuid;

use crate::routes::{AppJson, AppPath};

/// Workout routes handler
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts", get(Self::handle_list))
            .route("/api/workouts", post(Self::handle_create))
            .route("/api/workouts/upcoming", get(Self::handle_upcoming))
            .route(
                "/api/workouts/:id/complete",
                patch(Self::handle_mark_complete),
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

    /// Handle GET /api/workouts - List the caller's workouts
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let workouts = resources.database.get_workouts(auth.user_id).await?;

        Ok((StatusCode::OK, Json(workouts)).into_response())
    }

    /// Handle GET /api/workouts/upcoming - List pending workouts from today onward
    async fn handle_upcoming(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let today = Local::now().date_naive();
        let workouts = resources
            .database
            .get_upcoming_workouts(auth.user_id, today)
            .await?;

        Ok((StatusCode::OK, Json(workouts)).into_response())
    }

    /// Handle POST /api/workouts - Schedule a workout for the caller
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppJson(request): AppJson<CreateWorkoutRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        if request.name.trim().is_empty() {
            return Err(AppError::invalid_input("Workout name must not be empty"));
        }

        let workout = resources
            .database
            .create_workout(auth.user_id, &request)
            .await?;

        Ok((StatusCode::CREATED, Json(workout)).into_response())
    }

    /// Handle PATCH /api/workouts/:id/complete - Mark a workout completed
    async fn handle_mark_complete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(workout_id): AppPath<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let workout = resources
            .database
            .mark_workout_complete(auth.user_id, workout_id)
            .await?;

        Ok((StatusCode::OK, Json(workout)).into_response())
    }
}
