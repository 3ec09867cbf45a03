// ABOUTME: Route handlers for the fitness profile REST API
// ABOUTME: Provides read, create and partial-update endpoints scoped to the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fitness profile routes
//!
//! A user keeps a single active profile; reads resolve to the most recent
//! row when history is present. Updates are partial, absent fields keep
//! their stored values.

use crate::{
    auth::AuthResult,
    database::{CreateFitnessProfileRequest, UpdateFitnessProfileRequest},
    errors::AppError,
    routes::{AppJson, AppPath},
    server::ServerResources,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

/// Fitness profile routes handler
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all fitness profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/fitness-profile", get(Self::handle_get))
            .route("/api/fitness-profile", post(Self::handle_create))
            .route("/api/fitness-profile/:id", put(Self::handle_update))
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

    /// Handle GET /api/fitness-profile - Fetch the caller's profile
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let profile = resources
            .database
            .get_fitness_profile(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Fitness profile"))?;

        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle POST /api/fitness-profile - Create a profile for the caller
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppJson(request): AppJson<CreateFitnessProfileRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let profile = resources
            .database
            .create_fitness_profile(auth.user_id, &request)
            .await?;

        Ok((StatusCode::CREATED, Json(profile)).into_response())
    }

    /// Handle PUT /api/fitness-profile/:id - Partially update a profile
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppPath(profile_id): AppPath<Uuid>,
        AppJson(request): AppJson<UpdateFitnessProfileRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let profile = resources
            .database
            .update_fitness_profile(auth.user_id, profile_id, &request)
            .await?;

        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
