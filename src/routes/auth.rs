// ABOUTME: Route handlers for the authenticated-user endpoint
// ABOUTME: Returns the profile record synced from the caller's identity token
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated user routes
//!
//! The identity record is upserted from token claims during authentication,
//! so a valid token always resolves to a persisted user row.

use crate::{
    auth::AuthResult,
    errors::AppError,
    server::ServerResources,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Authenticated user routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create the auth routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/user", get(Self::handle_get_user))
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

    /// Handle GET /api/auth/user - Return the caller's user record
    async fn handle_get_user(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let user = resources
            .database
            .get_user(auth.user_id)
            .await?
            .ok_or_else(|| AppError::entity_not_found("user", auth.user_id))?;

        Ok((StatusCode::OK, Json(user)).into_response())
    }
}
