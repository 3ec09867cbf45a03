// ABOUTME: Route handlers for the health metrics REST API
// ABOUTME: Provides daily metric logging and retrieval endpoints scoped to the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Health metric routes
//!
//! Metrics are append-only through the API; a day may hold multiple rows
//! and aggregation sums them.

use crate::{
    auth::AuthResult,
    database::CreateHealthMetricRequest,
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
use chrono::Local;
use std::sync::Arc;

/// Health metric routes handler
pub struct HealthMetricsRoutes;

impl HealthMetricsRoutes {
    /// Create all health metric routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/health-metrics", get(Self::handle_list))
            .route("/api/health-metrics", post(Self::handle_create))
            .route("/api/health-metrics/today", get(Self::handle_today))
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

    /// Handle GET /api/health-metrics - List the caller's metrics, newest first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let metrics = resources.database.get_health_metrics(auth.user_id).await?;

        Ok((StatusCode::OK, Json(metrics)).into_response())
    }

    /// Handle GET /api/health-metrics/today - Metrics logged on the current date
    async fn handle_today(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let today = Local::now().date_naive();
        let metrics = resources
            .database
            .get_today_health_metrics(auth.user_id, today)
            .await?;

        Ok((StatusCode::OK, Json(metrics)).into_response())
    }

    /// Handle POST /api/health-metrics - Log a metric entry for the caller
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppJson(request): AppJson<CreateHealthMetricRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let metric = resources
            .database
            .create_health_metric(auth.user_id, &request)
            .await?;

        Ok((StatusCode::CREATED, Json(metric)).into_response())
    }
}
