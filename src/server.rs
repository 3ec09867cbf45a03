// ABOUTME: HTTP server assembly, shared resource container and router composition
// ABOUTME: Wires the database, auth stack and route modules into one axum service
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server assembly
//!
//! [`ServerResources`] is the dependency container handed to every route
//! module behind an `Arc`; construct it once at startup and share it. The
//! HTTP layer stack adds request tracing and permissive CORS for browser
//! clients.

use crate::{
    auth::AuthManager,
    config::ServerConfig,
    database::Database,
    errors::AppResult,
    middleware::AuthMiddleware,
    routes::{
        AuthRoutes, HealthMetricsRoutes, HealthRoutes, HikingRoutes, NotificationRoutes,
        ProfileRoutes, ProgressRoutes, WorkoutRoutes,
    },
};
use axum::Router;
use http::{header::HeaderName, Method};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Shared resource container handed to route handlers
#[derive(Clone)]
pub struct ServerResources {
    /// Persistent storage handle
    pub database: Database,
    /// Token issuing and validation
    pub auth_manager: AuthManager,
    /// Per-request authentication with identity sync
    pub auth_middleware: AuthMiddleware,
    /// Runtime configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create the resource container, sharing one database handle across the auth stack
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: Arc<ServerConfig>) -> Self {
        let auth_middleware = AuthMiddleware::new(auth_manager.clone(), database.clone());
        Self {
            database,
            auth_manager,
            auth_middleware,
            config,
        }
    }
}

/// Fitness tracking HTTP server
pub struct FitnessServer {
    resources: Arc<ServerResources>,
}

impl FitnessServer {
    /// Create a server from prebuilt resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router
    #[must_use]
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::any())
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                HeaderName::from_static("content-type"),
                HeaderName::from_static("authorization"),
                HeaderName::from_static("accept"),
            ]);

        Router::new()
            .merge(HealthRoutes::routes(self.resources.clone()))
            .merge(AuthRoutes::routes(self.resources.clone()))
            .merge(ProfileRoutes::routes(self.resources.clone()))
            .merge(WorkoutRoutes::routes(self.resources.clone()))
            .merge(HealthMetricsRoutes::routes(self.resources.clone()))
            .merge(HikingRoutes::routes(self.resources.clone()))
            .merge(NotificationRoutes::routes(self.resources.clone()))
            .merge(ProgressRoutes::routes(self.resources.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Bind the configured port and serve until shutdown
    pub async fn run(&self) -> AppResult<()> {
        let addr = format!("0.0.0.0:{}", self.resources.config.http_port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::errors::AppError::config(format!("Failed to bind {addr}: {e}")))?;

        tracing::info!("HTTP server listening on {addr}");

        axum::serve(listener, self.router())
            .await
            .map_err(|e| crate::errors::AppError::internal(format!("HTTP server error: {e}")))?;

        Ok(())
    }
}
