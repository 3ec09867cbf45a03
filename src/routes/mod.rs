// ABOUTME: HTTP route modules for the fitness tracking REST API
// ABOUTME: Declares per-resource route handlers and shared request plumbing
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP routes
//!
//! Each resource gets its own module with a `XxxRoutes` struct exposing a
//! `routes()` constructor. All `/api` endpoints authenticate per request via
//! the bearer token in the `Authorization` header.

pub mod auth;
pub mod health;
pub mod health_metrics;
pub mod hiking;
pub mod notifications;
pub mod profile;
pub mod progress;
pub mod workouts;

pub use auth::AuthRoutes;
pub use health::HealthRoutes;
pub use health_metrics::HealthMetricsRoutes;
pub use hiking::HikingRoutes;
pub use notifications::NotificationRoutes;
pub use profile::ProfileRoutes;
pub use progress::ProgressRoutes;
pub use workouts::WorkoutRoutes;

use crate::errors::AppError;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::Json;
use http::request::Parts;
use serde::de::DeserializeOwned;

/// JSON body extractor that reports malformed payloads in the API error shape
///
/// The stock `Json` rejection renders a plain-text body; this wrapper turns
/// it into the `{"message": ...}` envelope with a 400 status.
pub struct AppJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::invalid_input(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Path extractor that reports malformed parameters in the API error shape
///
/// Same envelope rule as [`AppJson`]: a path segment that fails to parse
/// (for example a non-UUID id) yields `{"message": ...}` with a 400 status
/// instead of the stock plain-text rejection.
pub struct AppPath<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::invalid_input(rejection.body_text()))?;
        Ok(Self(value))
    }
}
