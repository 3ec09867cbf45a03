// ABOUTME: Environment-based server configuration
// ABOUTME: Parses port, database URL, JWT secret and logging settings from the process environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration management

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Default HTTP port when `TRAILFIT_HTTP_PORT` is unset
const DEFAULT_HTTP_PORT: u16 = 8080;
/// Default database URL when `DATABASE_URL` is unset
const DEFAULT_DATABASE_URL: &str = "sqlite:./data/trailfit.db";
/// Default JWT token validity in hours
const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Whether JSON log output should be used
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Database connection URL
    pub database_url: String,
    /// Secret used to sign and verify JWT bearer tokens
    pub jwt_secret: String,
    /// Token validity window in hours
    pub token_expiry_hours: i64,
    /// Log level filter (tracing `EnvFilter` syntax)
    pub log_level: String,
    /// Deployment environment
    pub environment: Environment,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `TRAILFIT_JWT_SECRET` is missing, or if a numeric
    /// variable fails to parse.
    pub fn from_env() -> AppResult<Self> {
        let http_port = match env::var("TRAILFIT_HTTP_PORT") {
            Ok(value) => value
                .parse()
                .map_err(|e| AppError::config(format!("Invalid TRAILFIT_HTTP_PORT: {e}")))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let jwt_secret = env::var("TRAILFIT_JWT_SECRET")
            .map_err(|_| AppError::config("TRAILFIT_JWT_SECRET must be set"))?;

        let token_expiry_hours = match env::var("TRAILFIT_TOKEN_EXPIRY_HOURS") {
            Ok(value) => value.parse().map_err(|e| {
                AppError::config(format!("Invalid TRAILFIT_TOKEN_EXPIRY_HOURS: {e}"))
            })?,
            Err(_) => DEFAULT_TOKEN_EXPIRY_HOURS,
        };

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned());

        let environment = Environment::from_str_or_default(
            &env::var("TRAILFIT_ENV").unwrap_or_default(),
        );

        Ok(Self {
            http_port,
            database_url,
            jwt_secret,
            token_expiry_hours,
            log_level,
            environment,
        })
    }

    /// One-line summary for startup logging; never includes secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} database={} env={:?} log={}",
            self.http_port, self.database_url, self.environment, self.log_level
        )
    }
}
