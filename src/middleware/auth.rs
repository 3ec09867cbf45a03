// ABOUTME: Authentication gate applied by every /api route handler
// ABOUTME: Validates bearer tokens and syncs the user row from identity claims
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication middleware
//!
//! Each handler passes its `Authorization` header here before touching
//! business logic. A valid token yields an [`AuthResult`] whose `user_id` is
//! the only owner identifier the data layer ever sees; the user row is
//! upserted from the token's identity claims so child rows always have a
//! parent to reference.

use crate::auth::{extract_bearer_token, AuthManager, AuthResult};
use crate::database::Database;
use crate::errors::{AppError, AppResult};

/// Authentication middleware shared across route handlers
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: AuthManager,
    database: Database,
}

impl AuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub const fn new(auth_manager: AuthManager, database: Database) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Authenticate a request from its `Authorization` header value
    ///
    /// Fails closed: a missing or invalid header is rejected before any
    /// business logic runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is absent, the token fails validation,
    /// or the user-sync write fails.
    pub async fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<AuthResult> {
        let header = auth_header.ok_or_else(AppError::auth_required)?;
        let token = extract_bearer_token(header)?;
        let claims = self.auth_manager.validate_token(token)?;
        let identity = claims.identity()?;

        // Identity-provider sync: the user row mirrors the token claims
        self.database.upsert_user(&identity).await?;

        tracing::debug!(user_id = %identity.id, "authenticated request");

        Ok(AuthResult {
            user_id: identity.id,
            identity,
        })
    }
}
