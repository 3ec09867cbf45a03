// ABOUTME: Test utilities for database operations
// ABOUTME: Provides isolated in-memory database instances for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Database;
use crate::errors::AppResult;

/// Create a test database instance
///
/// Each call connects to its own isolated in-memory SQLite instance with the
/// full schema migrated.
///
/// # Errors
///
/// Returns an error if database initialization fails.
pub async fn create_test_db() -> AppResult<Database> {
    Database::new("sqlite::memory:").await
}
