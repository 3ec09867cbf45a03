// ABOUTME: Request-level middleware for the Trailfit API
// ABOUTME: Houses the authentication gate that fronts every /api route
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request middleware

/// Authentication middleware
pub mod auth;

pub use auth::AuthMiddleware;
