// ABOUTME: Main library entry point for the Trailfit fitness tracking API
// ABOUTME: Provides workout, health metric, hiking and notification services over REST
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Trailfit
//!
//! A personal fitness tracking service exposing a JSON REST API for
//! workout scheduling, daily health metrics, hiking logs, notifications
//! and an aggregated progress report.
//!
//! ## Architecture
//!
//! - **Routes**: Per-resource axum route modules, each authenticating the
//!   bearer token before touching data
//! - **Database**: `SQLite` persistence behind a single [`database::Database`]
//!   handle with per-entity operation modules
//! - **Auth**: Stateless JWT validation; the user row is synced from token
//!   claims on every authenticated request
//! - **Progress**: Pure aggregation over fetched collections, recomputed per
//!   request
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use trailfit::config::ServerConfig;
//! use trailfit::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Trailfit configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod progress;
pub mod routes;
pub mod server;
