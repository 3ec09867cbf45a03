// ABOUTME: Structured logging setup built on tracing-subscriber
// ABOUTME: Selects pretty or JSON output and wires the EnvFilter from configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Production-ready logging configuration with structured output

use crate::config::{Environment, ServerConfig};
use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber from server configuration
///
/// Development gets a human-readable format; production gets JSON lines for
/// log aggregation. Safe to call once per process.
///
/// # Errors
///
/// Returns an error if the log level filter cannot be parsed.
pub fn init(config: &ServerConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)?;

    match config.environment {
        Environment::Production => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_target(true))
                .try_init()?;
        }
        Environment::Development | Environment::Testing => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_target(false))
                .try_init()?;
        }
    }

    Ok(())
}
