// ABOUTME: Production server binary for the Trailfit fitness tracking API
// ABOUTME: Loads configuration, opens the database and serves the REST API

// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Trailfit Server Binary
//!
//! Starts the REST API with JWT authentication and `SQLite` persistence.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use trailfit::{
    auth::AuthManager,
    config::ServerConfig,
    database::Database,
    logging,
    server::{FitnessServer, ServerResources},
};

#[derive(Parser)]
#[command(name = "trailfit-server")]
#[command(about = "Trailfit - Personal fitness tracking REST API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    logging::init(&config)?;

    info!("Starting Trailfit server");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;
    info!("Database ready: {}", config.database_url);

    let auth_manager = AuthManager::new(config.jwt_secret.as_bytes(), config.token_expiry_hours);

    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(config),
    ));

    FitnessServer::new(resources).run().await?;

    Ok(())
}
