// ABOUTME: LiftLog server binary: loads configuration, opens the database, and serves the REST API
// ABOUTME: Can also print a bearer token for a user id when a JWT secret is configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! # LiftLog Server Binary
//!
//! Starts the LiftLog REST API with JWT authentication and SQLite storage.

use anyhow::{bail, Context, Result};
use clap::Parser;
use liftlog::{
    auth::{generate_jwt_secret, AuthManager},
    config::{DatabaseUrl, IntelligenceConfig, ServerConfig},
    database::Database,
    logging,
    resources::ServerResources,
    server,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "liftlog-server")]
#[command(about = "LiftLog - strength training log with recovery scoring")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL, e.g. `sqlite:./data/liftlog.db` or `sqlite::memory:`
    #[arg(long)]
    database_url: Option<String>,

    /// Print a bearer token for this user id and exit
    #[arg(long, value_name = "USER_ID")]
    issue_token: Option<Uuid>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url.as_deref() {
        config.database_url = DatabaseUrl::parse_url(database_url)?;
    }

    let jwt_secret = match (&config.auth.jwt_secret, args.issue_token) {
        (Some(secret), _) => secret.clone(),
        (None, Some(_)) => bail!("JWT_SECRET must be set to issue tokens"),
        (None, None) => {
            warn!("Using a generated JWT secret; tokens will not survive a restart");
            generate_jwt_secret()
        }
    };
    let auth_manager = AuthManager::new(jwt_secret.as_bytes(), config.auth.jwt_expiry_hours);

    if let Some(user_id) = args.issue_token {
        println!("{}", auth_manager.generate_token(user_id)?);
        return Ok(());
    }

    info!("{}", config.summary());

    let intelligence = IntelligenceConfig::default();
    intelligence
        .validate()
        .context("Invalid intelligence configuration")?;

    let database = Database::new(&config.database_url).await?;
    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(config),
        intelligence,
    ));

    if let Err(e) = server::run(resources).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
