// ABOUTME: HTTP server binary for the Lome chat API
// ABOUTME: Loads configuration, opens the database and serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

//! # Lome Chat Server Binary

use anyhow::Result;
use clap::Parser;
use lome_chat_server::{
    config::environment::ServerConfig,
    database::{db_now, Database},
    logging,
    resources::ServerResources,
    server,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "lome-chat-server")]
#[command(about = "Lome chat API server")]
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
    if let Some(url) = args.database_url.as_deref() {
        config.database.url = lome_chat_server::config::DatabaseUrl::parse_url(url)?;
    }
    config.validate()?;

    logging::init_from_env()?;
    info!("{}", config.summary());

    let database = Database::new(&config.database.url).await?;
    let pruned = database.sessions().delete_expired(db_now()).await?;
    if pruned > 0 {
        info!("Pruned {pruned} expired sessions");
    }
    let config = Arc::new(config);
    let resources = Arc::new(ServerResources::new(database, Arc::clone(&config)));

    display_available_endpoints(&config);

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}

/// Log the routes this server answers
fn display_available_endpoints(config: &ServerConfig) {
    let base = format!("http://{}:{}", config.host, config.http_port);

    info!("=== Available API Endpoints ===");
    info!("   Health:            GET    {base}/health");
    info!("   Conversations:     GET    {base}/conversations");
    info!("   Create:            POST   {base}/conversations");
    info!("   Conversation:      GET    {base}/conversations/{{id}}");
    info!("   Rename:            PATCH  {base}/conversations/{{id}}");
    info!("   Delete:            DELETE {base}/conversations/{{id}}");
    info!("   Append message:    POST   {base}/conversations/{{id}}/messages");
    info!("   Chat stream:       POST   {base}/chat/stream (not implemented)");
    if !config.environment.is_production() {
        info!("   Dev personas:      GET    {base}/dev/personas");
    }
    info!("=== End of Endpoint List ===");
}
