// ABOUTME: Dev data seeder creating login personas and sample conversations
// ABOUTME: Idempotent; optionally issues session cookies for manual API testing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

//! Dev data seeder for the Lome chat server.
//!
//! Usage:
//! ```bash
//! # Seed personas and sample conversations
//! cargo run --bin seed-dev-data
//!
//! # Also issue a session per persona and print the cookies
//! cargo run --bin seed-dev-data -- --issue-sessions
//!
//! # Verbose output
//! cargo run --bin seed-dev-data -- -v
//! ```

use anyhow::{bail, Result};
use clap::Parser;
use lome_chat_server::{
    config::{DatabaseUrl, ServerConfig},
    constants::dev::DEV_PASSWORD,
    constants::session::DEFAULT_SESSION_TTL_HOURS,
    database::{seed::ensure_seed_allowed, Database},
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-dev-data",
    about = "Lome Chat Dev Data Seeder",
    long_about = "Create dev personas with sample conversations for local testing"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Create a session per persona and print its cookie
    #[arg(long)]
    issue_sessions: bool,

    /// Lifetime of issued sessions in hours
    #[arg(long, default_value_t = DEFAULT_SESSION_TTL_HOURS)]
    session_ttl_hours: i64,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== Lome Chat Dev Data Seeder ===");

    let config = ServerConfig::from_env()?;
    ensure_seed_allowed(config.environment)?;

    let database_url = match args.database_url.as_deref() {
        Some(url) => DatabaseUrl::parse_url(url)?,
        None => config.database.url.clone(),
    };
    if database_url.is_memory() {
        bail!("Seeding an in-memory database has no lasting effect; set DATABASE_URL");
    }

    info!("Connecting to database: {}", database_url.to_connection_string());
    let database = Database::new(&database_url).await?;
    let seeder = database.seeder();

    let report = seeder.seed(DEV_PASSWORD).await?;
    info!(
        "Created {} personas, {} accounts, {} conversations",
        report.personas_created, report.accounts_created, report.conversations_created
    );

    if args.issue_sessions {
        info!("Step 3: Issuing sessions...");
        for issued in seeder.issue_sessions(args.session_ttl_hours).await? {
            println!(
                "{}: Cookie: {}={} (expires {})",
                issued.email,
                config.session.cookie_name,
                issued.session.token,
                issued.session.expires_at.to_rfc3339()
            );
        }
    }

    info!("=== Seeding Complete ===");
    info!("Personas log in with password: {DEV_PASSWORD}");
    Ok(())
}
