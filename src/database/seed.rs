// ABOUTME: Development data seeding: login personas, credential accounts and sample conversations
// ABOUTME: Idempotent through fixed persona ids, uuid v5 row ids and insert-or-ignore writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

//! Dev data seeding
//!
//! Used by the `seed-dev-data` binary. Every row the seeder writes has a
//! stable id, so running it again leaves existing personas, accounts and
//! conversations untouched.

use super::{db_now, to_db_timestamp, NewUser, SessionManager, UserManager};
use crate::config::Environment;
use crate::constants::dev::DEV_EMAIL_DOMAIN;
use crate::models::{MessageRole, Session};
use anyhow::{bail, Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

/// Dev persona definition
#[derive(Debug, Clone, Copy)]
pub struct DevPersonaSeed {
    /// Fixed user id
    pub id: &'static str,
    /// Local part of the email
    pub name: &'static str,
    /// Display name
    pub display_name: &'static str,
    /// Whether the email counts as verified
    pub email_verified: bool,
    /// Whether sample conversations are created
    pub has_sample_data: bool,
}

impl DevPersonaSeed {
    /// Email under the dev domain
    #[must_use]
    pub fn email(&self) -> String {
        format!("{}@{DEV_EMAIL_DOMAIN}", self.name)
    }
}

/// Personas created by the seeder
pub const DEV_PERSONAS: &[DevPersonaSeed] = &[
    DevPersonaSeed {
        id: "00000000-0000-0000-0000-000000000001",
        name: "alice",
        display_name: "Alice Developer",
        email_verified: true,
        has_sample_data: true,
    },
    DevPersonaSeed {
        id: "00000000-0000-0000-0000-000000000002",
        name: "bob",
        display_name: "Bob Tester",
        email_verified: true,
        has_sample_data: false,
    },
    DevPersonaSeed {
        id: "00000000-0000-0000-0000-000000000003",
        name: "charlie",
        display_name: "Charlie Unverified",
        email_verified: false,
        has_sample_data: false,
    },
];

/// Sample conversation titles; conversation `i` gets `i + 3` messages
pub const SAMPLE_TITLES: &[&str] = &[
    "Getting started with Rust",
    "Planning a trip to Lisbon",
    "Debugging a flaky test",
];

const SAMPLE_MODEL: &str = "gpt-4";

/// What a seeding run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Personas inserted
    pub personas_created: usize,
    /// Credential accounts inserted
    pub accounts_created: usize,
    /// Sample conversations inserted
    pub conversations_created: usize,
    /// Expired sessions removed
    pub sessions_pruned: u64,
}

/// A session issued for a persona
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Persona email
    pub email: String,
    /// The stored session, token included
    pub session: Session,
}

/// Refuse to seed production data
///
/// # Errors
///
/// Returns an error in the production environment
pub fn ensure_seed_allowed(environment: Environment) -> Result<()> {
    if environment.is_production() {
        bail!("Refusing to seed dev personas in the production environment");
    }
    Ok(())
}

/// Session lifetime from a number of hours
///
/// # Errors
///
/// Returns an error when `hours` is not positive or the expiry would not be
/// a representable timestamp
pub fn session_ttl(hours: i64) -> Result<Duration> {
    if hours <= 0 {
        bail!("Session lifetime must be a positive number of hours, got {hours}");
    }
    let ttl = Duration::try_hours(hours)
        .with_context(|| format!("Session lifetime of {hours} hours is out of range"))?;
    if db_now().checked_add_signed(ttl).is_none() {
        bail!("Session lifetime of {hours} hours is out of range");
    }
    Ok(ttl)
}

/// Argon2 hash in PHC string format
///
/// # Errors
///
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Argon2 password hashing failed: {e}"))?;
    Ok(hash.to_string())
}

/// Stable id derived from a seed key so reruns address the same rows
#[must_use]
pub fn seed_id(key: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("lome-chat-seed:{key}").as_bytes()).to_string()
}

/// Dev data seeding operations
pub struct DevDataSeeder {
    pool: SqlitePool,
}

impl DevDataSeeder {
    /// Create a new seeder
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Prune expired sessions, then create missing personas, accounts and
    /// sample conversations
    ///
    /// # Errors
    ///
    /// Returns an error if hashing or any database operation fails
    pub async fn seed(&self, password: &str) -> Result<SeedReport> {
        let mut report = SeedReport {
            sessions_pruned: SessionManager::new(self.pool.clone())
                .delete_expired(db_now())
                .await?,
            ..SeedReport::default()
        };
        if report.sessions_pruned > 0 {
            info!("Pruned {} expired sessions", report.sessions_pruned);
        }

        let password_hash = hash_password(password)?;

        info!("Step 1: Creating dev personas...");
        for persona in DEV_PERSONAS {
            let (user_created, account_created) = self.seed_persona(persona, &password_hash).await?;
            report.personas_created += usize::from(user_created);
            report.accounts_created += usize::from(account_created);
        }

        info!("Step 2: Creating sample conversations...");
        for persona in DEV_PERSONAS.iter().filter(|p| p.has_sample_data) {
            let created = self.seed_sample_conversations(persona).await?;
            info!("  {}: {} new conversations", persona.name, created);
            report.conversations_created += created;
        }

        Ok(report)
    }

    /// Create one session per persona
    ///
    /// # Errors
    ///
    /// Returns an error for a lifetime [`session_ttl`] rejects, or if a
    /// database operation fails
    pub async fn issue_sessions(&self, ttl_hours: i64) -> Result<Vec<IssuedSession>> {
        let ttl = session_ttl(ttl_hours)?;
        let sessions = SessionManager::new(self.pool.clone());

        let mut issued = Vec::with_capacity(DEV_PERSONAS.len());
        for persona in DEV_PERSONAS {
            let session = sessions
                .create_session(persona.id, ttl)
                .await
                .with_context(|| format!("Failed to issue session for {}", persona.email()))?;
            issued.push(IssuedSession {
                email: persona.email(),
                session,
            });
        }
        Ok(issued)
    }

    /// Create the persona's user and credential account if missing
    async fn seed_persona(&self, persona: &DevPersonaSeed, password_hash: &str) -> Result<(bool, bool)> {
        let users = UserManager::new(self.pool.clone());
        let email = persona.email();

        let user_created = if users.get_user(persona.id).await?.is_some() {
            info!("  Found existing persona: {email}");
            false
        } else {
            users
                .create_user(&NewUser {
                    id: Some(persona.id.to_owned()),
                    email: email.clone(),
                    name: persona.display_name.to_owned(),
                    email_verified: persona.email_verified,
                    image: None,
                })
                .await
                .with_context(|| format!("Failed to create persona {email}"))?;
            info!("  Created persona: {email}");
            true
        };

        let account_created = users
            .ensure_credential_account(persona.id, &email, password_hash)
            .await?;
        if account_created {
            info!("  Created credential account for {email}");
        }
        Ok((user_created, account_created))
    }

    /// Insert sample conversations that are not present yet
    ///
    /// Timestamps are staggered so the newest conversation is the last title
    /// and messages within a conversation are one minute apart.
    async fn seed_sample_conversations(&self, persona: &DevPersonaSeed) -> Result<usize> {
        let base = db_now() - Duration::days(i64::try_from(SAMPLE_TITLES.len())?);
        let mut created = 0;

        for (index, title) in SAMPLE_TITLES.iter().enumerate() {
            let conversation_id = seed_id(&format!("{}-conv-{}", persona.name, index + 1));
            let started_at = base + Duration::days(i64::try_from(index)?);
            let message_count = index + 3;
            let last_at = started_at + Duration::minutes(i64::try_from(message_count - 1)?);

            let mut tx = self.pool.begin().await?;

            let inserted = sqlx::query(
                r"
                INSERT OR IGNORE INTO conversations (id, user_id, title, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(&conversation_id)
            .bind(persona.id)
            .bind(*title)
            .bind(to_db_timestamp(started_at))
            .bind(to_db_timestamp(last_at))
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if inserted == 0 {
                debug!(%conversation_id, "Sample conversation already present");
                tx.rollback().await?;
                continue;
            }

            for position in 0..message_count {
                let sent_at: DateTime<Utc> =
                    started_at + Duration::minutes(i64::try_from(position)?);
                let (role, model, content) = if position % 2 == 0 {
                    (
                        MessageRole::User,
                        None,
                        format!("Question {} about {title}", position / 2 + 1),
                    )
                } else {
                    (
                        MessageRole::Assistant,
                        Some(SAMPLE_MODEL),
                        format!("Here is an answer about {title}."),
                    )
                };

                sqlx::query(
                    r"
                    INSERT INTO messages (id, conversation_id, role, content, model, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    ",
                )
                .bind(seed_id(&format!(
                    "{}-conv-{}-msg-{}",
                    persona.name,
                    index + 1,
                    position + 1
                )))
                .bind(&conversation_id)
                .bind(role.as_str())
                .bind(content)
                .bind(model)
                .bind(to_db_timestamp(sent_at))
                .execute(&mut *tx)
                .await?;
            }

            tx.commit().await?;
            created += 1;
        }

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_stable_and_distinct() {
        assert_eq!(seed_id("alice-conv-1"), seed_id("alice-conv-1"));
        assert_ne!(seed_id("alice-conv-1"), seed_id("alice-conv-2"));
    }

    #[test]
    fn test_persona_emails_use_dev_domain() {
        for persona in DEV_PERSONAS {
            assert!(persona.email().ends_with("@dev.lome-chat.com"));
        }
    }

    #[test]
    fn test_session_ttl_bounds() {
        assert_eq!(session_ttl(24).unwrap(), Duration::hours(24));
        assert!(session_ttl(0).is_err());
        assert!(session_ttl(-5).is_err());
        assert!(session_ttl(i64::MAX).is_err());
        assert!(session_ttl(100_000_000_000).is_err());
    }

    #[test]
    fn test_seeding_refused_in_production() {
        assert!(ensure_seed_allowed(Environment::Production).is_err());
        assert!(ensure_seed_allowed(Environment::Development).is_ok());
        assert!(ensure_seed_allowed(Environment::Testing).is_ok());
    }
}
