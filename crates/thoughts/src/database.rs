use std::collections::HashSet;

use async_trait::async_trait;
use seed_engine::{HandleProvider, PersistenceHandle};
use sqlx::{PgPool, migrate::Migrator, postgres::PgPoolOptions};
use tracing::{info, warn};

use crate::{
    config::SeedConfig,
    errors::AppError,
    models::{ApplicationUser, Comment, Thought, ThoughtHole},
};

/// Schema migrations embedded at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// An embedded migration that the database has not recorded as applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMigration {
    pub version: i64,
    pub description: String,
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the pool for advanced usage.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Applying migrations...");
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    /// Versions recorded as successfully applied. Empty when the migrations
    /// table has never been created.
    pub async fn applied_migration_versions(&self) -> Result<HashSet<i64>, AppError> {
        let table_exists: bool =
            sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
                .fetch_one(&self.pool)
                .await?;

        if !table_exists {
            return Ok(HashSet::new());
        }

        let versions: Vec<i64> =
            sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success")
                .fetch_all(&self.pool)
                .await?;

        Ok(versions.into_iter().collect())
    }

    pub async fn pending_migrations(&self) -> Result<Vec<PendingMigration>, AppError> {
        let applied = self.applied_migration_versions().await?;

        Ok(MIGRATOR
            .iter()
            .filter(|m| !m.migration_type.is_down_migration())
            .filter(|m| !applied.contains(&m.version))
            .map(|m| PendingMigration {
                version: m.version,
                description: m.description.to_string(),
            })
            .collect())
    }

    /// Upserts a batch of users in one transaction.
    pub async fn upsert_users(&self, users: &[ApplicationUser]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for user in users {
            sqlx::query(
                r#"
                INSERT INTO users (id, user_name, email, normalized_email, display_name, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (id) DO UPDATE SET
                    user_name = EXCLUDED.user_name,
                    email = EXCLUDED.email,
                    normalized_email = EXCLUDED.normalized_email,
                    display_name = EXCLUDED.display_name
                "#,
            )
            .bind(user.id)
            .bind(&user.user_name)
            .bind(&user.email)
            .bind(&user.normalized_email)
            .bind(&user.display_name)
            .bind(user.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Upserts a batch of thought holes in one transaction.
    pub async fn upsert_thought_holes(&self, holes: &[ThoughtHole]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for hole in holes {
            sqlx::query(
                r#"
                INSERT INTO thought_holes (id, name, description, created_at, modified_at, created_by, modified_by)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (id) DO UPDATE SET
                    name = EXCLUDED.name,
                    description = EXCLUDED.description,
                    modified_at = EXCLUDED.modified_at,
                    modified_by = EXCLUDED.modified_by
                "#,
            )
            .bind(hole.id)
            .bind(&hole.name)
            .bind(&hole.description)
            .bind(hole.created_at)
            .bind(hole.modified_at)
            .bind(&hole.created_by)
            .bind(&hole.modified_by)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Upserts a batch of thoughts in one transaction.
    ///
    /// Likes and views are only set on insert so that counters accumulated
    /// after seeding survive a re-run.
    pub async fn upsert_thoughts(&self, thoughts: &[Thought]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for thought in thoughts {
            sqlx::query(
                r#"
                INSERT INTO thoughts (
                    id, title, body, mood, likes, views,
                    thought_hole_id, application_user_id,
                    created_at, modified_at, created_by, modified_by
                )
                VALUES (
                    $1, $2, $3, $4::mood, $5, $6,
                    $7, $8,
                    $9, $10, $11, $12
                )
                ON CONFLICT (id) DO UPDATE SET
                    title = EXCLUDED.title,
                    body = EXCLUDED.body,
                    mood = EXCLUDED.mood,
                    thought_hole_id = EXCLUDED.thought_hole_id,
                    application_user_id = EXCLUDED.application_user_id,
                    modified_at = EXCLUDED.modified_at,
                    modified_by = EXCLUDED.modified_by
                "#,
            )
            .bind(thought.id)
            .bind(&thought.title)
            .bind(&thought.body)
            .bind(thought.mood.as_str())
            .bind(thought.likes)
            .bind(thought.views)
            .bind(thought.thought_hole_id)
            .bind(thought.application_user_id)
            .bind(thought.created_at)
            .bind(thought.modified_at)
            .bind(&thought.created_by)
            .bind(&thought.modified_by)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Upserts a batch of comments in one transaction.
    pub async fn upsert_comments(&self, comments: &[Comment]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for comment in comments {
            sqlx::query(
                r#"
                INSERT INTO comments (id, body, parent_id, parent_discriminator, application_user_id, created_at)
                VALUES ($1, $2, $3, $4::parent_discriminator, $5, $6)
                ON CONFLICT (id) DO UPDATE SET
                    body = EXCLUDED.body,
                    parent_id = EXCLUDED.parent_id,
                    parent_discriminator = EXCLUDED.parent_discriminator,
                    application_user_id = EXCLUDED.application_user_id
                "#,
            )
            .bind(comment.id)
            .bind(&comment.body)
            .bind(comment.parent_id)
            .bind(comment.parent_discriminator.as_str())
            .bind(comment.application_user_id)
            .bind(comment.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl PersistenceHandle for Database {
    async fn all_migrations_applied(&self) -> anyhow::Result<bool> {
        let pending = self.pending_migrations().await?;

        for migration in &pending {
            warn!(
                "Migration {} ({}) has not been applied",
                migration.version, migration.description
            );
        }

        Ok(pending.is_empty())
    }
}

/// Opens a dedicated pool for a seed run and closes it afterwards.
pub struct DatabaseProvider {
    database_url: String,
    max_connections: u32,
}

impl DatabaseProvider {
    pub fn new(database_url: impl Into<String>, max_connections: u32) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections,
        }
    }

    pub fn from_config(config: &SeedConfig) -> Self {
        Self::new(config.database_url.clone(), config.max_connections)
    }
}

#[async_trait]
impl HandleProvider for DatabaseProvider {
    type Handle = Database;

    async fn resolve(&self) -> anyhow::Result<Database> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.database_url)
            .await?;

        info!("Connected to database");
        Ok(Database::new(pool))
    }

    async fn release(&self, handle: Database) {
        handle.pool.close().await;
        info!("Closed database connection");
    }
}
