//! Baseline data seeding for RandomThoughts.
//!
//! This crate owns the Postgres schema (as sqlx migrations), the
//! [`Database`](database::Database) handle, and the seed units that fill a
//! freshly migrated database with demo users, thought holes, thoughts, and
//! comments. The `seed` binary runs them at startup through `seed-engine`.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use thoughts::prelude::*;
//!
//! let db = Database::new(pool);
//! db.run_migrations().await?;
//!
//! let report = run_seeds(&db, 100, &seeds::registry()?).await?;
//! assert!(report.is_clean());
//! ```

pub mod config;
pub mod database;
pub mod errors;
pub mod generators;
pub mod models;
pub mod seeds;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::SeedConfig;
    pub use crate::database::{Database, DatabaseProvider};
    pub use crate::errors::AppError;
    pub use crate::generators::{Baseline, BaselineConfig};
    pub use crate::models::{ApplicationUser, Comment, Discriminator, Mood, Thought, ThoughtHole};
    pub use crate::seeds;
    pub use seed_engine::{SeedRunReport, run_seeds, run_seeds_with};
}
