//! Ordered seed runner.
//!
//! Seed units are small, idempotent routines that insert or update baseline
//! data. A host registers them in a [`SeedRegistry`], then calls
//! [`run_seeds`] (or [`run_seeds_with`] when the runner should resolve and
//! release the persistence handle itself) once at startup.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_engine::prelude::*;
//!
//! let mut registry = SeedRegistry::new();
//! registry.register_default::<UsersSeed>("users")?;
//! registry.register_default::<PostsSeed>("posts")?;
//!
//! let report = run_seeds(&db, 100, &registry).await?;
//! for failure in report.failures() {
//!     eprintln!("{} failed", failure.name);
//! }
//! ```

pub mod error;
pub mod handle;
pub mod registry;
pub mod report;
pub mod runner;
pub mod unit;

pub use error::SeedError;
pub use handle::{HandleProvider, PersistenceHandle};
pub use registry::{DiscoveredUnit, Discovery, SeedRegistry, UnitFactory};
pub use report::{FailureStage, Outcome, SeedRunReport, UnitOutcome};
pub use runner::{run_seeds, run_seeds_with};
pub use unit::SeedUnit;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::{
        HandleProvider, PersistenceHandle, SeedError, SeedRegistry, SeedRunReport, SeedUnit,
        run_seeds, run_seeds_with,
    };
}
