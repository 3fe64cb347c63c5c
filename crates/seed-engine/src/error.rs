use thiserror::Error;

/// Errors that abort a seed run or reject a registration.
///
/// Failures of individual seed units are not represented here; they are
/// recorded in the [`SeedRunReport`](crate::SeedRunReport) instead.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("The migrations must be applied in order to run the seeds")]
    MigrationsPending,

    #[error("Failed to check migration status: {0}")]
    MigrationCheck(#[source] anyhow::Error),

    #[error("Failed to resolve persistence handle: {0}")]
    Resolve(#[source] anyhow::Error),

    #[error("Batch size must be greater than zero")]
    InvalidBatchSize,

    #[error("Duplicate seed unit registration: {0}")]
    DuplicateUnit(String),
}
