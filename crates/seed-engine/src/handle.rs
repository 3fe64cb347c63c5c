//! Persistence handle contracts.

use async_trait::async_trait;

/// The runner's view of the backing store.
///
/// Seed units receive the concrete handle type and use it for their own
/// reads and writes; the runner itself only asks whether the schema is
/// fully migrated.
#[async_trait]
pub trait PersistenceHandle: Send + Sync {
    /// Returns `true` when every known schema migration has been applied.
    async fn all_migrations_applied(&self) -> anyhow::Result<bool>;
}

/// Resolves a handle for a run that owns it.
///
/// Used by [`run_seeds_with`](crate::run_seeds_with): the handle is created
/// for the run and released through [`HandleProvider::release`] when it ends.
#[async_trait]
pub trait HandleProvider: Send + Sync {
    type Handle: PersistenceHandle;

    async fn resolve(&self) -> anyhow::Result<Self::Handle>;

    async fn release(&self, handle: Self::Handle);
}
