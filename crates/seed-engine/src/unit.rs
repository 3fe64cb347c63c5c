use async_trait::async_trait;

/// A self-contained, idempotent initialization routine.
///
/// Units are created fresh for every run by their registered factory and
/// dropped when the run ends. `apply` must be an upsert: calling it twice
/// with the same inputs leaves the store in the same state as calling it
/// once.
#[async_trait]
pub trait SeedUnit<H: ?Sized>: Send + Sync {
    /// Relative apply order. Lower keys run first; keys need not be unique.
    fn order_key(&self) -> i32;

    /// Inserts or updates this unit's data, writing at most `batch_size`
    /// rows per statement group.
    async fn apply(&self, handle: &H, batch_size: usize) -> anyhow::Result<()>;
}
