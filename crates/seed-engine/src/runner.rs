//! The seed run: precondition check, discovery, ordering, apply loop.

use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use crate::{
    error::SeedError,
    handle::{HandleProvider, PersistenceHandle},
    registry::{DiscoveredUnit, Discovery, SeedRegistry},
    report::{FailureStage, Outcome, SeedRunReport, UnitOutcome},
};

/// Runs every registered seed unit against a caller-owned handle.
///
/// Fails only when `batch_size` is zero or the handle reports pending
/// migrations (or cannot answer); no unit is constructed or applied in those
/// cases. Otherwise all units are sorted by order key (ties by name) before
/// the first one is applied, and a unit failure is logged and recorded in the
/// report without stopping the run.
///
/// The handle is borrowed and never released here.
pub async fn run_seeds<H>(
    handle: &H,
    batch_size: usize,
    registry: &SeedRegistry<H>,
) -> Result<SeedRunReport, SeedError>
where
    H: PersistenceHandle + 'static,
{
    if batch_size == 0 {
        return Err(SeedError::InvalidBatchSize);
    }

    let started = Instant::now();
    info!("Starting the seeding of the objects...");

    match handle.all_migrations_applied().await {
        Ok(true) => {}
        Ok(false) => {
            error!("Aborting seed run: migrations are pending");
            return Err(SeedError::MigrationsPending);
        }
        Err(e) => {
            error!("Aborting seed run: migration check failed: {e:#}");
            return Err(SeedError::MigrationCheck(e));
        }
    }

    let Discovery {
        mut units,
        failures,
    } = registry.discover();
    let discovered = units.len() + failures.len();
    info!("Discovered {} seed units", discovered);

    let mut outcomes = Vec::with_capacity(discovered);
    for (name, e) in failures {
        error!("Failed to construct seed unit {name}: {e:#}");
        outcomes.push(UnitOutcome {
            name,
            order_key: None,
            outcome: Outcome::Failed {
                stage: FailureStage::Construct,
                error: format!("{e:#}"),
            },
            elapsed: Duration::ZERO,
        });
    }

    // sort_by is stable; the name tie-break makes the order independent of
    // registration order.
    units.sort_by(|a, b| {
        a.order_key
            .cmp(&b.order_key)
            .then_with(|| a.name.cmp(&b.name))
    });

    for DiscoveredUnit {
        name,
        order_key,
        unit,
    } in units
    {
        debug!("Applying seed unit {name} (order {order_key})");
        let unit_started = Instant::now();

        let outcome = match unit.apply(handle, batch_size).await {
            Ok(()) => Outcome::Applied,
            Err(e) => {
                error!("Exception seeding in the seed unit {name}: {e:#}");
                Outcome::Failed {
                    stage: FailureStage::Apply,
                    error: format!("{e:#}"),
                }
            }
        };

        outcomes.push(UnitOutcome {
            name,
            order_key: Some(order_key),
            outcome,
            elapsed: unit_started.elapsed(),
        });
    }

    let report = SeedRunReport {
        discovered,
        outcomes,
        elapsed: started.elapsed(),
    };

    info!(
        "Finished the seeding process after {:?} ({} applied, {} failed)",
        report.elapsed,
        report.applied().count(),
        report.failures().count()
    );
    Ok(report)
}

/// Resolves a handle through `provider`, runs the seeds, and releases it.
///
/// The handle is released on every path after a successful resolve,
/// including a pending-migrations abort.
pub async fn run_seeds_with<P>(
    provider: &P,
    batch_size: usize,
    registry: &SeedRegistry<P::Handle>,
) -> Result<SeedRunReport, SeedError>
where
    P: HandleProvider,
    P::Handle: 'static,
{
    if batch_size == 0 {
        return Err(SeedError::InvalidBatchSize);
    }

    let handle = provider.resolve().await.map_err(SeedError::Resolve)?;
    let result = run_seeds(&handle, batch_size, registry).await;

    provider.release(handle).await;
    debug!("Released persistence handle");

    result
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;

    use super::*;
    use crate::unit::SeedUnit;

    #[derive(Default)]
    struct StubHandle {
        pending: bool,
        broken: bool,
        applied: Mutex<Vec<(String, usize)>>,
    }

    impl StubHandle {
        fn migrated() -> Self {
            Self::default()
        }

        fn pending() -> Self {
            Self {
                pending: true,
                ..Default::default()
            }
        }

        fn applied(&self) -> Vec<String> {
            self.applied
                .lock()
                .unwrap()
                .iter()
                .map(|(name, _)| name.clone())
                .collect()
        }
    }

    #[async_trait]
    impl PersistenceHandle for StubHandle {
        async fn all_migrations_applied(&self) -> anyhow::Result<bool> {
            if self.broken {
                anyhow::bail!("connection refused");
            }
            Ok(!self.pending)
        }
    }

    struct Recording {
        name: &'static str,
        key: i32,
        fail: bool,
    }

    #[async_trait]
    impl SeedUnit<StubHandle> for Recording {
        fn order_key(&self) -> i32 {
            self.key
        }

        async fn apply(&self, handle: &StubHandle, batch_size: usize) -> anyhow::Result<()> {
            handle
                .applied
                .lock()
                .unwrap()
                .push((self.name.to_string(), batch_size));
            if self.fail {
                anyhow::bail!("unique constraint violated");
            }
            Ok(())
        }
    }

    fn registry(units: &[(&'static str, i32, bool)]) -> SeedRegistry<StubHandle> {
        let mut registry = SeedRegistry::new();
        for &(name, key, fail) in units {
            registry
                .register(name, move || {
                    let unit: Box<dyn SeedUnit<StubHandle>> =
                        Box::new(Recording { name, key, fail });
                    Ok(unit)
                })
                .unwrap();
        }
        registry
    }

    #[tokio::test]
    async fn test_applies_in_ascending_order_key() {
        let handle = StubHandle::migrated();
        let registry = registry(&[("five", 5, false), ("one", 1, false), ("three", 3, false)]);

        let report = run_seeds(&handle, 100, &registry).await.unwrap();

        assert_eq!(handle.applied(), vec!["one", "three", "five"]);
        assert_eq!(report.apply_order(), vec!["one", "three", "five"]);
        assert_eq!(report.discovered, 3);
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn test_ties_broken_by_name() {
        let handle = StubHandle::migrated();
        let registry = registry(&[("C", 10, false), ("A", 10, false), ("B", 1, false)]);

        run_seeds(&handle, 100, &registry).await.unwrap();

        assert_eq!(handle.applied(), vec!["B", "A", "C"]);
    }

    #[tokio::test]
    async fn test_failing_unit_does_not_stop_run() {
        let handle = StubHandle::migrated();
        let registry = registry(&[("first", 1, false), ("broken", 2, true), ("last", 3, false)]);

        let report = run_seeds(&handle, 100, &registry).await.unwrap();

        assert_eq!(handle.applied(), vec!["first", "broken", "last"]);
        assert_eq!(report.applied().count(), 2);

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].name, "broken");
        assert_eq!(
            failures[0].outcome,
            Outcome::Failed {
                stage: FailureStage::Apply,
                error: "unique constraint violated".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_pending_migrations_abort_before_any_apply() {
        let handle = StubHandle::pending();
        let registry = registry(&[("one", 1, false), ("two", 2, false)]);

        let err = run_seeds(&handle, 100, &registry).await.unwrap_err();

        assert!(matches!(err, SeedError::MigrationsPending));
        assert!(handle.applied().is_empty());
    }

    #[tokio::test]
    async fn test_pending_migrations_skip_construction() {
        let constructed = Arc::new(AtomicUsize::new(0));
        let mut registry = SeedRegistry::<StubHandle>::new();
        let counter = constructed.clone();
        registry
            .register("counted", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                let unit: Box<dyn SeedUnit<StubHandle>> = Box::new(Recording {
                    name: "counted",
                    key: 0,
                    fail: false,
                });
                Ok(unit)
            })
            .unwrap();

        let result = run_seeds(&StubHandle::pending(), 100, &registry).await;

        assert!(result.is_err());
        assert_eq!(constructed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_migration_check_error_is_fatal() {
        let handle = StubHandle {
            broken: true,
            ..Default::default()
        };
        let registry = registry(&[("one", 1, false)]);

        let err = run_seeds(&handle, 100, &registry).await.unwrap_err();

        assert!(matches!(err, SeedError::MigrationCheck(_)));
        assert!(handle.applied().is_empty());
    }

    #[tokio::test]
    async fn test_construction_failure_is_reported_not_fatal() {
        let handle = StubHandle::migrated();
        let mut registry = registry(&[("users", 1, false)]);
        registry
            .register("needs_config", || Err(anyhow::anyhow!("SEED_FILE not set")))
            .unwrap();

        let report = run_seeds(&handle, 100, &registry).await.unwrap();

        assert_eq!(handle.applied(), vec!["users"]);
        assert_eq!(report.discovered, 2);
        let failure = report.failures().next().unwrap();
        assert_eq!(failure.name, "needs_config");
        assert_eq!(failure.order_key, None);
        assert!(matches!(
            failure.outcome,
            Outcome::Failed {
                stage: FailureStage::Construct,
                ..
            }
        ));
        assert_eq!(report.apply_order(), vec!["users"]);
    }

    #[tokio::test]
    async fn test_batch_size_passed_through() {
        let handle = StubHandle::migrated();
        let registry = registry(&[("one", 1, false)]);

        run_seeds(&handle, 25, &registry).await.unwrap();

        assert_eq!(handle.applied.lock().unwrap()[0].1, 25);
    }

    #[tokio::test]
    async fn test_zero_batch_size_rejected() {
        let handle = StubHandle::migrated();
        let registry = registry(&[("one", 1, false)]);

        let err = run_seeds(&handle, 0, &registry).await.unwrap_err();

        assert!(matches!(err, SeedError::InvalidBatchSize));
        assert!(handle.applied().is_empty());
    }

    #[tokio::test]
    async fn test_empty_registry_completes() {
        let report = run_seeds(&StubHandle::migrated(), 100, &SeedRegistry::new())
            .await
            .unwrap();

        assert_eq!(report.discovered, 0);
        assert!(report.outcomes.is_empty());
        assert!(report.is_clean());
    }

    struct StubProvider {
        pending: bool,
        fail_resolve: bool,
        resolved: AtomicUsize,
        released: Mutex<Vec<Vec<String>>>,
    }

    impl StubProvider {
        fn new(pending: bool) -> Self {
            Self {
                pending,
                fail_resolve: false,
                resolved: AtomicUsize::new(0),
                released: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HandleProvider for StubProvider {
        type Handle = StubHandle;

        async fn resolve(&self) -> anyhow::Result<StubHandle> {
            if self.fail_resolve {
                anyhow::bail!("no database configured");
            }
            self.resolved.fetch_add(1, Ordering::SeqCst);
            Ok(StubHandle {
                pending: self.pending,
                ..Default::default()
            })
        }

        async fn release(&self, handle: StubHandle) {
            self.released.lock().unwrap().push(handle.applied());
        }
    }

    #[tokio::test]
    async fn test_provider_handle_released_after_run() {
        let provider = StubProvider::new(false);
        let registry = registry(&[("two", 2, false), ("one", 1, true)]);

        let report = run_seeds_with(&provider, 100, &registry).await.unwrap();

        assert_eq!(report.apply_order(), vec!["one", "two"]);
        assert_eq!(provider.resolved.load(Ordering::SeqCst), 1);
        assert_eq!(
            *provider.released.lock().unwrap(),
            vec![vec!["one".to_string(), "two".to_string()]]
        );
    }

    #[tokio::test]
    async fn test_provider_handle_released_on_abort() {
        let provider = StubProvider::new(true);
        let registry = registry(&[("one", 1, false)]);

        let err = run_seeds_with(&provider, 100, &registry).await.unwrap_err();

        assert!(matches!(err, SeedError::MigrationsPending));
        assert_eq!(provider.released.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_provider_resolve_failure() {
        let provider = StubProvider {
            fail_resolve: true,
            ..StubProvider::new(false)
        };
        let registry = registry(&[("one", 1, false)]);

        let err = run_seeds_with(&provider, 100, &registry).await.unwrap_err();

        assert!(matches!(err, SeedError::Resolve(_)));
        assert!(provider.released.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_borrowed_handle_stays_usable() {
        let handle = StubHandle::migrated();
        let registry = registry(&[("one", 1, false)]);

        run_seeds(&handle, 100, &registry).await.unwrap();
        run_seeds(&handle, 100, &registry).await.unwrap();

        assert_eq!(handle.applied(), vec!["one", "one"]);
    }
}
