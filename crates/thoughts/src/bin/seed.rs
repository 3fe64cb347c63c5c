//! Startup seed script - fills the database with the RandomThoughts baseline data
//!
//! Run with:
//! ```
//! DATABASE_URL=postgres://... cargo run -p thoughts --bin seed
//! ```
//!
//! Set `SEED_APPLY_MIGRATIONS=true` to migrate the schema first; otherwise the
//! run aborts when migrations are pending.

use seed_engine::{HandleProvider, Outcome, SeedRunReport, run_seeds, run_seeds_with};
use thoughts::{config::SeedConfig, database::DatabaseProvider, seeds};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env();
    let provider = DatabaseProvider::from_config(&config);
    let registry = seeds::registry()?;

    let report = if config.apply_migrations {
        // The migrations need the same pool, so resolve it here and lend it to the run.
        let db = provider.resolve().await?;
        let result = match db.run_migrations().await {
            Ok(()) => run_seeds(&db, config.batch_size, &registry)
                .await
                .map_err(anyhow::Error::from),
            Err(e) => Err(e.into()),
        };
        provider.release(db).await;
        result?
    } else {
        run_seeds_with(&provider, config.batch_size, &registry).await?
    };

    log_summary(&report);
    Ok(())
}

fn log_summary(report: &SeedRunReport) {
    tracing::info!("Seed completed!");
    tracing::info!("  Discovered: {}", report.discovered);
    tracing::info!("  Applied: {}", report.applied().count());
    tracing::info!("  Failed: {}", report.failures().count());

    for unit in report.failures() {
        if let Outcome::Failed { stage, error } = &unit.outcome {
            tracing::warn!("  {} ({stage}): {error}", unit.name);
        }
    }
}
