use async_trait::async_trait;
use seed_engine::SeedUnit;
use tracing::info;

use super::SeedRegistration;
use crate::{
    database::Database,
    errors::AppError,
    generators::{Baseline, BaselineConfig},
};

/// Thoughts in every hole. Runs after the users and thought holes it
/// references.
#[derive(Default)]
pub struct ThoughtsSeed {
    config: BaselineConfig,
}

#[async_trait]
impl SeedUnit<Database> for ThoughtsSeed {
    fn order_key(&self) -> i32 {
        2
    }

    async fn apply(&self, db: &Database, batch_size: usize) -> anyhow::Result<()> {
        let Baseline {
            users, thoughts, ..
        } = Baseline::generate(&self.config);
        if users.is_empty() {
            return Err(AppError::InvalidSeedData("thoughts need at least one user".into()).into());
        }

        info!("Seeding {} thoughts...", thoughts.len());

        for (i, chunk) in thoughts.chunks(batch_size).enumerate() {
            db.upsert_thoughts(chunk).await?;
            info!(
                "  Seeded {}/{} thoughts",
                i * batch_size + chunk.len(),
                thoughts.len()
            );
        }

        info!("Seeded {} thoughts", thoughts.len());
        Ok(())
    }
}

fn create() -> anyhow::Result<Box<dyn SeedUnit<Database>>> {
    Ok(Box::new(ThoughtsSeed::default()))
}

inventory::submit! {
    SeedRegistration::new("thoughts", create)
}
