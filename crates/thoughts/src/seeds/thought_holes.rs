use async_trait::async_trait;
use seed_engine::SeedUnit;
use tracing::info;

use super::SeedRegistration;
use crate::{database::Database, generators::ThoughtHoleGenerator};

#[derive(Default)]
pub struct ThoughtHolesSeed;

#[async_trait]
impl SeedUnit<Database> for ThoughtHolesSeed {
    fn order_key(&self) -> i32 {
        1
    }

    async fn apply(&self, db: &Database, batch_size: usize) -> anyhow::Result<()> {
        let holes = ThoughtHoleGenerator::new().generate();
        info!("Seeding {} thought holes...", holes.len());

        for chunk in holes.chunks(batch_size) {
            db.upsert_thought_holes(chunk).await?;
        }

        info!("Seeded {} thought holes", holes.len());
        Ok(())
    }
}

fn create() -> anyhow::Result<Box<dyn SeedUnit<Database>>> {
    Ok(Box::new(ThoughtHolesSeed))
}

inventory::submit! {
    SeedRegistration::new("thought_holes", create)
}
