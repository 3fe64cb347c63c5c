use async_trait::async_trait;
use seed_engine::SeedUnit;
use tracing::info;

use super::SeedRegistration;
use crate::{
    database::Database,
    generators::{UserGenConfig, UserGenerator},
};

/// Demo accounts every other seed refers to.
#[derive(Default)]
pub struct UsersSeed {
    config: UserGenConfig,
}

#[async_trait]
impl SeedUnit<Database> for UsersSeed {
    fn order_key(&self) -> i32 {
        1
    }

    async fn apply(&self, db: &Database, batch_size: usize) -> anyhow::Result<()> {
        let users = UserGenerator::with_config(self.config.clone()).generate();
        info!("Seeding {} users...", users.len());

        for chunk in users.chunks(batch_size) {
            db.upsert_users(chunk).await?;
        }

        info!("Seeded {} users", users.len());
        Ok(())
    }
}

fn create() -> anyhow::Result<Box<dyn SeedUnit<Database>>> {
    Ok(Box::new(UsersSeed::default()))
}

inventory::submit! {
    SeedRegistration::new("users", create)
}
