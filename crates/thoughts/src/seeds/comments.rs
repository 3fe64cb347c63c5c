use async_trait::async_trait;
use seed_engine::SeedUnit;
use tracing::info;

use super::SeedRegistration;
use crate::{
    database::Database,
    errors::AppError,
    generators::{Baseline, BaselineConfig},
};

/// Comments on seeded thoughts and holes. Runs last.
#[derive(Default)]
pub struct CommentsSeed {
    config: BaselineConfig,
}

#[async_trait]
impl SeedUnit<Database> for CommentsSeed {
    fn order_key(&self) -> i32 {
        3
    }

    async fn apply(&self, db: &Database, batch_size: usize) -> anyhow::Result<()> {
        let Baseline {
            users, comments, ..
        } = Baseline::generate(&self.config);
        if users.len() < 2 {
            return Err(AppError::InvalidSeedData("comments need at least two users".into()).into());
        }

        info!("Seeding {} comments...", comments.len());

        for chunk in comments.chunks(batch_size) {
            db.upsert_comments(chunk).await?;
        }

        info!("Seeded {} comments", comments.len());
        Ok(())
    }
}

fn create() -> anyhow::Result<Box<dyn SeedUnit<Database>>> {
    Ok(Box::new(CommentsSeed::default()))
}

inventory::submit! {
    SeedRegistration::new("comments", create)
}
