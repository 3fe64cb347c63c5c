//! Deterministic generators for baseline data.
//!
//! Every generator draws from an [`StdRng`](rand::rngs::StdRng) seeded with a
//! fixed value and derives row ids from stable keys, so each seed run produces
//! the same rows and the upserts converge:
//! - [`UserGenerator`]: demo accounts
//! - [`ThoughtHoleGenerator`]: the thought hole catalogue
//! - [`ThoughtGenerator`]: thoughts spread over holes and authors
//! - [`CommentGenerator`]: comments on thoughts

pub mod comment;
pub mod thought;
pub mod thought_hole;
pub mod user;

use rand::{SeedableRng, rngs::StdRng};
use time::{OffsetDateTime, macros::datetime};
use uuid::Uuid;

use crate::models::{ApplicationUser, Comment, Thought, ThoughtHole};

pub use comment::{CommentGenConfig, CommentGenerator};
pub use thought::{ThoughtGenConfig, ThoughtGenerator};
pub use thought_hole::ThoughtHoleGenerator;
pub use user::{UserGenConfig, UserGenerator};

/// Namespace for v5 ids of seeded rows.
const SEED_NAMESPACE: Uuid = Uuid::from_u128(0x6f3a_2c1e_9b7d_4e50_8a61_d2c4_b8e9_0f17);

/// Timestamp all seeded rows are dated from.
pub const SEED_EPOCH: OffsetDateTime = datetime!(2018-01-01 0:00 UTC);

/// Author recorded in the audit columns of seeded rows.
pub const SEED_AUTHOR: &str = "seed";

/// Derives a stable id for a seeded row of `kind` identified by `key`.
pub fn seed_id(kind: &str, key: &str) -> Uuid {
    Uuid::new_v5(&SEED_NAMESPACE, format!("{kind}/{key}").as_bytes())
}

/// Fixed rng for one entity kind.
pub(crate) fn seeded_rng(kind: &str) -> StdRng {
    let seed = kind
        .bytes()
        .fold(0x5eed_u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
    StdRng::seed_from_u64(seed)
}

/// The complete baseline data set.
#[derive(Debug, Clone)]
pub struct Baseline {
    pub users: Vec<ApplicationUser>,
    pub thought_holes: Vec<ThoughtHole>,
    pub thoughts: Vec<Thought>,
    pub comments: Vec<Comment>,
}

/// Sizes of the baseline data set.
#[derive(Debug, Clone, Default)]
pub struct BaselineConfig {
    pub users: UserGenConfig,
    pub thoughts: ThoughtGenConfig,
    pub comments: CommentGenConfig,
}

impl Baseline {
    /// Generates the whole data set. Each entity kind uses its own rng, so
    /// a unit that only needs users gets the same users as one that needs
    /// everything.
    pub fn generate(config: &BaselineConfig) -> Self {
        let users = UserGenerator::with_config(config.users.clone()).generate();
        let thought_holes = ThoughtHoleGenerator::new().generate();
        let thoughts = ThoughtGenerator::with_config(config.thoughts.clone())
            .generate(&thought_holes, &users);
        let comments = CommentGenerator::with_config(config.comments.clone()).generate(
            &thought_holes,
            &thoughts,
            &users,
        );

        Self {
            users,
            thought_holes,
            thoughts,
            comments,
        }
    }
}
