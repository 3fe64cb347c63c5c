//! Thought generation.

use fake::{
    Fake,
    faker::lorem::en::{Paragraph, Sentence},
};
use rand::Rng;
use time::Duration;

use super::{SEED_AUTHOR, seed_id, seeded_rng};
use crate::models::{ApplicationUser, Mood, Thought, ThoughtHole};

/// Configuration for thought generation.
#[derive(Debug, Clone)]
pub struct ThoughtGenConfig {
    /// Thoughts generated in every thought hole.
    pub per_hole: usize,
    /// Upper bound (exclusive) for seeded like counts.
    pub max_likes: i32,
    /// Views are at least the likes plus a value below this bound.
    pub max_extra_views: i32,
}

impl Default for ThoughtGenConfig {
    fn default() -> Self {
        Self {
            per_hole: 5,
            max_likes: 200,
            max_extra_views: 1000,
        }
    }
}

/// Generates thoughts spread over thought holes and authors.
pub struct ThoughtGenerator {
    config: ThoughtGenConfig,
}

impl ThoughtGenerator {
    pub fn new() -> Self {
        Self {
            config: ThoughtGenConfig::default(),
        }
    }

    pub fn with_config(config: ThoughtGenConfig) -> Self {
        Self { config }
    }

    /// Generates `per_hole` thoughts for every hole. Returns nothing when
    /// there are no authors.
    pub fn generate(&self, holes: &[ThoughtHole], users: &[ApplicationUser]) -> Vec<Thought> {
        if users.is_empty() {
            return Vec::new();
        }

        let mut rng = seeded_rng("thought");
        let mut thoughts = Vec::with_capacity(holes.len() * self.config.per_hole);

        for hole in holes {
            for i in 0..self.config.per_hole {
                let author = &users[rng.gen_range(0..users.len())];
                thoughts.push(self.generate_one(hole, author, i, &mut rng));
            }
        }

        thoughts
    }

    fn generate_one(
        &self,
        hole: &ThoughtHole,
        author: &ApplicationUser,
        index: usize,
        rng: &mut impl Rng,
    ) -> Thought {
        let title: String = Sentence(2..6).fake_with_rng(rng);
        let body: String = Paragraph(1..4).fake_with_rng(rng);
        let mood = Mood::ALL[rng.gen_range(0..Mood::ALL.len())];
        let likes = rng.gen_range(0..self.config.max_likes.max(1));
        let views = likes + rng.gen_range(0..self.config.max_extra_views.max(1));

        // Never dated before the hole or the author existed.
        let created_at = hole.created_at.max(author.created_at)
            + Duration::minutes(rng.gen_range(0..60 * 24 * 90));

        Thought {
            id: seed_id("thought", &format!("{}/{index}", hole.name)),
            title: title.trim_end_matches('.').to_string(),
            body,
            mood,
            likes,
            views,
            thought_hole_id: hole.id,
            application_user_id: author.id,
            created_at,
            modified_at: created_at,
            created_by: Some(author.user_name.clone()),
            modified_by: Some(SEED_AUTHOR.to_string()),
        }
    }
}

impl Default for ThoughtGenerator {
    fn default() -> Self {
        Self::new()
    }
}
