//! Comment generation for thoughts and thought holes.

use rand::Rng;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::{seed_id, seeded_rng};
use crate::models::{ApplicationUser, Comment, Discriminator, Thought, ThoughtHole};

/// Configuration for comment generation.
#[derive(Debug, Clone)]
pub struct CommentGenConfig {
    /// Upper bound (inclusive) of comments per thought.
    pub max_per_thought: usize,
    /// Comments per thought hole.
    pub per_hole: usize,
    /// Probability that a later comment is the author answering.
    pub author_reply_probability: f64,
}

impl Default for CommentGenConfig {
    fn default() -> Self {
        Self {
            max_per_thought: 3,
            per_hole: 1,
            author_reply_probability: 0.25,
        }
    }
}

/// Generates comments from other users on seeded thoughts and holes.
pub struct CommentGenerator {
    config: CommentGenConfig,
}

impl CommentGenerator {
    pub fn new() -> Self {
        Self {
            config: CommentGenConfig::default(),
        }
    }

    pub fn with_config(config: CommentGenConfig) -> Self {
        Self { config }
    }

    /// Generates comments for every thought and every hole. Needs at least
    /// two users so that a thought's first comment never comes from its
    /// author.
    pub fn generate(
        &self,
        holes: &[ThoughtHole],
        thoughts: &[Thought],
        users: &[ApplicationUser],
    ) -> Vec<Comment> {
        if users.len() < 2 {
            return Vec::new();
        }

        let mut rng = seeded_rng("comment");
        let mut comments = Vec::new();

        for thought in thoughts {
            let count = rng.gen_range(0..=self.config.max_per_thought);
            for i in 0..count {
                let commenter = if i > 0 && rng.gen_bool(self.config.author_reply_probability) {
                    thought.application_user_id
                } else {
                    pick_other(users, thought.application_user_id, &mut rng)
                };
                let body = comment_text(commenter == thought.application_user_id, &mut rng);

                comments.push(Comment {
                    id: seed_id("comment", &format!("thought/{}/{i}", thought.id)),
                    body,
                    parent_id: thought.id,
                    parent_discriminator: Discriminator::Thought,
                    application_user_id: commenter,
                    created_at: comment_time(thought.created_at, i, &mut rng),
                });
            }
        }

        for hole in holes {
            for i in 0..self.config.per_hole {
                let commenter = users[rng.gen_range(0..users.len())].id;
                comments.push(Comment {
                    id: seed_id("comment", &format!("thought_hole/{}/{i}", hole.id)),
                    body: comment_text(false, &mut rng),
                    parent_id: hole.id,
                    parent_discriminator: Discriminator::ThoughtHole,
                    application_user_id: commenter,
                    created_at: comment_time(hole.created_at, i, &mut rng),
                });
            }
        }

        comments
    }
}

impl Default for CommentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks a user other than `excluded`. Callers guarantee two or more users.
fn pick_other(users: &[ApplicationUser], excluded: Uuid, rng: &mut impl Rng) -> Uuid {
    loop {
        let candidate = users[rng.gen_range(0..users.len())].id;
        if candidate != excluded {
            return candidate;
        }
    }
}

fn comment_time(parent_created: OffsetDateTime, index: usize, rng: &mut impl Rng) -> OffsetDateTime {
    parent_created
        + Duration::hours(rng.gen_range(1..48))
        + Duration::minutes(rng.gen_range(0..60) * index as i64)
}

fn comment_text(by_author: bool, rng: &mut impl Rng) -> String {
    let templates: &[&str] = if by_author {
        &[
            "Thanks for reading!",
            "Glad I'm not the only one.",
            "Exactly what I meant.",
            "Still thinking about this one.",
        ]
    } else {
        &[
            "This is so relatable.",
            "I had the same thought last week!",
            "Never looked at it that way.",
            "Okay, now I can't stop thinking about it.",
            "Strong agree.",
            "Respectfully, no.",
            "Came here to say this.",
            "Made my day.",
        ]
    };
    templates[rng.gen_range(0..templates.len())].to_string()
}
