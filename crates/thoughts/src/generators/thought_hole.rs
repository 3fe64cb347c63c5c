//! The fixed thought hole catalogue.

use time::Duration;

use super::{SEED_AUTHOR, SEED_EPOCH, seed_id};
use crate::models::ThoughtHole;

const CATALOGUE: &[(&str, &str)] = &[
    (
        "Shower Thoughts",
        "Ideas that arrive uninvited while the water is running.",
    ),
    (
        "Late Night",
        "Whatever keeps you awake after midnight.",
    ),
    (
        "Work",
        "Meetings, deadlines, and the coffee machine.",
    ),
    (
        "Gratitude",
        "Small things that went right today.",
    ),
    (
        "What If",
        "Hypotheticals, alternate histories, and wild speculation.",
    ),
    (
        "Confessions",
        "Things you have never said out loud.",
    ),
];

/// Builds the thought hole rows from the catalogue.
pub struct ThoughtHoleGenerator;

impl ThoughtHoleGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self) -> Vec<ThoughtHole> {
        CATALOGUE
            .iter()
            .enumerate()
            .map(|(i, (name, description))| {
                let created_at = SEED_EPOCH + Duration::days(i as i64);
                ThoughtHole {
                    id: seed_id("thought_hole", name),
                    name: name.to_string(),
                    description: description.to_string(),
                    created_at,
                    modified_at: created_at,
                    created_by: Some(SEED_AUTHOR.to_string()),
                    modified_by: Some(SEED_AUTHOR.to_string()),
                }
            })
            .collect()
    }
}

impl Default for ThoughtHoleGenerator {
    fn default() -> Self {
        Self::new()
    }
}
