//! Demo account generation.

use fake::{Fake, faker::name::en::Name};
use rand::Rng;
use time::Duration;

use super::{SEED_EPOCH, seed_id, seeded_rng};
use crate::models::ApplicationUser;

/// Configuration for user generation.
#[derive(Debug, Clone)]
pub struct UserGenConfig {
    /// Number of demo accounts.
    pub count: usize,
    /// Domain used for every generated email address.
    pub email_domain: String,
}

impl Default for UserGenConfig {
    fn default() -> Self {
        Self {
            count: 12,
            email_domain: "randomthoughts.dev".to_string(),
        }
    }
}

/// Generates the demo accounts.
pub struct UserGenerator {
    config: UserGenConfig,
}

impl UserGenerator {
    pub fn new() -> Self {
        Self {
            config: UserGenConfig::default(),
        }
    }

    pub fn with_config(config: UserGenConfig) -> Self {
        Self { config }
    }

    /// Generates all configured users.
    pub fn generate(&self) -> Vec<ApplicationUser> {
        let mut rng = seeded_rng("user");
        (0..self.config.count)
            .map(|i| self.generate_one(i, &mut rng))
            .collect()
    }

    fn generate_one(&self, index: usize, rng: &mut impl Rng) -> ApplicationUser {
        let display_name: String = Name().fake_with_rng(rng);
        // The index keeps user names unique even when the faker repeats a name.
        let user_name = format!("{}{}", normalize(&display_name), index + 1);
        let email = format!("{user_name}@{}", self.config.email_domain);
        let joined_after = Duration::hours(rng.gen_range(0..24 * 30));

        ApplicationUser {
            id: seed_id("user", &index.to_string()),
            normalized_email: email.to_uppercase(),
            email,
            user_name,
            display_name,
            created_at: SEED_EPOCH + joined_after,
        }
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercases a display name and joins its words with dots.
fn normalize(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(".")
}
