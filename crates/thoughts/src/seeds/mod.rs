//! RandomThoughts seed units.
//!
//! Each unit registers itself with `inventory::submit!`, so adding a seed is
//! a matter of adding a module here; [`registry`] collects them at startup.

mod comments;
mod thought_holes;
mod thoughts;
mod users;

use seed_engine::{SeedError, SeedRegistry, SeedUnit};
use tracing::debug;

use crate::database::Database;

pub use comments::CommentsSeed;
pub use thought_holes::ThoughtHolesSeed;
pub use thoughts::ThoughtsSeed;
pub use users::UsersSeed;

/// Link-time registration of a seed unit.
pub struct SeedRegistration {
    pub name: &'static str,
    pub create: fn() -> anyhow::Result<Box<dyn SeedUnit<Database>>>,
}

impl SeedRegistration {
    pub const fn new(
        name: &'static str,
        create: fn() -> anyhow::Result<Box<dyn SeedUnit<Database>>>,
    ) -> Self {
        Self { name, create }
    }
}

inventory::collect!(SeedRegistration);

/// Builds the registry from every submitted [`SeedRegistration`].
///
/// Inventory order is unspecified; the runner's name tie-break keeps the
/// apply order deterministic anyway.
pub fn registry() -> Result<SeedRegistry<Database>, SeedError> {
    let mut registry = SeedRegistry::new();

    for registration in inventory::iter::<SeedRegistration> {
        registry.register(registration.name, registration.create)?;
    }

    debug!("Collected {} seed registrations", registry.len());
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_collects_all_units() {
        let registry = registry().unwrap();

        let mut names: Vec<_> = registry.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["comments", "thought_holes", "thoughts", "users"]);
    }

    #[test]
    fn test_units_ordered_after_their_dependencies() {
        let registry = registry().unwrap();
        let discovery = registry.discover();
        assert!(discovery.failures.is_empty());

        let key = |name: &str| {
            discovery
                .units
                .iter()
                .find(|u| u.name == name)
                .map(|u| u.order_key)
                .unwrap()
        };
        assert!(key("users") < key("thoughts"));
        assert!(key("thought_holes") < key("thoughts"));
        assert!(key("thoughts") < key("comments"));
    }
}
