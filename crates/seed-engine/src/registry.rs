//! Registration list of seed units.
//!
//! The registry replaces runtime type scanning: every unit is registered once
//! at process start under a unique name together with a factory, and
//! [`SeedRegistry::discover`] instantiates all of them for a run.

use tracing::debug;

use crate::{error::SeedError, unit::SeedUnit};

/// Factory producing a fresh unit instance for one run.
pub type UnitFactory<H> = Box<dyn Fn() -> anyhow::Result<Box<dyn SeedUnit<H>>> + Send + Sync>;

struct Registration<H> {
    name: String,
    factory: UnitFactory<H>,
}

/// A unit instantiated for the current run.
pub struct DiscoveredUnit<H> {
    pub name: String,
    pub order_key: i32,
    pub unit: Box<dyn SeedUnit<H>>,
}

/// Result of instantiating every registration.
pub struct Discovery<H> {
    pub units: Vec<DiscoveredUnit<H>>,
    /// Registrations whose factory failed, with the error it returned.
    pub failures: Vec<(String, anyhow::Error)>,
}

/// Ordered set of seed unit registrations for handle type `H`.
pub struct SeedRegistry<H> {
    registrations: Vec<Registration<H>>,
}

impl<H: 'static> SeedRegistry<H> {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Registers a unit factory under `name`.
    ///
    /// Names identify units in logs and reports, so a second registration
    /// under an existing name is rejected.
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        factory: F,
    ) -> Result<&mut Self, SeedError>
    where
        F: Fn() -> anyhow::Result<Box<dyn SeedUnit<H>>> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.registrations.iter().any(|r| r.name == name) {
            return Err(SeedError::DuplicateUnit(name));
        }

        debug!("Registered seed unit {name}");
        self.registrations.push(Registration {
            name,
            factory: Box::new(factory),
        });
        Ok(self)
    }

    /// Registers a unit constructed through its `Default` impl.
    pub fn register_default<U>(&mut self, name: impl Into<String>) -> Result<&mut Self, SeedError>
    where
        U: SeedUnit<H> + Default + 'static,
    {
        self.register(name, || {
            let unit: Box<dyn SeedUnit<H>> = Box::new(U::default());
            Ok(unit)
        })
    }

    /// Instantiates every registration exactly once, in registration order.
    pub fn discover(&self) -> Discovery<H> {
        let mut units = Vec::with_capacity(self.registrations.len());
        let mut failures = Vec::new();

        for registration in &self.registrations {
            match (registration.factory)() {
                Ok(unit) => units.push(DiscoveredUnit {
                    name: registration.name.clone(),
                    order_key: unit.order_key(),
                    unit,
                }),
                Err(e) => failures.push((registration.name.clone(), e)),
            }
        }

        Discovery { units, failures }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl<H: 'static> Default for SeedRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
