//! Outcome of a seed run.

use std::fmt;
use std::time::Duration;

/// Where a unit failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// The registered factory could not build the unit.
    Construct,
    /// `apply` returned an error.
    Apply,
}

impl FailureStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureStage::Construct => "construct",
            FailureStage::Apply => "apply",
        }
    }
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Failed { stage: FailureStage, error: String },
}

/// One line of the run report.
#[derive(Debug, Clone)]
pub struct UnitOutcome {
    pub name: String,
    /// Unknown when the unit could not be constructed.
    pub order_key: Option<i32>,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

impl UnitOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self.outcome, Outcome::Applied)
    }
}

/// Ordered list of unit outcomes produced by a completed run.
///
/// Construction failures come first, in registration order, followed by the
/// applied units in the order they ran.
#[derive(Debug, Clone, Default)]
pub struct SeedRunReport {
    /// Number of registrations instantiated for the run, including failed ones.
    pub discovered: usize,
    pub outcomes: Vec<UnitOutcome>,
    pub elapsed: Duration,
}

impl SeedRunReport {
    pub fn applied(&self) -> impl Iterator<Item = &UnitOutcome> {
        self.outcomes.iter().filter(|o| o.is_applied())
    }

    pub fn failures(&self) -> impl Iterator<Item = &UnitOutcome> {
        self.outcomes.iter().filter(|o| !o.is_applied())
    }

    /// True when every discovered unit applied successfully.
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Names of the units whose `apply` was invoked, in invocation order.
    pub fn apply_order(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| match &o.outcome {
                Outcome::Applied => true,
                Outcome::Failed { stage, .. } => *stage == FailureStage::Apply,
            })
            .map(|o| o.name.as_str())
            .collect()
    }
}
