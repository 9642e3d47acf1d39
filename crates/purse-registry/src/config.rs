use serde::{Deserialize, Serialize};

/// What the registry does when a sink refuses a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertionMode {
    /// Fail the insertion with an error naming the rule, after undoing
    /// everything the failed call had inserted.
    Strict,
    /// Log a warning, skip the rule, and carry on.
    Relaxed,
}

impl Default for InsertionMode {
    /// `Strict` in debug builds, `Relaxed` in release builds.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Strict
        } else {
            Self::Relaxed
        }
    }
}

/// Configuration for a [`StyleRegistry`](crate::StyleRegistry).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub mode: InsertionMode,
}

impl RegistryConfig {
    /// Fail fast on sink errors. Meant for development and tests.
    pub fn strict() -> Self {
        Self {
            mode: InsertionMode::Strict,
        }
    }

    /// Degrade gracefully on sink errors. Meant for production.
    pub fn relaxed() -> Self {
        Self {
            mode: InsertionMode::Relaxed,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.mode == InsertionMode::Strict
    }
}
