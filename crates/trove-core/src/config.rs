//! Configuration for item generation.

use serde::Deserialize;

/// How composers treat a disqualified special ability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Reroll the ability until one qualifies.
    #[default]
    Normal,
    /// Keep the ability and flag the item invalid. Every roll is consumed
    /// exactly once, so an exhaustive walk stays deterministic.
    Enumeration,
}

/// Configuration for a [`crate::Generator`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Disqualification handling.
    pub mode: GenerationMode,
    /// Attempts `generate_generic` makes before giving up.
    pub max_generic_attempts: u32,
    /// Rolls allowed per special-ability slot in normal mode.
    pub max_special_rerolls: u32,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            mode: GenerationMode::Normal,
            max_generic_attempts: 1000,
            max_special_rerolls: 100,
        }
    }
}

impl GenerateConfig {
    /// Configuration for exhaustive enumeration.
    pub fn enumeration() -> Self {
        Self::default().with_mode(GenerationMode::Enumeration)
    }

    /// Set the generation mode.
    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the generic attempt bound (at least 1).
    pub fn with_max_generic_attempts(mut self, attempts: u32) -> Self {
        self.max_generic_attempts = attempts.max(1);
        self
    }

    /// Set the special-ability reroll bound (at least 1).
    pub fn with_max_special_rerolls(mut self, rerolls: u32) -> Self {
        self.max_special_rerolls = rerolls.max(1);
        self
    }
}
