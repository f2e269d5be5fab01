use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{RollOutcome, RollSource};
use crate::error::DiceResult;
use crate::expr::DiceExpr;

/// Rolls dice with a pseudorandom generator.
#[derive(Debug, Clone)]
pub struct PseudorandomRoller {
    rng: StdRng,
}

impl PseudorandomRoller {
    /// A roller seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A reproducible roller.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Roll without going through the trait; pseudorandom rolls never end.
    pub fn roll_value(&mut self, expr: &DiceExpr) -> u32 {
        expr.roll(&mut self.rng)
    }
}

impl Default for PseudorandomRoller {
    fn default() -> Self {
        Self::new()
    }
}

impl RollSource for PseudorandomRoller {
    fn roll(&mut self, expr: &DiceExpr, _purpose: &str) -> DiceResult<RollOutcome> {
        Ok(RollOutcome::Rolled(self.roll_value(expr)))
    }
}
