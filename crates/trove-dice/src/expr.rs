//! Dice expressions.
//!
//! Tables and composers describe rolls as `NdM` ("1d100", "2d4") or as a
//! literal integer, which every roll source returns unchanged.

use std::str::FromStr;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};

static DICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d*)d(\d+)$").expect("dice pattern is valid"));

/// A parsed dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiceExpr {
    /// A literal value, returned as-is.
    Constant(u32),
    /// `count` dice with `sides` sides each, summed.
    Dice {
        /// Number of dice.
        count: u32,
        /// Sides per die.
        sides: u32,
    },
}

impl DiceExpr {
    /// The percentile roll used by every table lookup.
    pub const D100: Self = Self::Dice {
        count: 1,
        sides: 100,
    };

    /// Parse an expression like "1d100", "d20", "2d4" or "42".
    pub fn parse(text: &str) -> DiceResult<Self> {
        let text = text.trim().to_lowercase();
        if let Ok(value) = text.parse::<u32>() {
            return Ok(Self::Constant(value));
        }

        let invalid = || DiceError::InvalidExpression(text.clone());
        let caps = DICE.captures(&text).ok_or_else(invalid)?;
        let count = match &caps[1] {
            "" => 1,
            digits => digits.parse::<u32>().map_err(|_| invalid())?,
        };
        let sides = caps[2].parse::<u32>().map_err(|_| invalid())?;
        if count == 0 || sides == 0 {
            return Err(invalid());
        }
        Ok(Self::Dice { count, sides })
    }

    /// Smallest possible result.
    pub fn min(self) -> u32 {
        match self {
            Self::Constant(value) => value,
            Self::Dice { count, .. } => count,
        }
    }

    /// Largest possible result. This is also the radix an enumerator learns
    /// for the expression.
    pub fn max(self) -> u32 {
        match self {
            Self::Constant(value) => value,
            Self::Dice { count, sides } => count.saturating_mul(sides),
        }
    }

    /// Whether `value` is a result this expression can produce.
    pub fn contains(self, value: u32) -> bool {
        (self.min()..=self.max()).contains(&value)
    }

    /// Chance that one roll of the expression comes up `value`.
    ///
    /// Totals of several dice are not uniform: on 2d4 a 5 comes up four
    /// times in sixteen, a 2 once.
    pub fn chance(self, value: u32) -> f64 {
        if !self.contains(value) {
            return 0.0;
        }
        let (count, sides) = match self {
            Self::Constant(_) => return 1.0,
            Self::Dice { count: 1, sides } => return 1.0 / f64::from(sides),
            Self::Dice { count, sides } => (count, sides as usize),
        };
        // odds[t]: chance the dice rolled so far total t
        let mut odds = vec![1.0];
        let face = 1.0 / sides as f64;
        for _ in 0..count {
            let mut next = vec![0.0; odds.len() + sides];
            for (total, p) in odds.iter().enumerate() {
                for side in 1..=sides {
                    next[total + side] += p * face;
                }
            }
            odds = next;
        }
        odds[value as usize]
    }

    /// Roll the expression: sum `count` uniform draws in `1..=sides`.
    pub fn roll<R: Rng>(self, rng: &mut R) -> u32 {
        match self {
            Self::Constant(value) => value,
            Self::Dice { count, sides } => (0..count)
                .map(|_| rng.random_range(1..=sides))
                .fold(0u32, u32::saturating_add),
        }
    }
}

impl FromStr for DiceExpr {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constant(value) => write!(f, "{value}"),
            Self::Dice { count, sides } => write!(f, "{count}d{sides}"),
        }
    }
}
