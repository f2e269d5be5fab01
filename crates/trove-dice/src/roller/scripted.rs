use std::collections::VecDeque;

use super::{RollOutcome, RollSource};
use crate::error::{DiceError, DiceResult};
use crate::expr::DiceExpr;

/// Replays a fixed list of rolls, in order.
///
/// Literal expressions return their own value and do not consume a roll.
/// Scripted values are not checked against the expression's range, so a
/// script can force any table row.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    rolls: VecDeque<u32>,
}

impl ScriptedRoller {
    /// A roller that answers with `rolls`, first to last.
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// Parse a comma-separated roll list such as "42,7,100".
    pub fn parse(text: &str) -> DiceResult<Self> {
        let rolls = text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u32>()
                    .map_err(|_| DiceError::InvalidExpression(s.to_string()))
            })
            .collect::<DiceResult<Vec<_>>>()?;
        Ok(Self::new(rolls))
    }

    /// Rolls not yet used.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RollSource for ScriptedRoller {
    fn roll(&mut self, expr: &DiceExpr, purpose: &str) -> DiceResult<RollOutcome> {
        if let DiceExpr::Constant(value) = expr {
            return Ok(RollOutcome::Rolled(*value));
        }
        self.rolls
            .pop_front()
            .map(RollOutcome::Rolled)
            .ok_or_else(|| DiceError::OutOfRolls {
                purpose: purpose.to_string(),
            })
    }
}
