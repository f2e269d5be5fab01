//! Roll sources.

mod manual;
mod pseudo;
mod scripted;

pub use manual::ManualRoller;
pub use pseudo::PseudorandomRoller;
pub use scripted::ScriptedRoller;

use crate::error::DiceResult;
use crate::expr::DiceExpr;

/// The answer to a roll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollOutcome {
    /// A rolled value.
    Rolled(u32),
    /// An exhaustive enumeration has visited every combination.
    Done,
}

impl RollOutcome {
    /// The rolled value, or `None` when the enumeration is complete.
    pub fn value(self) -> Option<u32> {
        match self {
            Self::Rolled(value) => Some(value),
            Self::Done => None,
        }
    }
}

/// Anything that can answer "roll `expr` for `purpose`".
///
/// `purpose` names the decision point. Ordinary sources ignore it; the
/// enumerating source uses it as the name of an odometer digit.
pub trait RollSource {
    /// Roll `expr` for the decision point `purpose`.
    fn roll(&mut self, expr: &DiceExpr, purpose: &str) -> DiceResult<RollOutcome>;

    /// Roll an expression given as text.
    fn roll_text(&mut self, expr: &str, purpose: &str) -> DiceResult<RollOutcome> {
        let expr = DiceExpr::parse(expr)?;
        self.roll(&expr, purpose)
    }
}

impl<T: RollSource + ?Sized> RollSource for &mut T {
    fn roll(&mut self, expr: &DiceExpr, purpose: &str) -> DiceResult<RollOutcome> {
        (**self).roll(expr, purpose)
    }
}

impl<T: RollSource + ?Sized> RollSource for Box<T> {
    fn roll(&mut self, expr: &DiceExpr, purpose: &str) -> DiceResult<RollOutcome> {
        (**self).roll(expr, purpose)
    }
}
