use trove_dice::{DiceExpr, DiceResult, RollOutcome, RollSource};

use crate::odometer::Odometer;

/// A roll source that walks every combination of rolls.
///
/// Values come from an [`Odometer`]; once it wraps every roll answers
/// [`RollOutcome::Done`]. Because the odometer walks each leaf twice, the
/// driver calls [`EnumeratingRoller::finish_item`] after every item to
/// learn whether it was a replay of the previous one.
#[derive(Debug, Clone, Default)]
pub struct EnumeratingRoller {
    odometer: Odometer,
    trace: Vec<(String, u32)>,
    previous: Option<Vec<(String, u32)>>,
    done: bool,
}

impl EnumeratingRoller {
    /// A roller at the first combination.
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying odometer.
    pub fn odometer(&self) -> &Odometer {
        &self.odometer
    }

    /// Whether every combination has been visited.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Close the current item. Returns false when its rolls repeat the
    /// previous item's exactly.
    pub fn finish_item(&mut self) -> bool {
        let trace = std::mem::take(&mut self.trace);
        let fresh = self.previous.as_ref() != Some(&trace);
        self.previous = Some(trace);
        fresh
    }

    /// Purposes and values of the last finished item, in call order.
    pub fn last_item(&self) -> &[(String, u32)] {
        self.previous.as_deref().unwrap_or_default()
    }

    /// Chance of rolling the last finished item's exact values, each roll
    /// weighted by how often its expression comes up with that value.
    pub fn last_item_probability(&self) -> f64 {
        self.last_item()
            .iter()
            .filter_map(|(purpose, value)| {
                self.odometer.digit(purpose).map(|digit| digit.expr.chance(*value))
            })
            .product()
    }

    /// Move the digit for `purpose` to `value`. The last finished item is
    /// rewritten to match so its replay is still recognised.
    pub fn jump(&mut self, purpose: &str, value: u32) {
        self.odometer.set_value(purpose, value);
        let Some(value) = self.odometer.digit(purpose).map(|d| d.value) else {
            return;
        };
        if let Some(previous) = &mut self.previous {
            for (name, rolled) in previous.iter_mut() {
                if name == purpose {
                    *rolled = value;
                }
            }
        }
    }
}

impl RollSource for EnumeratingRoller {
    fn roll(&mut self, expr: &DiceExpr, purpose: &str) -> DiceResult<RollOutcome> {
        if self.done {
            return Ok(RollOutcome::Done);
        }
        match self.odometer.next(expr, purpose) {
            Some(value) => {
                self.trace.push((purpose.to_string(), value));
                Ok(RollOutcome::Rolled(value))
            }
            None => {
                self.done = true;
                Ok(RollOutcome::Done)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(roller: &mut EnumeratingRoller, purpose: &str, sides: u32) -> Option<u32> {
        roller
            .roll(&DiceExpr::Dice { count: 1, sides }, purpose)
            .unwrap()
            .value()
    }

    #[test]
    fn replays_are_flagged() {
        let mut roller = EnumeratingRoller::new();
        let mut fresh = Vec::new();
        loop {
            let Some(a) = roll(&mut roller, "a", 3) else {
                break;
            };
            let Some(b) = roll(&mut roller, "b", 2) else {
                break;
            };
            if roller.finish_item() {
                fresh.push((a, b));
            }
        }
        assert_eq!(fresh, vec![(1, 1), (1, 2), (2, 1), (2, 2), (3, 1), (3, 2)]);
        assert!(roller.is_done());
    }

    #[test]
    fn done_is_sticky() {
        let mut roller = EnumeratingRoller::new();
        assert_eq!(roll(&mut roller, "x", 1), Some(1));
        assert_eq!(roll(&mut roller, "x", 1), None);
        assert_eq!(roll(&mut roller, "y", 6), None);
    }

    #[test]
    fn jump_rewrites_the_last_item() {
        let mut roller = EnumeratingRoller::new();
        roll(&mut roller, "a", 10);
        roll(&mut roller, "b", 10);
        assert!(roller.finish_item());
        roller.jump("a", 4);
        assert_eq!(
            roller.last_item(),
            [("a".to_string(), 4), ("b".to_string(), 1)]
        );
        assert_eq!(roller.odometer().digit("a").unwrap().value, 4);
        assert!((roller.last_item_probability() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn multi_die_rolls_weigh_by_their_totals() {
        let mut roller = EnumeratingRoller::new();
        let two_d4 = DiceExpr::parse("2d4").unwrap();
        let mut chances = Vec::new();
        while let Some(total) = roller.roll(&two_d4, "value").unwrap().value() {
            if roller.finish_item() {
                chances.push((total, roller.last_item_probability()));
            }
        }
        assert_eq!(chances.len(), 7);
        let (total, chance) = chances[3];
        assert_eq!(total, 5);
        assert!((chance - 0.25).abs() < 1e-12);
        let sum: f64 = chances.iter().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}
