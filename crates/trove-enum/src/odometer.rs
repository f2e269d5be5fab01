use std::collections::HashMap;

use tracing::trace;
use trove_dice::DiceExpr;

/// One counter of the odometer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digit {
    /// The expression the digit was learned from.
    pub expr: DiceExpr,
    /// Lowest value, learned from the first expression rolled for the purpose.
    pub min: u32,
    /// Highest value, learned likewise.
    pub max: u32,
    /// The value the next roll for the purpose returns.
    pub value: u32,
}

/// Where the odometer is in its pass over one leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Recording purposes in call order.
    Discover,
    /// Replaying the leaf and recording purposes again.
    Confirm,
    /// Advancing to the next leaf. Never observed between calls.
    Drive,
}

/// A mixed-radix counter whose digits are roll purposes.
///
/// Digits and their order are not known up front: which rolls a composer
/// makes depends on earlier results. Each leaf is walked twice. The first
/// pass (discover) records the purposes in call order in `discovered`, the
/// second (confirm) records them in `confirmed`. When a confirmed purpose
/// comes round again the counter advances, resets every digit the last walk
/// did not visit, and starts discovering the next leaf.
///
/// The last discovered purpose is the least significant digit. A purpose
/// requested twice in a row advances the counter on the spot.
#[derive(Debug, Clone)]
pub struct Odometer {
    digits: HashMap<String, Digit>,
    discovered: Vec<String>,
    confirmed: Vec<String>,
    stage: Stage,
    last_purpose: Option<String>,
}

impl Default for Odometer {
    fn default() -> Self {
        Self::new()
    }
}

impl Odometer {
    /// A fresh odometer with no digits.
    pub fn new() -> Self {
        Self {
            digits: HashMap::new(),
            discovered: Vec::new(),
            confirmed: Vec::new(),
            stage: Stage::Discover,
            last_purpose: None,
        }
    }

    /// The value for the next roll of `expr` for `purpose`, or `None` once
    /// every combination has been visited.
    pub fn next(&mut self, expr: &DiceExpr, purpose: &str) -> Option<u32> {
        if !self.digits.contains_key(purpose) {
            self.digits.insert(
                purpose.to_string(),
                Digit {
                    expr: *expr,
                    min: expr.min(),
                    max: expr.max(),
                    value: expr.min(),
                },
            );
        }

        let repeated = self.last_purpose.as_deref() == Some(purpose);
        match self.stage {
            Stage::Discover if !repeated && self.discovered.iter().any(|p| p == purpose) => {
                self.enter(Stage::Confirm, purpose);
            }
            Stage::Confirm if !repeated && self.confirmed.iter().any(|p| p == purpose) => {
                self.enter(Stage::Drive, purpose);
            }
            _ => {}
        }

        if repeated && self.increment() {
            return None;
        }
        self.last_purpose = Some(purpose.to_string());

        match self.stage {
            Stage::Discover => push_new(&mut self.discovered, purpose),
            Stage::Confirm => push_new(&mut self.confirmed, purpose),
            Stage::Drive => {
                if self.increment() {
                    return None;
                }
                for (name, digit) in &mut self.digits {
                    if !self.discovered.contains(name) {
                        digit.value = digit.min;
                    }
                }
                self.discovered.clear();
                self.confirmed.clear();
                self.discovered.push(purpose.to_string());
                self.last_purpose = None;
                self.enter(Stage::Discover, purpose);
            }
        }

        self.digits.get(purpose).map(|digit| digit.value)
    }

    /// The digit for `purpose`, if it has been seen.
    pub fn digit(&self, purpose: &str) -> Option<&Digit> {
        self.digits.get(purpose)
    }

    /// Move a digit to `value`, clamped to its range.
    pub fn set_value(&mut self, purpose: &str, value: u32) {
        if let Some(digit) = self.digits.get_mut(purpose) {
            digit.value = value.clamp(digit.min, digit.max);
        }
    }

    /// The current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Purposes discovered in the current pass, most significant first.
    pub fn discovered(&self) -> &[String] {
        &self.discovered
    }

    /// Add one to the least significant discovered digit, carrying upward.
    /// Returns true when every digit wrapped.
    fn increment(&mut self) -> bool {
        for name in self.discovered.iter().rev() {
            let Some(digit) = self.digits.get_mut(name) else {
                continue;
            };
            if digit.value < digit.max {
                digit.value += 1;
                return false;
            }
            digit.value = digit.min;
        }
        true
    }

    fn enter(&mut self, stage: Stage, purpose: &str) {
        trace!(from = ?self.stage, to = ?stage, purpose, "odometer stage");
        self.stage = stage;
    }
}

fn push_new(list: &mut Vec<String>, purpose: &str) {
    if !list.iter().any(|p| p == purpose) {
        list.push(purpose.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn die(sides: u32) -> DiceExpr {
        DiceExpr::Dice { count: 1, sides }
    }

    /// Feed the odometer a fixed two-roll item until it wraps.
    fn walk(a: u32, b: u32) -> Vec<(u32, u32)> {
        let mut odometer = Odometer::new();
        let mut leaves = Vec::new();
        loop {
            let Some(x) = odometer.next(&die(a), "a") else {
                break;
            };
            let Some(y) = odometer.next(&die(b), "b") else {
                break;
            };
            leaves.push((x, y));
        }
        leaves
    }

    #[test]
    fn every_leaf_is_walked_twice() {
        assert_eq!(
            walk(3, 2),
            vec![
                (1, 1),
                (1, 1),
                (1, 2),
                (1, 2),
                (2, 1),
                (2, 1),
                (2, 2),
                (2, 2),
                (3, 1),
                (3, 1),
                (3, 2),
                (3, 2),
            ]
        );
    }

    #[test]
    fn single_digit_counts_straight_through() {
        let mut odometer = Odometer::new();
        let mut values = Vec::new();
        while let Some(v) = odometer.next(&die(4), "ring") {
            values.push(v);
        }
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn discovery_order_sets_significance() {
        let mut odometer = Odometer::new();
        odometer.next(&die(3), "outer");
        odometer.next(&die(3), "inner");
        assert_eq!(odometer.discovered(), ["outer", "inner"]);
        assert_eq!(odometer.stage(), Stage::Discover);

        odometer.next(&die(3), "outer");
        assert_eq!(odometer.stage(), Stage::Confirm);
        odometer.next(&die(3), "inner");
        // The drive step advances the inner digit first.
        assert_eq!(odometer.next(&die(3), "outer"), Some(1));
        assert_eq!(odometer.digit("inner").unwrap().value, 2);
        assert_eq!(odometer.stage(), Stage::Discover);
    }

    #[test]
    fn unvisited_digits_restart() {
        // "extra" only appears while "a" is 1.
        let mut odometer = Odometer::new();
        let mut leaves = Vec::new();
        while let Some(a) = odometer.next(&die(2), "a") {
            let extra = if a == 1 {
                match odometer.next(&die(2), "extra") {
                    Some(v) => Some(v),
                    None => break,
                }
            } else {
                None
            };
            let Some(b) = odometer.next(&die(2), "b") else {
                break;
            };
            leaves.push((a, extra, b));
        }
        leaves.dedup();
        assert_eq!(
            leaves,
            vec![
                (1, Some(1), 1),
                (1, Some(1), 2),
                (1, Some(2), 1),
                (1, Some(2), 2),
                (2, None, 1),
                (2, None, 2),
            ]
        );
    }

    #[test]
    fn dice_digits_start_at_their_minimum() {
        let mut odometer = Odometer::new();
        let expr = DiceExpr::Dice { count: 2, sides: 2 };
        let mut values = Vec::new();
        while let Some(v) = odometer.next(&expr, "gem value") {
            values.push(v);
        }
        assert_eq!(values, vec![2, 3, 4]);
    }

    #[test]
    fn set_value_clamps() {
        let mut odometer = Odometer::new();
        odometer.next(&die(6), "x");
        odometer.set_value("x", 9);
        assert_eq!(odometer.digit("x").unwrap().value, 6);
        odometer.set_value("missing", 3);
        assert!(odometer.digit("missing").is_none());
    }
}
