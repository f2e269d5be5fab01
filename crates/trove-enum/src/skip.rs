use std::collections::HashMap;

use trove_dice::Listener;

use crate::roller::EnumeratingRoller;

/// Collapses runs of rolls that land in the same table band.
///
/// Every value in a band yields the same row, so after an item the digit
/// that varies fastest can jump to the top of its band and the item counts
/// once per skipped value. The jump carries on to the next more significant
/// digit only while each digit already jumped started at its minimum and
/// ends at its maximum, meaning it covered its full cycle; otherwise the
/// skipped leaves would not all share the item's outcome.
#[derive(Debug, Clone, Default)]
pub struct SkipOptimizer {
    bands: HashMap<String, (u32, u32)>,
}

impl SkipOptimizer {
    /// An optimizer with no recorded bands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the bands of the previous item.
    pub fn clear(&mut self) {
        self.bands.clear();
    }

    /// The last band reported for `purpose`.
    pub fn band(&self, purpose: &str) -> Option<(u32, u32)> {
        self.bands.get(purpose).copied()
    }

    /// Jump the roller past the bands of the item it just finished and
    /// return how many leaves the item stands for.
    pub fn apply(&self, roller: &mut EnumeratingRoller) -> u64 {
        let visited: Vec<(String, u32)> = roller.last_item().to_vec();
        let mut seen: Vec<&str> = Vec::new();
        let mut multiplier: u64 = 1;

        for (purpose, value) in visited.iter().rev() {
            if seen.contains(&purpose.as_str()) {
                continue;
            }
            seen.push(purpose);

            let Some(digit) = roller.odometer().digit(purpose).copied() else {
                break;
            };
            let Some((low, high)) = self.band(purpose) else {
                break;
            };
            if !(low..=high).contains(value) {
                break;
            }
            let top = high.min(digit.max);
            multiplier *= u64::from(top - value + 1);
            roller.jump(purpose, top);

            let full_cycle = *value == digit.min && top == digit.max;
            if !full_cycle {
                break;
            }
        }
        multiplier
    }
}

impl Listener for SkipOptimizer {
    fn item_rolled(&mut self, purpose: &str, low: u32, high: u32, _tier: Option<&str>) {
        self.bands.insert(purpose.to_string(), (low, high));
    }
}
