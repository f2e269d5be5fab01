use std::collections::HashMap;

use serde::Serialize;
use trove_core::{Item, ItemKind, Price};

/// One aggregated outcome: every enumerated item with the same kind,
/// subtype, label, validity and price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TallyRow {
    /// Number of leaves that produced this outcome.
    pub count: u64,
    /// Item kind.
    pub kind: ItemKind,
    /// Item subtype.
    pub subtype: String,
    /// Rendered item, e.g. "Melee: Longsword +1".
    pub item: String,
    /// Item price.
    pub price: Price,
    /// Whether the outcome is a legal item.
    pub valid: bool,
    /// Chance that one random generation yields this outcome.
    pub probability: f64,
}

impl TallyRow {
    /// This row's share of `total` leaves.
    pub fn share(&self, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.count as f64 / total as f64
        }
    }
}

/// Enumerated items aggregated by outcome, in discovery order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Tally {
    rows: Vec<TallyRow>,
    #[serde(skip)]
    index: HashMap<(ItemKind, String, String, String), usize>,
}

impl Tally {
    /// An empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `item` as `count` leaves with a combined chance of
    /// `probability`.
    pub fn add(&mut self, item: &Item, count: u64, probability: f64) {
        let rendered = item.to_string();
        let key = (
            item.kind,
            item.subtype.clone(),
            rendered.clone(),
            item.price.to_string(),
        );
        match self.index.get(&key) {
            Some(&i) => {
                self.rows[i].count += count;
                self.rows[i].probability += probability;
            }
            None => {
                self.index.insert(key, self.rows.len());
                self.rows.push(TallyRow {
                    count,
                    kind: item.kind,
                    subtype: item.subtype.clone(),
                    item: rendered,
                    price: item.price.clone(),
                    valid: item.valid,
                    probability,
                });
            }
        }
    }

    /// All rows.
    pub fn rows(&self) -> &[TallyRow] {
        &self.rows
    }

    /// Combined chance of every row; 1 after a complete run.
    pub fn probability(&self) -> f64 {
        self.rows.iter().map(|row| row.probability).sum()
    }

    /// Total leaves counted.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|row| row.count).sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(label: &str, gp: f64) -> Item {
        let mut item = Item::database("Ring", label, Price::gold(gp));
        item.kind = ItemKind::Ring;
        item
    }

    #[test]
    fn identical_outcomes_merge() {
        let mut tally = Tally::new();
        tally.add(&ring("Ring of climbing", 2500.0), 60, 0.6);
        tally.add(&ring("Ring of jumping", 2500.0), 10, 0.1);
        tally.add(&ring("Ring of climbing", 2500.0), 30, 0.3);
        assert_eq!(tally.len(), 2);
        assert_eq!(tally.total(), 100);
        assert_eq!(tally.rows()[0].count, 90);
        assert_eq!(tally.rows()[0].item, "Ring of climbing");
        assert!((tally.rows()[1].share(100) - 0.1).abs() < f64::EPSILON);
        assert!((tally.rows()[0].probability - 0.9).abs() < 1e-12);
        assert!((tally.probability() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn different_prices_stay_apart() {
        let mut tally = Tally::new();
        tally.add(&ring("Gem", 10.0), 1, 0.5);
        tally.add(&ring("Gem", 12.0), 1, 0.5);
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn validity_is_carried() {
        let mut tally = Tally::new();
        let mut item = ring("Ring of climbing", 2500.0);
        item.valid = false;
        tally.add(&item, 1, 1.0);
        assert!(!tally.rows()[0].valid);
    }

    #[test]
    fn empty_share() {
        let tally = Tally::new();
        assert!(tally.is_empty());
        assert_eq!(tally.total(), 0);
    }
}
