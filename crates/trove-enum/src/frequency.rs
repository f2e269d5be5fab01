use rand::Rng;
use trove_core::Item;

use crate::tally::{Tally, TallyRow};

/// Enumerated outcomes ready for weighted sampling.
///
/// Picking from the table replaces a full composition with one draw, at
/// the cost of returning [`trove_core::ItemKind::Database`] items that
/// carry no roll record.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    rows: Vec<TallyRow>,
}

impl FrequencyTable {
    /// Build a table from tallied rows. Invalid and unpriced outcomes are
    /// left out.
    pub fn from_tally(tally: &Tally) -> Self {
        let rows = tally
            .rows()
            .iter()
            .filter(|row| row.valid && !row.price.is_error())
            .cloned()
            .collect();
        Self { rows }
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no outcomes.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Draw an outcome worth at least `min_value` gold, weighted by
    /// probability. `None` when no outcome is worth that much.
    pub fn pick<R: Rng>(&self, min_value: f64, rng: &mut R) -> Option<Item> {
        let eligible: Vec<&TallyRow> = self
            .rows
            .iter()
            .filter(|row| row.price.value_or_zero() >= min_value && row.probability > 0.0)
            .collect();
        let total: f64 = eligible.iter().map(|row| row.probability).sum();
        if eligible.is_empty() || total <= 0.0 {
            return None;
        }

        let mut target = rng.random_range(0.0..total);
        let mut chosen = eligible[eligible.len() - 1];
        for &row in &eligible {
            if target < row.probability {
                chosen = row;
                break;
            }
            target -= row.probability;
        }

        let label = chosen
            .item
            .strip_prefix(&format!("{}: ", chosen.subtype))
            .unwrap_or(chosen.item.as_str());
        let mut item = Item::database(&chosen.subtype, label, chosen.price.clone());
        item.details.insert("kind".to_string(), chosen.kind.as_str().to_string());
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use trove_core::{ItemKind, Price};

    fn item(kind: ItemKind, subtype: &str, label: &str, gp: f64) -> Item {
        let mut item = Item::database(subtype, label, Price::gold(gp));
        item.kind = kind;
        item
    }

    fn table() -> FrequencyTable {
        let mut tally = Tally::new();
        tally.add(&item(ItemKind::Ring, "Ring", "Ring of climbing", 2500.0), 1, 0.9);
        tally.add(&item(ItemKind::Rod, "Rod", "Rod of wonder", 12000.0), 1, 0.1);
        let mut invalid = item(ItemKind::Weapon, "Melee", "Longsword +1/Keen", 8315.0);
        invalid.valid = false;
        tally.add(&invalid, 1, 0.5);
        FrequencyTable::from_tally(&tally)
    }

    #[test]
    fn invalid_rows_are_dropped() {
        assert_eq!(table().len(), 2);
    }

    #[test]
    fn minimum_value_filters() {
        let table = table();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let picked = table.pick(5000.0, &mut rng).unwrap();
            assert_eq!(picked.label, "Rod of wonder");
            assert_eq!(picked.kind, ItemKind::Database);
            assert_eq!(picked.details["kind"], "Rod");
        }
        assert!(table.pick(1e6, &mut rng).is_none());
    }

    #[test]
    fn picks_follow_probability() {
        let table = table();
        let mut rng = StdRng::seed_from_u64(11);
        let rings = (0..2000)
            .filter(|_| table.pick(0.0, &mut rng).unwrap().label == "Ring of climbing")
            .count();
        assert!((1600..=1990).contains(&rings), "{rings}");
    }

    #[test]
    fn subtype_prefix_is_stripped() {
        let mut tally = Tally::new();
        tally.add(&item(ItemKind::Weapon, "Melee", "Longsword +1", 2315.0), 1, 1.0);
        let table = FrequencyTable::from_tally(&tally);
        let picked = table.pick(0.0, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(picked.label, "Longsword +1");
        assert_eq!(picked.to_string(), "Melee: Longsword +1");
    }
}
