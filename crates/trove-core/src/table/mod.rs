//! Percentile tables.
//!
//! A table is a list of rows, each covering an inclusive band of a 1d100
//! roll. Tiered tables repeat the full 1-100 range once per tier.

mod cache;
mod memory;
pub mod names;

pub use cache::{CacheMode, CachedStore};
pub use memory::{BandIssue, BandProblem, MemoryStore};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ItemError, ItemResult};

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Inclusive low end of the band.
    pub low: u32,
    /// Inclusive high end of the band.
    pub high: u32,
    /// Tier the row belongs to, for tiered tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    /// The row's outcome text.
    pub result: String,
    /// Price text, e.g. "2,000 gp" or "+1 bonus".
    #[serde(default)]
    pub price: String,
    /// Item properties of which at least one must be present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualifiers: Vec<String>,
    /// Item properties none of which may be present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disqualifiers: Vec<String>,
    /// Kind-specific columns ("type", "spell_level", ...).
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl TableRow {
    /// Whether `roll` falls in this row's band.
    pub fn contains(&self, roll: u32) -> bool {
        (self.low..=self.high).contains(&roll)
    }

    /// Whether the row answers lookups for `tier`. Untiered lookups match
    /// every row.
    pub fn matches_tier(&self, tier: Option<&str>) -> bool {
        match tier {
            None => true,
            Some(t) => self.tier.as_deref() == Some(t),
        }
    }

    /// A kind-specific column.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// A kind-specific column that must be present.
    pub fn require(&self, table: &str, name: &str) -> ItemResult<&str> {
        self.field(name).ok_or_else(|| ItemError::MalformedRow {
            table: table.to_string(),
            low: self.low,
            high: self.high,
            field: name.to_string(),
        })
    }
}

/// Range-keyed row lookup.
pub trait TableStore {
    /// The row of `table` whose band contains `roll`, restricted to `tier`
    /// when given. `Ok(None)` means no row covers the roll; unknown tables
    /// are an error.
    fn find_row(&self, table: &str, roll: u32, tier: Option<&str>) -> ItemResult<Option<TableRow>>;
}

impl<T: TableStore + ?Sized> TableStore for &T {
    fn find_row(&self, table: &str, roll: u32, tier: Option<&str>) -> ItemResult<Option<TableRow>> {
        (**self).find_row(table, roll, tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(json: &str) -> TableRow {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn extra_columns_are_kept() {
        let r = row(
            r#"{"low": 1, "high": 10, "result": "Longsword", "price": "15 gp",
                "type": "melee", "damage_type": "S", "wield_type": "one-handed"}"#,
        );
        assert_eq!(r.field("type"), Some("melee"));
        assert_eq!(r.field("damage_type"), Some("S"));
        assert_eq!(r.field("missing"), None);
        assert!(r.qualifiers.is_empty());
        assert!(r.tier.is_none());
    }

    #[test]
    fn require_reports_the_row() {
        let r = row(r#"{"low": 5, "high": 9, "result": "x"}"#);
        let err = r.require("Random_Weapon", "type").unwrap_err();
        assert_eq!(
            err.to_string(),
            "row 5-9 of Random_Weapon: bad field 'type'"
        );
    }

    #[test]
    fn band_and_tier_matching() {
        let r = row(r#"{"low": 5, "high": 9, "tier": "lesser minor", "result": "x"}"#);
        assert!(r.contains(5));
        assert!(r.contains(9));
        assert!(!r.contains(10));
        assert!(r.matches_tier(Some("lesser minor")));
        assert!(!r.matches_tier(Some("greater minor")));
        assert!(r.matches_tier(None));
    }
}
