use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{TableRow, TableStore};
use crate::error::{ItemError, ItemResult};

/// Tables held in memory, loaded from JSON of the form
/// `{"tables": {"<name>": [row, ...]}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    tables: BTreeMap<String, Vec<TableRow>>,
}

/// A band defect in one (table, tier) partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandIssue {
    /// Table name.
    pub table: String,
    /// Tier partition, if the table is tiered.
    pub tier: Option<String>,
    /// What is wrong.
    pub problem: BandProblem,
}

/// The kinds of band defect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BandProblem {
    /// Rolls `from..=to` are not covered by any row.
    Gap {
        /// First uncovered roll.
        from: u32,
        /// Last uncovered roll.
        to: u32,
    },
    /// More than one row covers `roll`.
    Overlap {
        /// The doubly covered roll.
        roll: u32,
    },
    /// A row's band is empty or reaches outside 1-100.
    BadBand {
        /// Low end.
        low: u32,
        /// High end.
        high: u32,
    },
}

impl std::fmt::Display for BandIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table)?;
        if let Some(tier) = &self.tier {
            write!(f, " [{tier}]")?;
        }
        match self.problem {
            BandProblem::Gap { from, to } if from == to => write!(f, ": roll {from} uncovered"),
            BandProblem::Gap { from, to } => write!(f, ": rolls {from}-{to} uncovered"),
            BandProblem::Overlap { roll } => write!(f, ": roll {roll} covered twice"),
            BandProblem::BadBand { low, high } => write!(f, ": bad band {low}-{high}"),
        }
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tables from JSON text.
    pub fn from_json(text: &str) -> ItemResult<Self> {
        let store: Self = serde_json::from_str(text)?;
        debug!(tables = store.tables.len(), "loaded tables");
        Ok(store)
    }

    /// Load tables from a JSON file.
    pub fn load(path: &Path) -> ItemResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Add or replace a table.
    pub fn insert(&mut self, name: impl Into<String>, rows: Vec<TableRow>) {
        self.tables.insert(name.into(), rows);
    }

    /// Table names, sorted.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// All rows of a table.
    pub fn rows(&self, table: &str) -> ItemResult<&[TableRow]> {
        self.tables
            .get(table)
            .map(Vec::as_slice)
            .ok_or_else(|| ItemError::UnknownTable(table.to_string()))
    }

    /// Check that every (table, tier) partition covers 1-100 exactly once.
    pub fn validate(&self) -> Vec<BandIssue> {
        let mut issues = Vec::new();
        for (name, rows) in &self.tables {
            let mut partitions: BTreeMap<Option<&str>, Vec<&TableRow>> = BTreeMap::new();
            for row in rows {
                partitions.entry(row.tier.as_deref()).or_default().push(row);
            }
            for (tier, rows) in partitions {
                let issue = |problem| BandIssue {
                    table: name.clone(),
                    tier: tier.map(str::to_string),
                    problem,
                };
                let mut coverage = [0u32; 101];
                for row in rows {
                    if row.low == 0 || row.low > row.high || row.high > 100 {
                        issues.push(issue(BandProblem::BadBand {
                            low: row.low,
                            high: row.high,
                        }));
                        continue;
                    }
                    for roll in row.low..=row.high {
                        coverage[roll as usize] += 1;
                    }
                }
                let mut gap_start = None;
                for roll in 1..=100u32 {
                    let count = coverage[roll as usize];
                    if count > 1 {
                        issues.push(issue(BandProblem::Overlap { roll }));
                    }
                    match (count, gap_start) {
                        (0, None) => gap_start = Some(roll),
                        (c, Some(from)) if c > 0 => {
                            issues.push(issue(BandProblem::Gap { from, to: roll - 1 }));
                            gap_start = None;
                        }
                        _ => {}
                    }
                }
                if let Some(from) = gap_start {
                    issues.push(issue(BandProblem::Gap { from, to: 100 }));
                }
            }
        }
        issues
    }
}

impl TableStore for MemoryStore {
    fn find_row(&self, table: &str, roll: u32, tier: Option<&str>) -> ItemResult<Option<TableRow>> {
        Ok(self
            .rows(table)?
            .iter()
            .find(|row| row.matches_tier(tier) && row.contains(roll))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_store;

    fn store(json: &str) -> MemoryStore {
        MemoryStore::from_json(json).unwrap()
    }

    #[test]
    fn finds_rows_by_band_and_tier() {
        let s = store(
            r#"{"tables": {"Rings": [
                {"low": 1, "high": 50, "tier": "lesser minor", "result": "A", "price": "1 gp"},
                {"low": 51, "high": 100, "tier": "lesser minor", "result": "B", "price": "2 gp"},
                {"low": 1, "high": 100, "tier": "greater minor", "result": "C", "price": "3 gp"}
            ]}}"#,
        );
        let row = s.find_row("Rings", 51, Some("lesser minor")).unwrap().unwrap();
        assert_eq!(row.result, "B");
        let row = s.find_row("Rings", 51, Some("greater minor")).unwrap().unwrap();
        assert_eq!(row.result, "C");
        assert!(s.find_row("Rings", 51, Some("greater major")).unwrap().is_none());
    }

    #[test]
    fn unknown_table_is_an_error() {
        let s = MemoryStore::new();
        assert!(matches!(
            s.find_row("Nope", 1, None),
            Err(ItemError::UnknownTable(_))
        ));
    }

    #[test]
    fn validate_reports_gaps_and_overlaps() {
        let s = store(
            r#"{"tables": {"T": [
                {"low": 1, "high": 10, "result": "a"},
                {"low": 10, "high": 20, "result": "b"},
                {"low": 30, "high": 100, "result": "c"},
                {"low": 0, "high": 5, "result": "d"}
            ]}}"#,
        );
        let issues = s.validate();
        let text: Vec<String> = issues.iter().map(ToString::to_string).collect();
        assert_eq!(
            text,
            vec![
                "T: bad band 0-5",
                "T: roll 10 covered twice",
                "T: rolls 21-29 uncovered",
            ]
        );
    }

    #[test]
    fn validate_partitions_by_tier() {
        let s = store(
            r#"{"tables": {"T": [
                {"low": 1, "high": 100, "tier": "lesser minor", "result": "a"},
                {"low": 1, "high": 99, "tier": "greater minor", "result": "b"}
            ]}}"#,
        );
        let issues = s.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].to_string(), "T [greater minor]: roll 100 uncovered");
    }

    #[test]
    fn sample_tables_are_complete() {
        let issues = sample_store().validate();
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn load_from_file() {
        let dir = std::env::temp_dir().join("trove-core-memory-test.json");
        std::fs::write(&dir, r#"{"tables": {"T": []}}"#).unwrap();
        let s = MemoryStore::load(&dir).unwrap();
        assert_eq!(s.table_names().collect::<Vec<_>>(), vec!["T"]);
        std::fs::remove_file(&dir).ok();
        assert!(MemoryStore::load(Path::new("/nonexistent/trove.json")).is_err());
    }
}
