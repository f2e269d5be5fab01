use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde::Deserialize;

use super::{TableRow, TableStore};
use crate::error::ItemResult;

/// How a [`CachedStore`] remembers rows it has fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// Every lookup goes to the inner store.
    #[default]
    None,
    /// Keep the rows seen per (table, tier) and scan their bands.
    BandScan,
    /// Map every roll of a fetched band straight to its row.
    Materialized,
}

type PartitionKey = (String, Option<String>);

/// A read-through cache over another [`TableStore`].
///
/// Results are identical to the inner store's; only the number of inner
/// lookups changes. Not meant for concurrent use.
#[derive(Debug)]
pub struct CachedStore<S> {
    inner: S,
    mode: CacheMode,
    bands: RefCell<HashMap<PartitionKey, Vec<TableRow>>>,
    rolls: RefCell<HashMap<PartitionKey, HashMap<u32, TableRow>>>,
    misses: Cell<u64>,
}

impl<S: TableStore> CachedStore<S> {
    /// Wrap `inner`.
    pub fn new(inner: S, mode: CacheMode) -> Self {
        Self {
            inner,
            mode,
            bands: RefCell::new(HashMap::new()),
            rolls: RefCell::new(HashMap::new()),
            misses: Cell::new(0),
        }
    }

    /// The caching strategy.
    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    /// Number of lookups that reached the inner store.
    pub fn misses(&self) -> u64 {
        self.misses.get()
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn cached(&self, key: &PartitionKey, roll: u32) -> Option<TableRow> {
        match self.mode {
            CacheMode::None => None,
            CacheMode::BandScan => self
                .bands
                .borrow()
                .get(key)?
                .iter()
                .find(|row| row.contains(roll))
                .cloned(),
            CacheMode::Materialized => self.rolls.borrow().get(key)?.get(&roll).cloned(),
        }
    }

    fn remember(&self, key: PartitionKey, row: &TableRow) {
        match self.mode {
            CacheMode::None => {}
            CacheMode::BandScan => self.bands.borrow_mut().entry(key).or_default().push(row.clone()),
            CacheMode::Materialized => {
                let mut rolls = self.rolls.borrow_mut();
                let map = rolls.entry(key).or_default();
                for roll in row.low..=row.high {
                    map.insert(roll, row.clone());
                }
            }
        }
    }
}

impl<S: TableStore> TableStore for CachedStore<S> {
    fn find_row(&self, table: &str, roll: u32, tier: Option<&str>) -> ItemResult<Option<TableRow>> {
        let key = (table.to_string(), tier.map(str::to_string));
        if let Some(row) = self.cached(&key, roll) {
            return Ok(Some(row));
        }
        self.misses.set(self.misses.get() + 1);
        let row = self.inner.find_row(table, roll, tier)?;
        if let Some(row) = &row {
            self.remember(key, row);
        }
        Ok(row)
    }
}
