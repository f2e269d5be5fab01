use tracing::debug;
use trove_dice::{DiceError, DiceExpr, Listener, RollOutcome, RollRecord, RollSource};

use crate::config::GenerateConfig;
use crate::error::ItemError;
use crate::table::{TableRow, TableStore};
use crate::tier::Tier;

/// Why a composer stopped early.
#[derive(Debug)]
pub(crate) enum Interrupt {
    /// The enumerating roll source has visited every combination.
    Complete,
    /// A real failure.
    Failed(ItemError),
}

impl From<ItemError> for Interrupt {
    fn from(err: ItemError) -> Self {
        Self::Failed(err)
    }
}

impl From<DiceError> for Interrupt {
    fn from(err: DiceError) -> Self {
        Self::Failed(ItemError::Dice(err))
    }
}

pub(crate) type Step<T> = Result<T, Interrupt>;

/// Everything a composer needs while it rolls up one item.
pub(crate) struct Compose<'a> {
    store: &'a dyn TableStore,
    roller: &'a mut dyn RollSource,
    listener: &'a mut dyn Listener,
    pub config: &'a GenerateConfig,
    pub tier: Tier,
    pub rolls: RollRecord,
}

impl<'a> Compose<'a> {
    pub fn new(
        store: &'a dyn TableStore,
        roller: &'a mut dyn RollSource,
        listener: &'a mut dyn Listener,
        config: &'a GenerateConfig,
        tier: Tier,
    ) -> Self {
        Self {
            store,
            roller,
            listener,
            config,
            tier,
            rolls: RollRecord::new(),
        }
    }

    /// Roll `expr` for `purpose` and record it.
    pub fn roll(&mut self, expr: DiceExpr, purpose: &str) -> Step<u32> {
        match self.roller.roll(&expr, purpose)? {
            RollOutcome::Rolled(value) => {
                self.rolls.push(expr, purpose, value);
                Ok(value)
            }
            RollOutcome::Done => Err(Interrupt::Complete),
        }
    }

    /// Roll 1d100 for `purpose` and look the result up in `table`.
    ///
    /// The row's band is reported to the listener. A roll no row covers is
    /// a data defect and fails the item.
    pub fn lookup(&mut self, table: &str, tier: Option<&str>, purpose: &str) -> Step<TableRow> {
        let roll = self.roll(DiceExpr::D100, purpose)?;
        let row = self
            .store
            .find_row(table, roll, tier)?
            .ok_or_else(|| ItemError::MissingRow {
                table: table.to_string(),
                tier: tier.map(str::to_string),
                roll,
            })?;
        debug!(table, purpose, roll, result = %row.result, "table lookup");
        self.listener.item_rolled(purpose, row.low, row.high, tier);
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::MemoryStore;
    use trove_dice::{RecordingListener, ScriptedRoller};

    fn store() -> MemoryStore {
        MemoryStore::from_json(
            r#"{"tables": {"T": [
                {"low": 1, "high": 30, "tier": "lesser minor", "result": "a"},
                {"low": 31, "high": 100, "tier": "lesser minor", "result": "b"}
            ]}}"#,
        )
        .unwrap()
    }

    #[test]
    fn lookup_records_and_reports() {
        let store = store();
        let mut roller = ScriptedRoller::new([40]);
        let mut listener = RecordingListener::new();
        let config = GenerateConfig::default();
        let tier = Tier::parse("lesser minor").unwrap();
        let mut cx = Compose::new(&store, &mut roller, &mut listener, &config, tier);

        let row = cx.lookup("T", Some("lesser minor"), "thing").unwrap();
        assert_eq!(row.result, "b");
        assert_eq!(cx.rolls.results(), vec![40]);

        let report = &listener.reports()[0];
        assert_eq!((report.low, report.high), (31, 100));
        assert_eq!(report.purpose, "thing");
    }

    #[test]
    fn missing_row_fails_the_item() {
        let store = store();
        let mut roller = ScriptedRoller::new([40]);
        let mut listener = RecordingListener::new();
        let config = GenerateConfig::default();
        let tier = Tier::parse("greater minor").unwrap();
        let mut cx = Compose::new(&store, &mut roller, &mut listener, &config, tier);

        let err = cx.lookup("T", Some("greater minor"), "thing").unwrap_err();
        assert!(matches!(
            err,
            Interrupt::Failed(ItemError::MissingRow { roll: 40, .. })
        ));
    }
}
