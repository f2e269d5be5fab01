//! Roll records and the session roll log.

use serde::{Deserialize, Serialize};

use crate::expr::DiceExpr;

/// One roll made while generating an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollEntry {
    /// The expression that was rolled.
    pub expr: DiceExpr,
    /// The decision point the roll was made for.
    pub purpose: String,
    /// The value the roll source produced.
    pub result: u32,
}

impl std::fmt::Display for RollEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} for {}: {}", self.expr, self.purpose, self.result)
    }
}

/// The ordered trace of rolls behind one item.
///
/// Replaying the results through a scripted roll source against the same
/// tables reproduces the item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecord {
    entries: Vec<RollEntry>,
}

impl RollRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a roll.
    pub fn push(&mut self, expr: DiceExpr, purpose: &str, result: u32) {
        self.entries.push(RollEntry {
            expr,
            purpose: purpose.to_string(),
            result,
        });
    }

    /// Append every roll of another record.
    pub fn extend(&mut self, other: RollRecord) {
        self.entries.extend(other.entries);
    }

    /// All rolls in order.
    pub fn entries(&self) -> &[RollEntry] {
        &self.entries
    }

    /// Just the rolled values, in order.
    pub fn results(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.result).collect()
    }

    /// Number of rolls.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no roll was made.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for RollRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.entries.iter().map(|e| e.result.to_string()).collect();
        write!(f, "[{}]", values.join(","))
    }
}

/// A line in the session roll log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLine {
    /// The start of a generation session.
    Session(String),
    /// The start of an item attempt.
    Item(String),
    /// A roll made during the current item.
    Roll(RollEntry),
}

impl std::fmt::Display for LogLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session(text) => write!(f, "{text}"),
            Self::Item(text) => write!(f, "  {text}"),
            Self::Roll(entry) => write!(f, "    rolling {entry}"),
        }
    }
}

/// Session-wide roll log with a scoped buffer for the item in progress.
///
/// Lines logged between [`RollLog::start_item`] and
/// [`RollLog::finish_item`] are held back; [`RollLog::cancel_item`] drops
/// them as a unit.
#[derive(Debug, Clone, Default)]
pub struct RollLog {
    lines: Vec<LogLine>,
    pending: Option<Vec<LogLine>>,
}

impl RollLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session. Any unfinished item is discarded.
    pub fn start_session(&mut self, description: &str) {
        self.lines.push(LogLine::Session(description.to_string()));
        self.pending = None;
    }

    /// Begin buffering an item attempt.
    pub fn start_item(&mut self, description: &str) {
        self.pending = Some(vec![LogLine::Item(description.to_string())]);
    }

    /// Log every roll of a record.
    pub fn record(&mut self, record: &RollRecord) {
        for entry in record.entries() {
            self.push(LogLine::Roll(entry.clone()));
        }
    }

    /// Drop the pending item.
    pub fn cancel_item(&mut self) {
        self.pending = None;
    }

    /// Commit the pending item to the log.
    pub fn finish_item(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.lines.extend(pending);
        }
    }

    /// Whether an item attempt is being buffered.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Committed lines.
    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    fn push(&mut self, line: LogLine) {
        match &mut self.pending {
            Some(pending) => pending.push(line),
            None => self.lines.push(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: &[(&str, u32)]) -> RollRecord {
        let mut r = RollRecord::new();
        for (purpose, value) in values {
            r.push(DiceExpr::D100, purpose, *value);
        }
        r
    }

    #[test]
    fn record_display_lists_results() {
        let r = record(&[("armor type", 42), ("armor magic property", 7)]);
        assert_eq!(r.to_string(), "[42,7]");
        assert_eq!(r.results(), vec![42, 7]);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn record_survives_json() {
        let mut r = record(&[("gem", 12)]);
        r.push(DiceExpr::parse("2d4").unwrap(), "gem value", 5);
        let text = serde_json::to_string(&r).unwrap();
        let back: RollRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, r);
        assert_eq!(back.entries()[1].expr.to_string(), "2d4");
    }

    #[test]
    fn empty_record() {
        let r = RollRecord::new();
        assert!(r.is_empty());
        assert_eq!(r.to_string(), "[]");
    }

    #[test]
    fn cancelled_item_leaves_no_trace() {
        let mut log = RollLog::new();
        log.start_session("generic minor");
        log.start_item("attempt 1");
        log.record(&record(&[("degree", 10)]));
        log.cancel_item();
        assert!(!log.has_pending());
        assert_eq!(log.lines().len(), 1);
    }

    #[test]
    fn finished_item_is_committed() {
        let mut log = RollLog::new();
        log.start_session("generic minor");
        log.start_item("attempt 2");
        log.record(&record(&[("degree", 10), ("item type", 55)]));
        log.finish_item();
        assert_eq!(log.lines().len(), 4);
        assert_eq!(log.lines()[1], LogLine::Item("attempt 2".to_string()));
        assert_eq!(log.lines()[3].to_string(), "    rolling 1d100 for item type: 55");
    }

    #[test]
    fn rolls_outside_an_item_go_straight_to_the_log() {
        let mut log = RollLog::new();
        log.record(&record(&[("specific ring", 3)]));
        assert_eq!(log.lines().len(), 1);
    }

    #[test]
    fn new_session_discards_pending() {
        let mut log = RollLog::new();
        log.start_item("attempt");
        log.record(&record(&[("degree", 1)]));
        log.start_session("next");
        log.finish_item();
        assert_eq!(log.lines().len(), 1);
    }
}
