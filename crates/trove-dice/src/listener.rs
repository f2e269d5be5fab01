//! Band reports.
//!
//! Whenever a composer resolves a roll against a table row it reports the
//! row's band to a [`Listener`]. The enumeration skip optimizer uses these
//! reports to jump over rolls that land in the same band; audit tooling can
//! record them. Generation works identically with [`NoopListener`].

use serde::{Deserialize, Serialize};

/// Receives the band of every table row a roll resolved to.
pub trait Listener {
    /// A roll for `purpose` landed in the band `low..=high` of a row keyed by
    /// `tier` (if the table is tiered).
    fn item_rolled(&mut self, purpose: &str, low: u32, high: u32, tier: Option<&str>);
}

/// A listener that ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl Listener for NoopListener {
    fn item_rolled(&mut self, _purpose: &str, _low: u32, _high: u32, _tier: Option<&str>) {}
}

/// One reported band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandReport {
    /// The decision point.
    pub purpose: String,
    /// Inclusive low end of the band.
    pub low: u32,
    /// Inclusive high end of the band.
    pub high: u32,
    /// The tier the row was keyed by, if any.
    pub tier: Option<String>,
}

impl BandReport {
    /// Number of roll values the band covers.
    pub fn width(&self) -> u32 {
        self.high.saturating_sub(self.low) + 1
    }
}

/// A listener that keeps every report, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    reports: Vec<BandReport>,
}

impl RecordingListener {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports received so far.
    pub fn reports(&self) -> &[BandReport] {
        &self.reports
    }

    /// Drop all reports.
    pub fn clear(&mut self) {
        self.reports.clear();
    }
}

impl Listener for RecordingListener {
    fn item_rolled(&mut self, purpose: &str, low: u32, high: u32, tier: Option<&str>) {
        self.reports.push(BandReport {
            purpose: purpose.to_string(),
            low,
            high,
            tier: tier.map(str::to_string),
        });
    }
}
