//! Exhaustive enumeration of magic item outcomes.
//!
//! An [`EnumeratingRoller`] answers every roll from an [`Odometer`] whose
//! digits are the roll purposes, discovered while the composers run. The
//! [`Enumerator`] drives it until the odometer wraps and aggregates the
//! items into a [`Tally`] of weighted rows, which a [`FrequencyTable`] can
//! sample from.

/// Enumeration configuration.
pub mod config;
/// The enumeration driver.
pub mod driver;
/// Weighted sampling of enumerated items.
pub mod frequency;
/// The purpose-keyed multi-radix counter.
pub mod odometer;
/// The enumerating roll source.
pub mod roller;
/// Band skipping.
pub mod skip;
/// Aggregated enumeration rows.
pub mod tally;

/// Re-export of [`config::EnumerateConfig`].
pub use config::EnumerateConfig;
/// Re-exports of [`driver::Enumeration`] and [`driver::Enumerator`].
pub use driver::{Enumeration, Enumerator};
/// Re-export of [`frequency::FrequencyTable`].
pub use frequency::FrequencyTable;
/// Re-exports of [`odometer::Digit`], [`odometer::Odometer`] and [`odometer::Stage`].
pub use odometer::{Digit, Odometer, Stage};
/// Re-export of [`roller::EnumeratingRoller`].
pub use roller::EnumeratingRoller;
/// Re-export of [`skip::SkipOptimizer`].
pub use skip::SkipOptimizer;
/// Re-exports of [`tally::Tally`] and [`tally::TallyRow`].
pub use tally::{Tally, TallyRow};
