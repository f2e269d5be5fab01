//! Dice and roll sources for the Trove magic item generator.
//!
//! Every decision an item composer makes goes through a [`RollSource`]:
//! a pseudorandom generator, a human at the keyboard, a scripted list of
//! rolls, or (in `trove-enum`) an exhaustive enumerator. Roll sources answer
//! with a [`RollOutcome`], which is either a value or the signal that an
//! enumeration has run out of combinations.

pub mod error;
pub mod expr;
pub mod listener;
pub mod record;
pub mod roller;

pub use error::{DiceError, DiceResult};
pub use expr::DiceExpr;
pub use listener::{BandReport, Listener, NoopListener, RecordingListener};
pub use record::{LogLine, RollEntry, RollLog, RollRecord};
pub use roller::{ManualRoller, PseudorandomRoller, RollOutcome, RollSource, ScriptedRoller};
