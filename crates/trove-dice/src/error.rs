//! Error types for dice parsing and rolling.

/// Errors that can occur while parsing or rolling dice.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    /// The text is neither `NdM` nor a literal integer.
    #[error("invalid dice expression: '{0}'")]
    InvalidExpression(String),

    /// A scripted roll source ran out of rolls.
    #[error("no scripted roll left for {purpose}")]
    OutOfRolls {
        /// The decision point that asked for a roll.
        purpose: String,
    },

    /// The operator's input stream closed while a manual roll was pending.
    #[error("input closed while waiting for a roll for {purpose}")]
    InputClosed {
        /// The decision point that asked for a roll.
        purpose: String,
    },

    /// Reading operator input or writing the prompt failed.
    #[error("roll input failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
