//! Error types for item composition.

use thiserror::Error;

/// Result type for item operations.
pub type ItemResult<T> = Result<T, ItemError>;

/// Errors that can occur while composing items.
#[derive(Debug, Error)]
pub enum ItemError {
    /// A table has no row covering a roll. The table data is defective.
    #[error("no row in {table} for roll {roll} (tier: {})", .tier.as_deref().unwrap_or("none"))]
    MissingRow {
        /// Table name.
        table: String,
        /// Tier the lookup was keyed by.
        tier: Option<String>,
        /// The roll that fell through.
        roll: u32,
    },

    /// The store has no table by this name.
    #[error("unknown table: {0}")]
    UnknownTable(String),

    /// A row lacks a field a composer needs, or the field is unusable.
    #[error("row {low}-{high} of {table}: bad field '{field}'")]
    MalformedRow {
        /// Table name.
        table: String,
        /// Low end of the row's band.
        low: u32,
        /// High end of the row's band.
        high: u32,
        /// The offending field.
        field: String,
    },

    /// Unknown item kind or subtype keyword.
    #[error("unknown item kind: {0}")]
    UnknownKind(String),

    /// Unknown or disallowed tier.
    #[error("invalid tier: {0}")]
    InvalidTier(String),

    /// A keyword request could not be understood.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No reroll of a special ability found a new one that qualifies.
    #[error("no qualifying special ability in {table} after {attempts} rolls")]
    NoQualifyingSpecial {
        /// The special-ability table.
        table: String,
        /// Number of rolls made.
        attempts: u32,
    },

    /// Table data failed to parse.
    #[error("table data: {0}")]
    Json(#[from] serde_json::Error),

    /// Table data could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A roll source failed.
    #[error("{0}")]
    Dice(#[from] trove_dice::DiceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_row_names_its_context() {
        let err = ItemError::MissingRow {
            table: "Rings".to_string(),
            tier: Some("lesser minor".to_string()),
            roll: 42,
        };
        assert_eq!(
            err.to_string(),
            "no row in Rings for roll 42 (tier: lesser minor)"
        );

        let err = ItemError::MissingRow {
            table: "Wondrous_Items".to_string(),
            tier: None,
            roll: 101,
        };
        assert_eq!(
            err.to_string(),
            "no row in Wondrous_Items for roll 101 (tier: none)"
        );
    }

    #[test]
    fn dice_errors_convert() {
        let err: ItemError = trove_dice::DiceError::InvalidExpression("q".to_string()).into();
        assert!(matches!(err, ItemError::Dice(_)));
    }
}
