//! Item prices.
//!
//! Prices are built from table text such as "1,500 gp", "2 gp 5 sp" or
//! "+1 bonus". Bonus tokens accumulate into an enhancement count whose cost
//! is quadratic, so it is only applied when the price is read.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static COIN_PIECE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)((?:\d{1,3},)*\d+) *(pp|gp|sp|cp)?[, ]*").expect("coin pattern is valid")
});

static BONUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+(\d+) bonus").expect("bonus pattern is valid"));

/// Decides the enhancement surcharge rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnhancementKind {
    /// Armor, shields and everything else.
    #[default]
    Standard,
    /// Weapons pay double.
    Weapon,
}

/// A gold value plus a deferred enhancement bonus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Price {
    gold: f64,
    enhancement: u32,
    kind: EnhancementKind,
    error: bool,
}

impl Price {
    /// A zero price.
    pub fn zero() -> Self {
        Self::default()
    }

    /// A plain gold amount.
    pub fn gold(amount: f64) -> Self {
        Self {
            gold: amount,
            ..Self::default()
        }
    }

    /// Parse price text. Bad text yields an error price rather than
    /// failing.
    pub fn parse(text: &str) -> Self {
        Self::parse_as(text, EnhancementKind::Standard)
    }

    /// Parse price text for an item with the given surcharge rate.
    pub fn parse_as(text: &str, kind: EnhancementKind) -> Self {
        let mut price = Self {
            kind,
            ..Self::default()
        };
        price.add_text(text);
        price
    }

    /// The error price.
    pub fn error() -> Self {
        Self {
            error: true,
            ..Self::default()
        }
    }

    /// Add price text: a coin expression or a "+N bonus" token.
    pub fn add_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            self.error = true;
        } else if text.ends_with(" bonus") {
            match BONUS.captures(text).and_then(|c| c[1].parse::<u32>().ok()) {
                Some(bonus) => self.enhancement += bonus,
                None => self.error = true,
            }
        } else {
            let mut matched = false;
            for caps in COIN_PIECE.captures_iter(text) {
                let Ok(count) = caps[1].replace(',', "").parse::<f64>() else {
                    self.error = true;
                    continue;
                };
                let scale = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
                    Some(coin) if coin == "pp" => 10.0,
                    Some(coin) if coin == "sp" => 0.1,
                    Some(coin) if coin == "cp" => 0.01,
                    _ => 1.0,
                };
                self.gold += count * scale;
                matched = true;
            }
            if !matched {
                self.error = true;
            }
        }
    }

    /// Add a gold amount.
    pub fn add_gold(&mut self, amount: f64) {
        self.gold += amount;
    }

    /// Add enhancement bonus points.
    pub fn add_enhancement(&mut self, bonus: u32) {
        self.enhancement += bonus;
    }

    /// Add another price's gold and enhancement.
    pub fn add(&mut self, other: &Price) {
        self.gold += other.gold;
        self.enhancement += other.enhancement;
        self.error |= other.error;
    }

    /// Accumulated enhancement bonus.
    pub fn enhancement(&self) -> u32 {
        self.enhancement
    }

    /// Surcharge rate.
    pub fn kind(&self) -> EnhancementKind {
        self.kind
    }

    /// Whether the price could not be determined.
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Cost of the accumulated enhancement: 1000 gp per bonus squared,
    /// doubled for weapons. Applied once regardless of how many sources
    /// contributed to the bonus.
    pub fn surcharge(&self) -> f64 {
        let base = f64::from(self.enhancement).powi(2) * 1000.0;
        match self.kind {
            EnhancementKind::Weapon => base * 2.0,
            EnhancementKind::Standard => base,
        }
    }

    /// Total value in gold, or `None` for an error price.
    pub fn value(&self) -> Option<f64> {
        (!self.error).then(|| self.gold + self.surcharge())
    }

    /// Total value in gold, counting an error price as zero.
    pub fn value_or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{} gp", group_thousands(value)),
            None => write!(f, "<error> gp"),
        }
    }
}

/// Two decimals with comma thousands separators.
fn group_thousands(value: f64) -> String {
    let text = format!("{:.2}", value.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}
