//! Item tiers: a degree (least/lesser/greater) and a strength
//! (minor/medium/major).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ItemError, ItemResult};

/// The finer half of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Degree {
    /// Only slotless wondrous items have least-minor tables.
    Least,
    /// Lesser.
    Lesser,
    /// Greater.
    Greater,
}

/// The coarse half of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    /// Minor.
    Minor,
    /// Medium.
    Medium,
    /// Major.
    Major,
}

impl Degree {
    /// Keyword form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Least => "least",
            Self::Lesser => "lesser",
            Self::Greater => "greater",
        }
    }

    /// All degrees.
    pub const ALL: [Degree; 3] = [Self::Least, Self::Lesser, Self::Greater];
}

impl Strength {
    /// Keyword form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Medium => "medium",
            Self::Major => "major",
        }
    }

    /// All strengths.
    pub const ALL: [Strength; 3] = [Self::Minor, Self::Medium, Self::Major];
}

impl FromStr for Degree {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ItemError::InvalidTier(s.to_string()))
    }
}

impl FromStr for Strength {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ItemError::InvalidTier(s.to_string()))
    }
}

impl std::fmt::Display for Degree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A full tier such as "lesser minor". Tiered table rows are keyed by its
/// display form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tier {
    /// Least, lesser or greater.
    pub degree: Degree,
    /// Minor, medium or major.
    pub strength: Strength,
}

impl Tier {
    /// Build a tier. "least" only exists at minor strength.
    pub fn new(degree: Degree, strength: Strength) -> ItemResult<Self> {
        if degree == Degree::Least && strength != Strength::Minor {
            return Err(ItemError::InvalidTier(format!("{degree} {strength}")));
        }
        Ok(Self { degree, strength })
    }

    /// Parse "lesser minor" style text.
    pub fn parse(text: &str) -> ItemResult<Self> {
        let mut words = text.split_whitespace();
        let (Some(degree), Some(strength), None) = (words.next(), words.next(), words.next())
        else {
            return Err(ItemError::InvalidTier(text.to_string()));
        };
        Self::new(degree.parse()?, strength.parse()?)
    }

    /// The tier with "least" raised to "lesser", for item kinds that have
    /// no least tables.
    pub fn without_least(self) -> Self {
        match self.degree {
            Degree::Least => Self {
                degree: Degree::Lesser,
                strength: self.strength,
            },
            _ => self,
        }
    }

    /// Every valid tier, least minor first.
    pub fn all() -> Vec<Tier> {
        let mut tiers = Vec::new();
        for strength in Strength::ALL {
            for degree in Degree::ALL {
                if let Ok(tier) = Self::new(degree, strength) {
                    tiers.push(tier);
                }
            }
        }
        tiers
    }
}

impl FromStr for Tier {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.degree, self.strength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let tier = Tier::parse("Greater  Major").unwrap();
        assert_eq!(tier.degree, Degree::Greater);
        assert_eq!(tier.strength, Strength::Major);
        assert_eq!(tier.to_string(), "greater major");
    }

    #[test]
    fn least_only_at_minor() {
        assert!(Tier::parse("least minor").is_ok());
        assert!(Tier::parse("least medium").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(Tier::parse("minor").is_err());
        assert!(Tier::parse("lesser minor ring").is_err());
        assert!(Tier::parse("middling minor").is_err());
    }

    #[test]
    fn least_downgrades() {
        let tier = Tier::parse("least minor").unwrap().without_least();
        assert_eq!(tier.to_string(), "lesser minor");
        let tier = Tier::parse("greater medium").unwrap().without_least();
        assert_eq!(tier.to_string(), "greater medium");
    }

    #[test]
    fn all_tiers() {
        let tiers = Tier::all();
        assert_eq!(tiers.len(), 7);
        assert_eq!(tiers[0].to_string(), "least minor");
        assert_eq!(tiers[6].to_string(), "greater major");
    }
}
