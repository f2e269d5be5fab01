//! Keyword item requests such as "greater medium weapon".

use crate::error::{ItemError, ItemResult};
use crate::item::ItemKind;
use crate::tier::{Degree, Strength, Tier};

/// What to generate: a tier, a kind and optionally a preset subtype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    /// The tier to roll at.
    pub tier: Tier,
    /// The item kind.
    pub kind: ItemKind,
    /// A preset subtype, currently a wondrous item slot.
    pub subtype: Option<String>,
}

impl ItemRequest {
    /// A request without a preset subtype.
    pub fn new(tier: Tier, kind: ItemKind) -> Self {
        Self {
            tier,
            kind,
            subtype: None,
        }
    }

    /// Parse a keyword request.
    ///
    /// Exactly one degree, one strength and one kind or subtype keyword are
    /// required, in any order. Kind keywords may span words
    /// ("wondrous item", "art object").
    pub fn parse(text: &str) -> ItemResult<Self> {
        let mut degree = None;
        let mut strength = None;
        let mut rest = Vec::new();
        for word in text.split_whitespace() {
            if let Ok(d) = word.parse::<Degree>() {
                if degree.replace(d).is_some() {
                    return Err(ItemError::InvalidRequest(format!("more than one degree in '{text}'")));
                }
            } else if let Ok(s) = word.parse::<Strength>() {
                if strength.replace(s).is_some() {
                    return Err(ItemError::InvalidRequest(format!("more than one strength in '{text}'")));
                }
            } else {
                rest.push(word);
            }
        }

        let (Some(degree), Some(strength)) = (degree, strength) else {
            return Err(ItemError::InvalidRequest(format!(
                "'{text}' needs a degree and a strength"
            )));
        };
        if rest.is_empty() {
            return Err(ItemError::InvalidRequest(format!("'{text}' names no item kind")));
        }

        let keyword = rest.join(" ");
        let (kind, subtype) = match ItemKind::from_keyword(&keyword) {
            Ok(found) => found,
            Err(err) if rest.len() == 1 => return Err(err),
            Err(_) => {
                let leftover: Vec<&str> = rest
                    .iter()
                    .copied()
                    .filter(|w| !ItemKind::is_keyword(w))
                    .collect();
                return Err(ItemError::InvalidRequest(if leftover.is_empty() {
                    format!("more than one item kind in '{text}'")
                } else {
                    format!("unexpected keywords: {}", leftover.join(" "))
                }));
            }
        };

        Ok(Self {
            tier: Tier::new(degree, strength)?,
            kind,
            subtype: subtype.map(str::to_string),
        })
    }
}

impl std::str::FromStr for ItemRequest {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
