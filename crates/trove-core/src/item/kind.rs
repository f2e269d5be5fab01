use serde::{Deserialize, Serialize};

use crate::error::{ItemError, ItemResult};

/// The closed set of item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    /// A placeholder for a failed generation.
    Invalid,
    /// An item drawn from an aggregated frequency table.
    Database,
    /// Armor or shield.
    ArmorShield,
    /// Weapon.
    Weapon,
    /// Potion or oil.
    Potion,
    /// Ring.
    Ring,
    /// Rod.
    Rod,
    /// Scroll.
    Scroll,
    /// Staff.
    Staff,
    /// Wand.
    Wand,
    /// Wondrous item.
    WondrousItem,
    /// Art object.
    ArtObject,
    /// Gem.
    Gem,
}

/// Request keywords: kind, plus a preset subtype for wondrous slots.
const KEYWORDS: &[(&str, ItemKind, Option<&str>)] = &[
    ("armor/shield", ItemKind::ArmorShield, None),
    ("armor and shield", ItemKind::ArmorShield, None),
    ("armor or shield", ItemKind::ArmorShield, None),
    ("armor", ItemKind::ArmorShield, None),
    ("shield", ItemKind::ArmorShield, None),
    ("weapon", ItemKind::Weapon, None),
    ("potion", ItemKind::Potion, None),
    ("ring", ItemKind::Ring, None),
    ("rod", ItemKind::Rod, None),
    ("scroll", ItemKind::Scroll, None),
    ("staff", ItemKind::Staff, None),
    ("staves", ItemKind::Staff, None),
    ("wand", ItemKind::Wand, None),
    ("wondrous item", ItemKind::WondrousItem, None),
    ("wondrous", ItemKind::WondrousItem, None),
    ("belt", ItemKind::WondrousItem, Some("Belts")),
    ("belts", ItemKind::WondrousItem, Some("Belts")),
    ("body", ItemKind::WondrousItem, Some("Body")),
    ("chest", ItemKind::WondrousItem, Some("Chest")),
    ("eyes", ItemKind::WondrousItem, Some("Eyes")),
    ("feet", ItemKind::WondrousItem, Some("Feet")),
    ("hand", ItemKind::WondrousItem, Some("Hands")),
    ("hands", ItemKind::WondrousItem, Some("Hands")),
    ("head", ItemKind::WondrousItem, Some("Head")),
    ("headband", ItemKind::WondrousItem, Some("Headband")),
    ("neck", ItemKind::WondrousItem, Some("Neck")),
    ("shoulders", ItemKind::WondrousItem, Some("Shoulders")),
    ("slotless", ItemKind::WondrousItem, Some("Slotless")),
    ("wrist", ItemKind::WondrousItem, Some("Wrists")),
    ("wrists", ItemKind::WondrousItem, Some("Wrists")),
    ("art object", ItemKind::ArtObject, None),
    ("gem", ItemKind::Gem, None),
    ("gemstone", ItemKind::Gem, None),
];

impl ItemKind {
    /// Display name, also the category shown in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "Invalid",
            Self::Database => "Database",
            Self::ArmorShield => "Armor/Shield",
            Self::Weapon => "Weapon",
            Self::Potion => "Potion",
            Self::Ring => "Ring",
            Self::Rod => "Rod",
            Self::Scroll => "Scroll",
            Self::Staff => "Staff",
            Self::Wand => "Wand",
            Self::WondrousItem => "Wondrous Item",
            Self::ArtObject => "Art Object",
            Self::Gem => "Gem",
        }
    }

    /// Resolve a kind or subtype keyword, case-insensitively.
    pub fn from_keyword(keyword: &str) -> ItemResult<(Self, Option<&'static str>)> {
        let keyword = keyword.trim().to_lowercase();
        KEYWORDS
            .iter()
            .find(|(word, _, _)| *word == keyword)
            .map(|(_, kind, subtype)| (*kind, *subtype))
            .ok_or(ItemError::UnknownKind(keyword))
    }

    /// Whether a single request word names a kind or subtype.
    pub fn is_keyword(word: &str) -> bool {
        Self::from_keyword(word).is_ok()
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
