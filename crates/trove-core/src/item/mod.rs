//! Items and the per-kind composers.

mod compose;
mod flat;
mod gear;
mod kind;
mod spell;
mod wondrous;

pub use kind::ItemKind;

pub(crate) use compose::{Compose, Interrupt, Step};

use std::collections::BTreeMap;

use serde::Serialize;
use trove_dice::RollRecord;

use crate::price::Price;
use crate::tier::Tier;

/// A generated item.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    /// What kind of item this is.
    pub kind: ItemKind,
    /// The tier it was generated at, after any least-to-lesser downgrade.
    pub tier: Option<Tier>,
    /// Finer category: "Melee", "Shield", "Belts", ...
    pub subtype: String,
    /// The item's name.
    pub label: String,
    /// Market price.
    pub price: Price,
    /// False when an enumeration kept a disqualified special ability.
    pub valid: bool,
    /// Every roll that produced the item.
    pub rolls: RollRecord,
    /// Kind-specific facts such as spell level.
    pub details: BTreeMap<String, String>,
}

impl Item {
    /// The placeholder returned when generation cannot produce an item.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Invalid,
            tier: None,
            subtype: String::new(),
            label: reason.into(),
            price: Price::error(),
            valid: false,
            rolls: RollRecord::new(),
            details: BTreeMap::new(),
        }
    }

    /// An item taken from an aggregated frequency table.
    pub fn database(subtype: &str, label: &str, price: Price) -> Self {
        Self {
            kind: ItemKind::Database,
            tier: None,
            subtype: subtype.to_string(),
            label: label.to_string(),
            price,
            valid: true,
            rolls: RollRecord::new(),
            details: BTreeMap::new(),
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.label.starts_with(&self.subtype) {
            write!(f, "{}", self.label)?;
        } else {
            write!(f, "{}: {}", self.subtype, self.label)?;
        }
        if !self.valid && self.kind != ItemKind::Invalid {
            write!(f, " [invalid]")?;
        }
        Ok(())
    }
}

/// What a composer produces; the generator adds kind, tier and rolls.
#[derive(Debug, Clone)]
pub(crate) struct Draft {
    pub subtype: String,
    pub label: String,
    pub price: Price,
    pub valid: bool,
    pub details: BTreeMap<String, String>,
}

impl Draft {
    pub fn new(subtype: impl Into<String>, label: impl Into<String>, price: Price) -> Self {
        Self {
            subtype: subtype.into(),
            label: label.into(),
            price,
            valid: true,
            details: BTreeMap::new(),
        }
    }

    pub fn detail(mut self, key: &str, value: impl Into<String>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }
}

/// A composer: given the composition context and an optional preset
/// subtype, roll up one item.
pub(crate) type ComposeFn = fn(&mut Compose<'_>, Option<&str>) -> Step<Draft>;

const REGISTRY: &[(ItemKind, ComposeFn)] = &[
    (ItemKind::ArmorShield, gear::armor),
    (ItemKind::Weapon, gear::weapon),
    (ItemKind::Potion, spell::potion),
    (ItemKind::Scroll, spell::scroll),
    (ItemKind::Wand, spell::wand),
    (ItemKind::Ring, flat::ring),
    (ItemKind::Rod, flat::rod),
    (ItemKind::Staff, flat::staff),
    (ItemKind::Gem, flat::gem),
    (ItemKind::ArtObject, flat::art_object),
    (ItemKind::WondrousItem, wondrous::wondrous),
];

/// The composer for a kind. Invalid and Database items are never
/// composed.
pub(crate) fn composer(kind: ItemKind) -> Option<ComposeFn> {
    REGISTRY
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, compose)| *compose)
}
