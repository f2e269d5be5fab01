//! Table names used by the composers.

/// Item kind by coarse strength, for generic generation.
pub const ITEM_TYPES: &str = "Item_Types";

/// Mundane armor and shields.
pub const RANDOM_ARMOR_OR_SHIELD: &str = "Random_Armor_or_Shield";
/// Enhancement and special-ability bands for armor.
pub const MAGIC_ARMOR_AND_SHIELDS: &str = "Magic_Armor_and_Shields";
/// Armor special abilities.
pub const SPECIAL_ABILITIES_ARMOR: &str = "Special_Abilities_Armor";
/// Shield special abilities.
pub const SPECIAL_ABILITIES_SHIELD: &str = "Special_Abilities_Shield";
/// Named magic armor.
pub const SPECIFIC_ARMOR: &str = "Specific_Armor";
/// Named magic shields.
pub const SPECIFIC_SHIELDS: &str = "Specific_Shields";

/// Mundane weapons.
pub const RANDOM_WEAPON: &str = "Random_Weapon";
/// Enhancement and special-ability bands for weapons.
pub const MAGIC_WEAPONS: &str = "Magic_Weapons";
/// Melee weapon special abilities.
pub const SPECIAL_ABILITIES_MELEE_WEAPON: &str = "Special_Abilities_Melee_Weapon";
/// Ranged weapon special abilities.
pub const SPECIAL_ABILITIES_RANGED_WEAPON: &str = "Special_Abilities_Ranged_Weapon";
/// Named magic weapons.
pub const SPECIFIC_WEAPONS: &str = "Specific_Weapons";

/// Potion spell and caster level.
pub const RANDOM_POTIONS_AND_OILS: &str = "Random_Potions_and_Oils";
/// Potion rarity.
pub const POTION_OR_OIL_TYPE: &str = "Potion_or_Oil_Type";
/// Scroll spell and caster level.
pub const RANDOM_SCROLLS: &str = "Random_Scrolls";
/// Scroll rarity and tradition.
pub const SCROLL_TYPE: &str = "Scroll_Type";
/// Wand spell and caster level.
pub const RANDOM_WANDS: &str = "Random_Wands";
/// Wand rarity.
pub const WAND_TYPE: &str = "Wand_Type";

/// Rings.
pub const RINGS: &str = "Rings";
/// Rods.
pub const RODS: &str = "Rods";
/// Staves.
pub const STAVES: &str = "Staves";
/// Gems.
pub const RANDOM_GEMS: &str = "Random_Gems";
/// Art objects.
pub const RANDOM_ART_OBJECTS: &str = "Random_Art_Objects";

/// Wondrous item body slots.
pub const WONDROUS_ITEMS: &str = "Wondrous_Items";

/// Spell table for a potion of the given level ("0", "1st", ...).
pub fn potion_spells(level: &str) -> String {
    format!("Potion_or_Oil_Level_{}", level_number(level))
}

/// Spell table for a scroll of the given tradition and level.
pub fn scroll_spells(tradition: &str, level: &str) -> String {
    format!("Scrolls_{}_Level_{}", capitalize(tradition), level_number(level))
}

/// Spell table for a wand of the given level.
pub fn wand_spells(level: &str) -> String {
    format!("Wand_Level_{}", level_number(level))
}

/// Item table for a wondrous item slot. The slot table lists belts as
/// "Belts".
pub fn wondrous_slot(slot: &str) -> String {
    let slot = match slot {
        "Belts" => "Belt",
        other => other,
    };
    format!("Wondrous_Items_{slot}")
}

/// Leading digits of an ordinal level ("3rd" -> "3").
fn level_number(level: &str) -> &str {
    let end = level
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(level.len());
    &level[..end]
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
