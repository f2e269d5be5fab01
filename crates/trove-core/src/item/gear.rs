//! Armor, shields and weapons.
//!
//! Both start from a mundane base item, then roll a magic band for the
//! tier. The band either redirects to a named specific item or spells out
//! an enhancement bonus and up to two special-ability slots, e.g.
//! "+2 weapon with one +1 special ability".

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::{Compose, Draft, Interrupt, Step};
use crate::config::GenerationMode;
use crate::error::ItemError;
use crate::price::{EnhancementKind, Price};
use crate::special::{filter_families, qualifies};
use crate::table::{TableRow, names};

static ARMOR_ENHANCEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+(\d+) armor or shield").expect("armor enhancement pattern is valid")
});

static WEAPON_ENHANCEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+(\d+) weapon").expect("weapon enhancement pattern is valid"));

static SPECIAL_SLOTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+) \+(\d+) special").expect("special slot pattern is valid"));

/// How one family of gear builds its generic magic version.
struct GearRules {
    /// Prefix of the special-ability roll purposes.
    noun: &'static str,
    enhancement: &'static LazyLock<Regex>,
    specials_table: &'static str,
    properties: BTreeSet<String>,
    masterwork: f64,
    kind: EnhancementKind,
}

pub(crate) fn armor(cx: &mut Compose<'_>, _preset: Option<&str>) -> Step<Draft> {
    cx.tier = cx.tier.without_least();
    let tier = cx.tier.to_string();

    let base = cx.lookup(names::RANDOM_ARMOR_OR_SHIELD, None, "armor type")?;
    let armor_type = base
        .require(names::RANDOM_ARMOR_OR_SHIELD, "type")?
        .to_string();
    let is_armor = armor_type == "armor";
    let subtype = match armor_type.as_str() {
        "armor" => "Armor",
        "shield" => "Shield",
        _ => "Armor/Shield",
    };

    let magic = cx.lookup(
        names::MAGIC_ARMOR_AND_SHIELDS,
        Some(tier.as_str()),
        "armor magic property",
    )?;
    if magic.result.ends_with("specific armor or shield") {
        let table = if is_armor {
            names::SPECIFIC_ARMOR
        } else {
            names::SPECIFIC_SHIELDS
        };
        let row = cx.lookup(table, Some(tier.as_str()), "specific magic armor")?;
        return Ok(Draft::new(subtype, row.result, Price::parse(&row.price)));
    }

    let rules = GearRules {
        noun: "armor",
        enhancement: &ARMOR_ENHANCEMENT,
        specials_table: if is_armor {
            names::SPECIAL_ABILITIES_ARMOR
        } else {
            names::SPECIAL_ABILITIES_SHIELD
        },
        properties: BTreeSet::from([armor_type.clone()]),
        masterwork: 150.0,
        kind: EnhancementKind::Standard,
    };
    generic(cx, &rules, &base, &magic, subtype)
}

pub(crate) fn weapon(cx: &mut Compose<'_>, _preset: Option<&str>) -> Step<Draft> {
    cx.tier = cx.tier.without_least();
    let tier = cx.tier.to_string();

    let base = cx.lookup(names::RANDOM_WEAPON, None, "weapon type")?;
    let weapon_type = base.require(names::RANDOM_WEAPON, "type")?.to_string();
    let subtype = match weapon_type.as_str() {
        "melee" => "Melee",
        "ranged" => "Ranged",
        _ => "Weapon",
    };

    let magic = cx.lookup(names::MAGIC_WEAPONS, Some(tier.as_str()), "weapon magic property")?;
    if magic.result.ends_with("specific weapon") {
        let row = cx.lookup(names::SPECIFIC_WEAPONS, Some(tier.as_str()), "specific magic weapon")?;
        return Ok(Draft::new(subtype, row.result, Price::parse(&row.price)));
    }

    let rules = GearRules {
        noun: "weapon",
        enhancement: &WEAPON_ENHANCEMENT,
        specials_table: if weapon_type == "melee" {
            names::SPECIAL_ABILITIES_MELEE_WEAPON
        } else {
            names::SPECIAL_ABILITIES_RANGED_WEAPON
        },
        properties: weapon_properties(&base, &weapon_type),
        masterwork: 300.0,
        kind: EnhancementKind::Weapon,
    };
    generic(cx, &rules, &base, &magic, subtype)
}

/// Damage types (B/P/S letters), wield types and the weapon type.
fn weapon_properties(base: &TableRow, weapon_type: &str) -> BTreeSet<String> {
    let mut properties = BTreeSet::new();
    let damage = base.field("damage_type").unwrap_or_default();
    for (letter, name) in [('B', "bludgeoning"), ('P', "piercing"), ('S', "slashing")] {
        if damage.contains(letter) {
            properties.insert(name.to_string());
        }
    }
    properties.extend(
        base.field("wield_type")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string),
    );
    properties.insert(weapon_type.to_string());
    properties
}

fn generic(
    cx: &mut Compose<'_>,
    rules: &GearRules,
    base: &TableRow,
    magic: &TableRow,
    subtype: &str,
) -> Step<Draft> {
    let enhancement = rules
        .enhancement
        .captures(&magic.result)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .unwrap_or(0);

    let malformed = || ItemError::MalformedRow {
        table: magic_table(rules).to_string(),
        low: magic.low,
        high: magic.high,
        field: "result".to_string(),
    };

    let mut specials: Vec<(String, String)> = Vec::new();
    let mut valid = true;
    let mut slot = 0;
    for caps in SPECIAL_SLOTS.captures_iter(&magic.result) {
        let count = match &caps[1] {
            "one" => 1,
            "two" => 2,
            _ => return Err(malformed().into()),
        };
        let strength = format!("+{}", &caps[2]);
        for _ in 0..count {
            slot += 1;
            let purpose = format!("{} special ability {slot}", rules.noun);
            let (row, qualified) = special(cx, rules, &strength, &purpose, &specials)?;
            valid &= qualified;
            // Only enumeration keeps a repeat, and it counts once.
            if !specials.iter().any(|(name, _)| *name == row.result) {
                specials.push((row.result, row.price));
            }
        }
    }
    filter_families(&mut specials);

    let mut label = base.result.clone();
    let mut price = Price::parse_as(&base.price, rules.kind);
    if enhancement > 0 {
        label.push_str(&format!(" +{enhancement}"));
        for (name, _) in &specials {
            label.push('/');
            label.push_str(name);
        }
        price.add_gold(rules.masterwork);
        price.add_enhancement(enhancement);
        for (_, ability_price) in &specials {
            price.add_text(ability_price);
        }
    }

    let mut draft =
        Draft::new(subtype, label, price).detail("enhancement", enhancement.to_string());
    draft.valid = valid;
    Ok(draft)
}

/// Roll one special ability. Normal mode rerolls disqualified abilities and
/// ones already on the item; enumeration mode keeps the first roll and
/// reports whether it qualified.
fn special(
    cx: &mut Compose<'_>,
    rules: &GearRules,
    strength: &str,
    purpose: &str,
    chosen: &[(String, String)],
) -> Step<(TableRow, bool)> {
    let enumerating = cx.config.mode == GenerationMode::Enumeration;
    let attempts = if enumerating {
        1
    } else {
        cx.config.max_special_rerolls
    };
    for _ in 0..attempts {
        let row = cx.lookup(rules.specials_table, Some(strength), purpose)?;
        let qualified = qualifies(&rules.properties, &row.qualifiers, &row.disqualifiers);
        if enumerating {
            return Ok((row, qualified));
        }
        if !qualified {
            warn!(ability = %row.result, purpose, "special ability disqualified, rerolling");
        } else if chosen.iter().any(|(name, _)| *name == row.result) {
            debug!(ability = %row.result, purpose, "special ability already present, rerolling");
        } else {
            return Ok((row, true));
        }
    }
    Err(Interrupt::Failed(ItemError::NoQualifyingSpecial {
        table: rules.specials_table.to_string(),
        attempts,
    }))
}

fn magic_table(rules: &GearRules) -> &'static str {
    match rules.kind {
        EnhancementKind::Weapon => names::MAGIC_WEAPONS,
        EnhancementKind::Standard => names::MAGIC_ARMOR_AND_SHIELDS,
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GenerateConfig;
    use crate::error::ItemError;
    use crate::generator::{Generated, Generator};
    use crate::item::{Item, ItemKind};
    use crate::testing::sample_store;
    use crate::tier::Tier;
    use trove_dice::{NoopListener, ScriptedRoller};

    fn make(kind: ItemKind, tier: &str, rolls: &[u32], config: GenerateConfig) -> Item {
        let generator = Generator::with_config(sample_store(), config);
        let mut roller = ScriptedRoller::new(rolls.iter().copied());
        match generator
            .generate_item(
                Tier::parse(tier).unwrap(),
                kind,
                &mut roller,
                &mut NoopListener,
            )
            .unwrap()
        {
            Generated::Item(item) => item,
            Generated::Complete => panic!("scripted rolls never complete"),
        }
    }

    fn armor(tier: &str, rolls: &[u32]) -> Item {
        make(ItemKind::ArmorShield, tier, rolls, GenerateConfig::default())
    }

    fn weapon(tier: &str, rolls: &[u32]) -> Item {
        make(ItemKind::Weapon, tier, rolls, GenerateConfig::default())
    }

    #[test]
    fn plain_enhanced_armor() {
        // Chain shirt, +1 armor or shield
        let item = armor("lesser minor", &[10, 30]);
        assert_eq!(item.to_string(), "Armor: Chain shirt +1");
        // 100 base + 150 masterwork + 1000 enhancement
        assert_eq!(item.price.to_string(), "1,250.00 gp");
        assert_eq!(item.rolls.results(), vec![10, 30]);
        assert_eq!(item.details["enhancement"], "1");
    }

    #[test]
    fn armor_with_a_bonus_special() {
        // Breastplate, +1 with one +1 special, Fortification (light) (+1 bonus)
        let item = armor("lesser minor", &[50, 70, 10]);
        assert_eq!(item.label, "Breastplate +1/Fortification (light)");
        // 200 + 150 + (1 + 1)^2 * 1000
        assert_eq!(item.price.value(), Some(4350.0));
    }

    #[test]
    fn armor_with_a_flat_priced_special() {
        // Chain shirt, +1 with one +1 special, Shadow (3,750 gp)
        let item = armor("lesser minor", &[1, 61, 30]);
        assert_eq!(item.label, "Chain shirt +1/Shadow");
        assert_eq!(item.price.value(), Some(100.0 + 150.0 + 1000.0 + 3750.0));
    }

    #[test]
    fn shield_uses_shield_specials() {
        // Heavy steel shield, +1 with one +1 special, Bashing
        let item = armor("lesser minor", &[80, 61, 75]);
        assert_eq!(item.to_string(), "Shield: Heavy steel shield +1/Bashing");
    }

    #[test]
    fn specific_armor_replaces_the_generic_path() {
        let item = armor("lesser minor", &[10, 95, 1]);
        assert_eq!(item.to_string(), "Armor: Mithral shirt");
        assert_eq!(item.price.value(), Some(1100.0));

        let item = armor("lesser minor", &[90, 95, 1]);
        assert_eq!(item.to_string(), "Shield: Darkwood buckler");
    }

    #[test]
    fn least_is_downgraded() {
        let item = armor("least minor", &[10, 30]);
        assert_eq!(item.tier.unwrap().to_string(), "lesser minor");
    }

    #[test]
    fn weapon_enhancement_costs_double() {
        // Longsword, +2 weapon
        let item = weapon("greater minor", &[1, 60]);
        assert_eq!(item.to_string(), "Melee: Longsword +2");
        // 15 + 300 + 2 * 2^2 * 1000
        assert_eq!(item.price.value(), Some(8315.0));
    }

    #[test]
    fn weapon_with_two_specials() {
        // Longsword, +2 with two +1 specials: Flaming, Frost
        let item = weapon("greater medium", &[1, 50, 10, 90]);
        assert_eq!(item.label, "Longsword +2/Flaming/Frost");
        // enhancement 2 + 1 + 1 = 4: 15 + 300 + 2 * 16000
        assert_eq!(item.price.value(), Some(32315.0));
        assert!(item.valid);
    }

    #[test]
    fn duplicate_special_is_rerolled() {
        // Flaming, Flaming again, then Frost
        let item = weapon("greater medium", &[1, 50, 10, 20, 90]);
        assert_eq!(item.label, "Longsword +2/Flaming/Frost");
        assert_eq!(item.price.value(), Some(32315.0));
        assert_eq!(item.rolls.results(), vec![1, 50, 10, 20, 90]);
    }

    #[test]
    fn duplicate_special_counts_once_when_enumerating() {
        let item = make(
            ItemKind::Weapon,
            "greater medium",
            &[1, 50, 10, 20],
            GenerateConfig::enumeration(),
        );
        assert_eq!(item.label, "Longsword +2/Flaming");
        // enhancement 2 + 1 = 3
        assert_eq!(item.price.value(), Some(15.0 + 300.0 + 18000.0));
    }

    #[test]
    fn specials_keep_roll_order() {
        // Frost first, then Flaming
        let item = weapon("greater medium", &[1, 50, 90, 10]);
        assert_eq!(item.label, "Longsword +2/Frost/Flaming");
    }

    #[test]
    fn family_filter_keeps_the_stronger_ability() {
        // Chain shirt, +4 with two +1 specials: Energy resistance and
        // Energy resistance, improved
        let item = armor("greater major", &[10, 50, 80, 95]);
        assert_eq!(item.label, "Chain shirt +4/Energy resistance, improved");
        assert_eq!(item.price.value(), Some(100.0 + 150.0 + 16000.0 + 42000.0));
    }

    #[test]
    fn disqualified_special_is_rerolled() {
        // Warhammer (bludgeoning) rolls Keen, which needs piercing or
        // slashing, then Flaming.
        let item = weapon("lesser minor", &[50, 80, 40, 5]);
        assert_eq!(item.label, "Warhammer +1/Flaming");
        assert!(item.valid);
        assert_eq!(item.rolls.results(), vec![50, 80, 40, 5]);
        let purposes: Vec<&str> = item
            .rolls
            .entries()
            .iter()
            .map(|e| e.purpose.as_str())
            .collect();
        assert_eq!(
            purposes,
            vec![
                "weapon type",
                "weapon magic property",
                "weapon special ability 1",
                "weapon special ability 1",
            ]
        );
    }

    #[test]
    fn disqualified_special_flags_the_item_when_enumerating() {
        let item = make(
            ItemKind::Weapon,
            "lesser minor",
            &[50, 80, 40],
            GenerateConfig::enumeration(),
        );
        assert_eq!(item.to_string(), "Melee: Warhammer +1/Keen [invalid]");
        assert!(!item.valid);
    }

    #[test]
    fn reroll_bound_is_an_error() {
        let generator = Generator::with_config(
            sample_store(),
            GenerateConfig::default().with_max_special_rerolls(2),
        );
        let mut roller = ScriptedRoller::new([50, 80, 40, 41]);
        let err = generator
            .generate_item(
                Tier::parse("lesser minor").unwrap(),
                ItemKind::Weapon,
                &mut roller,
                &mut NoopListener,
            )
            .unwrap_err();
        assert!(matches!(err, ItemError::NoQualifyingSpecial { attempts: 2, .. }));
    }

    #[test]
    fn ranged_weapon_uses_ranged_specials() {
        let item = weapon("lesser minor", &[90, 80, 80]);
        assert_eq!(item.to_string(), "Ranged: Longbow +1/Designating, lesser");
    }

    #[test]
    fn specific_weapon() {
        let item = weapon("greater major", &[1, 99, 1]);
        assert_eq!(item.to_string(), "Melee: Holy avenger");
        assert_eq!(item.price.to_string(), "120,630.00 gp");
    }
}
