//! Potions, scrolls and wands: a spell level, a rarity, then a spell.

use super::{Compose, Draft, Step};
use crate::error::ItemError;
use crate::price::Price;
use crate::table::{TableRow, names};

/// Spell and caster level of a level row.
fn levels(row: &TableRow, table: &str) -> Step<(String, String)> {
    Ok((
        row.require(table, "spell_level")?.to_string(),
        row.require(table, "caster_level")?.to_string(),
    ))
}

/// Rarity for a level. Level 0 spells are always common.
fn rarity(cx: &mut Compose<'_>, level: &str, table: &str, purpose: &str) -> Step<String> {
    if level == "0" {
        return Ok("common".to_string());
    }
    Ok(cx.lookup(table, None, purpose)?.result.to_lowercase())
}

pub(crate) fn potion(cx: &mut Compose<'_>, _preset: Option<&str>) -> Step<Draft> {
    cx.tier = cx.tier.without_least();
    let tier = cx.tier.to_string();

    let row = cx.lookup(names::RANDOM_POTIONS_AND_OILS, Some(tier.as_str()), "potion level")?;
    let (level, caster) = levels(&row, names::RANDOM_POTIONS_AND_OILS)?;
    let rarity = rarity(cx, &level, names::POTION_OR_OIL_TYPE, "potion rarity")?;
    let spell = cx.lookup(&names::potion_spells(&level), Some(rarity.as_str()), "potion spell")?;

    let label = format!("Potion of {} ({level} Level, CL {caster})", spell.result);
    Ok(Draft::new("Potion", label, Price::parse(&spell.price))
        .detail("spell", spell.result)
        .detail("spell_level", level)
        .detail("caster_level", caster)
        .detail("rarity", rarity))
}

pub(crate) fn scroll(cx: &mut Compose<'_>, _preset: Option<&str>) -> Step<Draft> {
    cx.tier = cx.tier.without_least();
    let tier = cx.tier.to_string();

    let row = cx.lookup(names::RANDOM_SCROLLS, Some(tier.as_str()), "scroll level")?;
    let (level, caster) = levels(&row, names::RANDOM_SCROLLS)?;

    // Scroll types pair a rarity with a tradition, e.g. "Common Arcane".
    // Level 0 scrolls still roll: the tradition is always needed.
    let kind = cx.lookup(names::SCROLL_TYPE, None, "scroll type")?;
    let words: Vec<String> = kind
        .result
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    let [rarity, tradition] = words.as_slice() else {
        return Err(ItemError::MalformedRow {
            table: names::SCROLL_TYPE.to_string(),
            low: kind.low,
            high: kind.high,
            field: "result".to_string(),
        }
        .into());
    };

    let spell = cx.lookup(
        &names::scroll_spells(tradition, &level),
        Some(rarity.as_str()),
        "scroll spell",
    )?;
    let label = format!("Scroll of {} ({tradition}, {level} Level, CL {caster})", spell.result);
    Ok(Draft::new("Scroll", label, Price::parse(&spell.price))
        .detail("spell", spell.result)
        .detail("spell_level", level)
        .detail("caster_level", caster)
        .detail("rarity", rarity.as_str())
        .detail("tradition", tradition.as_str()))
}

pub(crate) fn wand(cx: &mut Compose<'_>, _preset: Option<&str>) -> Step<Draft> {
    cx.tier = cx.tier.without_least();
    let tier = cx.tier.to_string();

    let row = cx.lookup(names::RANDOM_WANDS, Some(tier.as_str()), "wand level")?;
    let (level, caster) = levels(&row, names::RANDOM_WANDS)?;
    let rarity = rarity(cx, &level, names::WAND_TYPE, "wand type")?;
    let spell = cx.lookup(&names::wand_spells(&level), Some(rarity.as_str()), "wand spell")?;

    let label = format!("Wand of {} ({level} Level, CL {caster})", spell.result);
    Ok(Draft::new("Wand", label, Price::parse(&spell.price))
        .detail("spell", spell.result)
        .detail("spell_level", level)
        .detail("caster_level", caster)
        .detail("rarity", rarity))
}
