//! Kinds resolved by a single tier lookup.

use std::sync::LazyLock;

use regex::Regex;
use trove_dice::DiceExpr;

use super::{Compose, Draft, Step};
use crate::error::ItemError;
use crate::price::Price;
use crate::table::{TableRow, names};

/// "2,500 gp +2d4 x 500 gp": a base plus a rolled multiple.
static GEM_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9,]+)\s*gp(?:\s*\+\s*(\d*d\d+)(?:\s*[x×]\s*([0-9,]+)\s*gp)?)?\s*$")
        .expect("gem price pattern is valid")
});

fn single(cx: &mut Compose<'_>, table: &str, purpose: &str, subtype: &str) -> Step<Draft> {
    cx.tier = cx.tier.without_least();
    let tier = cx.tier.to_string();
    let row = cx.lookup(table, Some(tier.as_str()), purpose)?;
    Ok(Draft::new(subtype, row.result, Price::parse(&row.price)))
}

pub(crate) fn ring(cx: &mut Compose<'_>, _preset: Option<&str>) -> Step<Draft> {
    single(cx, names::RINGS, "specific ring", "Ring")
}

pub(crate) fn rod(cx: &mut Compose<'_>, _preset: Option<&str>) -> Step<Draft> {
    single(cx, names::RODS, "specific rod", "Rod")
}

pub(crate) fn staff(cx: &mut Compose<'_>, _preset: Option<&str>) -> Step<Draft> {
    single(cx, names::STAVES, "specific staff", "Staff")
}

pub(crate) fn art_object(cx: &mut Compose<'_>, _preset: Option<&str>) -> Step<Draft> {
    single(cx, names::RANDOM_ART_OBJECTS, "art object type", "Art Object")
}

pub(crate) fn gem(cx: &mut Compose<'_>, _preset: Option<&str>) -> Step<Draft> {
    cx.tier = cx.tier.without_least();
    let tier = cx.tier.to_string();
    let row = cx.lookup(names::RANDOM_GEMS, Some(tier.as_str()), "gem type")?;
    let price = gem_price(cx, &row)?;
    Ok(Draft::new("Gem", row.result, price))
}

/// Gem prices may carry a dice term, rolled through the active roll source
/// so enumeration covers it like any other decision.
fn gem_price(cx: &mut Compose<'_>, row: &TableRow) -> Step<Price> {
    let Some(caps) = GEM_PRICE.captures(&row.price) else {
        return Ok(Price::parse(&row.price));
    };
    let number = |text: &str| -> Step<f64> {
        text.replace(',', "")
            .parse::<f64>()
            .map_err(|_| {
                ItemError::MalformedRow {
                    table: names::RANDOM_GEMS.to_string(),
                    low: row.low,
                    high: row.high,
                    field: "price".to_string(),
                }
                .into()
            })
    };
    let mut gold = number(&caps[1])?;
    if let Some(dice) = caps.get(2) {
        let expr = DiceExpr::parse(dice.as_str()).map_err(ItemError::from)?;
        let factor = match caps.get(3) {
            Some(factor) => number(factor.as_str())?,
            None => 1.0,
        };
        let rolled = cx.roll(expr, "gem value")?;
        gold += f64::from(rolled) * factor;
    }
    Ok(Price::gold(gold))
}
