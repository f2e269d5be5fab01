//! Wondrous items.
//!
//! A body slot is rolled (unless the request named one), then the slot's
//! table is rolled at the item's tier. A row may redirect once to another
//! tier or table via its `redirect_tier` / `redirect_table` columns; the
//! slotless "Roll on the Least Minor table" row is the standard example.

use super::{Compose, Draft, Step};
use crate::price::Price;
use crate::table::names;
use crate::tier::Degree;

pub(crate) fn wondrous(cx: &mut Compose<'_>, preset: Option<&str>) -> Step<Draft> {
    let slot = match preset {
        Some(slot) => slot.to_string(),
        None => {
            cx.lookup(names::WONDROUS_ITEMS, None, "wondrous item slot")?
                .result
        }
    };
    // Only slotless items come in least minor.
    if slot != "Slotless" {
        cx.tier = cx.tier.without_least();
    }
    let tier = cx.tier.to_string();
    let table = names::wondrous_slot(&slot);

    let mut row = cx.lookup(&table, Some(tier.as_str()), "specific wondrous item")?;
    let redirect_tier = row.field("redirect_tier").map(str::to_string);
    if let Some(target_tier) = redirect_tier {
        let target_table = row.field("redirect_table").unwrap_or(&table).to_string();
        let purpose = format!("{target_tier} wondrous item");
        row = cx.lookup(&target_table, Some(target_tier.as_str()), &purpose)?;
        if cx.tier.degree != Degree::Least {
            if let Ok(tier) = target_tier.parse() {
                cx.tier = tier;
            }
        }
    }

    Ok(Draft::new(slot.clone(), row.result, Price::parse(&row.price)).detail("slot", slot))
}
