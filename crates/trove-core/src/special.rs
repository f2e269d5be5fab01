//! Special-ability eligibility and redundancy filtering.

use std::collections::BTreeSet;

/// Ability families, weakest first. An item never keeps two members of
/// one family.
pub const SPECIAL_FAMILIES: &[&[&str]] = &[
    &["Designating, lesser", "Designating, greater"],
    &[
        "Energy resistance",
        "Energy resistance, improved",
        "Energy resistance, greater",
    ],
    &[
        "Fortification (light)",
        "Fortification (moderate)",
        "Fortification (heavy)",
    ],
    &["Lucky", "Lucky, greater"],
    &["Reliable", "Reliable, greater"],
    &["Shadow", "Shadow, improved", "Shadow, greater"],
    &["Slick", "Slick, improved", "Slick, greater"],
    &[
        "Spell resistance (13)",
        "Spell resistance (15)",
        "Spell resistance (17)",
        "Spell resistance (19)",
    ],
];

/// Whether an ability with these qualifiers and disqualifiers may go on an
/// item with `properties`.
pub fn qualifies(
    properties: &BTreeSet<String>,
    qualifiers: &[String],
    disqualifiers: &[String],
) -> bool {
    let qualified = qualifiers.is_empty() || qualifiers.iter().any(|q| properties.contains(q));
    let disqualified =
        !disqualifiers.is_empty() && disqualifiers.iter().any(|d| properties.contains(d));
    qualified && !disqualified
}

/// Drop every ability that has a stronger member of its family present.
/// The survivors keep their roll order.
pub fn filter_families<V>(specials: &mut Vec<(String, V)>) {
    let names: Vec<String> = specials.iter().map(|(name, _)| name.clone()).collect();
    let has_stronger = |name: &str| {
        SPECIAL_FAMILIES.iter().any(|family| {
            family.iter().position(|m| *m == name).is_some_and(|rank| {
                family[rank + 1..]
                    .iter()
                    .any(|stronger| names.iter().any(|n| n == stronger))
            })
        })
    };
    specials.retain(|(name, _)| !has_stronger(name));
}
