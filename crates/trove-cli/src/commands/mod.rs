pub mod check;
pub mod enumerate;
pub mod generic;
pub mod item;

use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use trove_core::{Item, ItemRequest, MemoryStore};

/// Load a table file.
fn load_store(path: &Path) -> Result<MemoryStore, String> {
    MemoryStore::load(path).map_err(|e| format!("cannot load tables from {}: {e}", path.display()))
}

/// Parse request keywords given as separate arguments.
fn parse_request(keywords: &[String]) -> Result<ItemRequest, String> {
    ItemRequest::parse(&keywords.join(" ")).map_err(|e| e.to_string())
}

/// Print an item with its price and rolls.
fn print_item(item: &Item) {
    let tier = item
        .tier
        .map(|tier| tier.to_string())
        .unwrap_or_default();
    println!("  {}", item.to_string().bold());
    println!(
        "  {} {}",
        format!("{tier} {}", item.kind).dimmed(),
        item.price.to_string().yellow()
    );
    if !item.valid {
        println!("  {}", "invalid: a special ability does not qualify".red());
    }

    if item.rolls.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Purpose", "Dice", "Roll"]);
    for entry in item.rolls.entries() {
        table.add_row(vec![
            entry.purpose.clone(),
            entry.expr.to_string(),
            entry.result.to_string(),
        ]);
    }
    println!();
    println!("{table}");
}
