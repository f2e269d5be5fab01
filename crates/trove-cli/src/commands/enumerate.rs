use std::path::Path;

use colored::Colorize;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use trove_enum::{EnumerateConfig, Enumerator};

pub fn run(
    tables: &Path,
    keywords: &[String],
    skip: bool,
    limit: Option<u64>,
    json: bool,
) -> Result<(), String> {
    let store = super::load_store(tables)?;
    let request = super::parse_request(keywords)?;

    let mut config = EnumerateConfig::default().with_skip(skip);
    if let Some(limit) = limit {
        config = config.with_limit(limit);
    }
    let result = Enumerator::with_config(store, config)
        .run(&request)
        .map_err(|e| e.to_string())?;

    if json {
        let text =
            serde_json::to_string_pretty(result.tally.rows()).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Count", "Chance", "Kind", "Subtype", "Item", "Price"]);
    for row in result.tally.rows() {
        table.add_row(vec![
            row.count.to_string(),
            format!("{:.4}%", row.probability * 100.0),
            row.kind.to_string(),
            row.subtype.clone(),
            row.item.clone(),
            row.price.to_string(),
        ]);
    }
    for index in [0, 1] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    println!(
        "  {} {}",
        "Enumeration".bold(),
        format!("({} {})", request.tier, request.kind).dimmed()
    );
    println!("{table}");
    println!();
    println!(
        "  {} items, {} outcomes, {} leaves",
        result.items,
        result.tally.len(),
        result.tally.total()
    );
    if result.failed > 0 {
        println!(
            "  {}",
            format!("{} leaves hit a missing table row", result.failed).red()
        );
    }
    if !result.complete {
        println!("  {}", "stopped at the item limit".yellow());
    }
    Ok(())
}
