use std::path::Path;

use colored::Colorize;

pub fn run(tables: &Path) -> Result<(), String> {
    let store = super::load_store(tables)?;
    let issues = store.validate();
    let count = store.table_names().count();

    if issues.is_empty() {
        println!("  All checks passed for {count} tables.");
        return Ok(());
    }

    for issue in &issues {
        println!("  {} {issue}", "✗".red());
    }
    Err(format!("{} band problems in {count} tables", issues.len()))
}
