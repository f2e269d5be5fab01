use std::path::Path;

use colored::Colorize;
use trove_core::{Generated, Generator, ItemKind, Strength};
use trove_dice::{NoopListener, PseudorandomRoller, RollLog};

pub fn run(
    tables: &Path,
    strength: &str,
    min_value: f64,
    seed: Option<u64>,
    show_log: bool,
) -> Result<(), String> {
    let strength = strength.parse::<Strength>().map_err(|e| e.to_string())?;
    let store = super::load_store(tables)?;
    let generator = Generator::new(store);
    let mut roller = match seed {
        Some(seed) => PseudorandomRoller::seeded(seed),
        None => PseudorandomRoller::new(),
    };
    let mut log = RollLog::new();

    let item = match generator
        .generate_generic(strength, min_value, &mut roller, &mut NoopListener, &mut log)
        .map_err(|e| e.to_string())?
    {
        Generated::Item(item) => item,
        Generated::Complete => return Err("roll source is exhausted".into()),
    };

    if item.kind == ItemKind::Invalid {
        println!("  {} {}", "No eligible item:".yellow(), item.label);
        return Ok(());
    }
    super::print_item(&item);

    if show_log {
        println!();
        for line in log.lines() {
            println!("{}", line.to_string().dimmed());
        }
    }
    Ok(())
}
