use std::io;
use std::path::Path;

use trove_core::{CacheMode, CachedStore, Generated, Generator};
use trove_dice::{ManualRoller, NoopListener, PseudorandomRoller, RollSource, ScriptedRoller};

/// Where the rolls come from.
pub enum RollChoice {
    /// Pseudorandom, optionally seeded.
    Random(Option<u64>),
    /// Prompted on stdin.
    Manual,
    /// Replayed from a comma-separated list.
    Scripted(String),
}

pub fn run(
    tables: &Path,
    keywords: &[String],
    choice: RollChoice,
    cache: CacheMode,
    json: bool,
) -> Result<(), String> {
    let store = super::load_store(tables)?;
    let request = super::parse_request(keywords)?;
    let generator = Generator::new(CachedStore::new(store, cache));

    let mut roller: Box<dyn RollSource> = match choice {
        RollChoice::Random(Some(seed)) => Box::new(PseudorandomRoller::seeded(seed)),
        RollChoice::Random(None) => Box::new(PseudorandomRoller::new()),
        RollChoice::Manual => Box::new(ManualRoller::new(io::stdin().lock(), io::stderr())),
        RollChoice::Scripted(rolls) => {
            Box::new(ScriptedRoller::parse(&rolls).map_err(|e| e.to_string())?)
        }
    };

    let item = match generator
        .generate_request(&request, roller.as_mut(), &mut NoopListener)
        .map_err(|e| e.to_string())?
    {
        Generated::Item(item) => item,
        Generated::Complete => return Err("roll source is exhausted".into()),
    };

    if json {
        let text = serde_json::to_string_pretty(&item).map_err(|e| e.to_string())?;
        println!("{text}");
    } else {
        super::print_item(&item);
    }
    Ok(())
}
