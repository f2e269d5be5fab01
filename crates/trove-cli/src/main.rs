//! CLI frontend for the Trove magic item generator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trove_core::CacheMode;

use commands::item::RollChoice;

#[derive(Parser)]
#[command(
    name = "trove",
    about = "Trove: table-driven magic item generator",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log every table lookup (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one item, e.g. `trove item greater medium weapon`
    Item {
        /// Degree, strength and kind keywords
        #[arg(required = true)]
        keywords: Vec<String>,

        /// Table data file
        #[arg(short, long)]
        tables: PathBuf,

        /// RNG seed for a reproducible item
        #[arg(short, long, conflicts_with_all = ["manual", "rolls"])]
        seed: Option<u64>,

        /// Prompt for every roll on stdin
        #[arg(short, long, conflicts_with = "rolls")]
        manual: bool,

        /// Replay comma-separated rolls, e.g. `42,7,90`
        #[arg(short, long)]
        rolls: Option<String>,

        /// Table row caching
        #[arg(long, value_enum, default_value = "none")]
        cache: CacheArg,

        /// Print the item as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a random item of any kind worth at least a minimum value
    Generic {
        /// Strength: minor, medium or major
        strength: String,

        /// Table data file
        #[arg(short, long)]
        tables: PathBuf,

        /// Minimum value in gold pieces
        #[arg(long, default_value = "0")]
        min_value: f64,

        /// RNG seed for a reproducible item
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the roll log of the accepted attempt
        #[arg(long)]
        log: bool,
    },

    /// Enumerate every outcome of a request with its frequency
    Enumerate {
        /// Degree, strength and kind keywords
        #[arg(required = true)]
        keywords: Vec<String>,

        /// Table data file
        #[arg(short, long)]
        tables: PathBuf,

        /// Visit every roll instead of skipping within table bands
        #[arg(long)]
        no_skip: bool,

        /// Stop after this many generated items
        #[arg(short, long)]
        limit: Option<u64>,

        /// Print the rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that every table's bands cover 1-100 exactly once
    Check {
        /// Table data file
        #[arg(short, long)]
        tables: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CacheArg {
    None,
    BandScan,
    Materialized,
}

impl From<CacheArg> for CacheMode {
    fn from(arg: CacheArg) -> Self {
        match arg {
            CacheArg::None => CacheMode::None,
            CacheArg::BandScan => CacheMode::BandScan,
            CacheArg::Materialized => CacheMode::Materialized,
        }
    }
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "trove_core=debug,trove_enum=debug,trove_dice=debug,warn"
    } else {
        "trove_core=warn,trove_enum=warn,trove_dice=warn,error"
    }
}

fn init_logging(verbose: bool) {
    let default = default_filter(verbose);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Item {
            keywords,
            tables,
            seed,
            manual,
            rolls,
            cache,
            json,
        } => {
            let choice = match (manual, rolls) {
                (true, _) => RollChoice::Manual,
                (false, Some(rolls)) => RollChoice::Scripted(rolls),
                (false, None) => RollChoice::Random(seed),
            };
            commands::item::run(&tables, &keywords, choice, cache.into(), json)
        }
        Commands::Generic {
            strength,
            tables,
            min_value,
            seed,
            log,
        } => commands::generic::run(&tables, &strength, min_value, seed, log),
        Commands::Enumerate {
            keywords,
            tables,
            no_skip,
            limit,
            json,
        } => commands::enumerate::run(&tables, &keywords, !no_skip, limit, json),
        Commands::Check { tables } => commands::check::run(&tables),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_filter_warns_for_trove_crates() {
        let filter = default_filter(false);
        for target in ["trove_core=warn", "trove_enum=warn", "trove_dice=warn"] {
            assert!(filter.contains(target), "{filter}");
        }
        assert!(EnvFilter::try_new(filter).is_ok());
    }

    #[test]
    fn verbose_filter_debugs_trove_crates() {
        let filter = default_filter(true);
        assert!(filter.contains("trove_enum=debug"));
        assert!(EnvFilter::try_new(filter).is_ok());
    }
}
