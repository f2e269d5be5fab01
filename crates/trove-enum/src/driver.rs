use tracing::{debug, info, warn};
use trove_core::{
    GenerateConfig, Generated, Generator, ItemError, ItemRequest, ItemResult, TableStore,
};

use crate::config::EnumerateConfig;
use crate::roller::EnumeratingRoller;
use crate::skip::SkipOptimizer;
use crate::tally::Tally;

/// The result of an enumeration run.
#[derive(Debug, Clone)]
pub struct Enumeration {
    /// Aggregated outcomes.
    pub tally: Tally,
    /// Distinct items generated, before weighting.
    pub items: u64,
    /// Leaves that hit a roll no table row covers. Each is logged and left
    /// out of the tally.
    pub failed: u64,
    /// False when the run stopped at the configured limit.
    pub complete: bool,
}

/// Generates every reachable item for a request.
///
/// Composers run in enumeration mode, so a disqualified special ability
/// marks the item invalid instead of consuming extra rolls.
#[derive(Debug)]
pub struct Enumerator<S> {
    generator: Generator<S>,
    config: EnumerateConfig,
}

impl<S: TableStore> Enumerator<S> {
    /// An enumerator with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, EnumerateConfig::default())
    }

    /// An enumerator with an explicit configuration.
    pub fn with_config(store: S, config: EnumerateConfig) -> Self {
        Self {
            generator: Generator::with_config(store, GenerateConfig::enumeration()),
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &EnumerateConfig {
        &self.config
    }

    /// Enumerate every item `request` can produce.
    pub fn run(&self, request: &ItemRequest) -> ItemResult<Enumeration> {
        let mut roller = EnumeratingRoller::new();
        let mut optimizer = SkipOptimizer::new();
        let mut tally = Tally::new();
        let mut items = 0u64;
        let mut failed = 0u64;
        let mut complete = true;

        loop {
            if self.config.limit.is_some_and(|limit| items >= limit) {
                complete = false;
                break;
            }
            optimizer.clear();
            let item = match self
                .generator
                .generate_request(request, &mut roller, &mut optimizer)
            {
                Ok(Generated::Item(item)) => item,
                Ok(Generated::Complete) => break,
                Err(err @ ItemError::MissingRow { .. }) => {
                    if roller.finish_item() {
                        warn!(error = %err, rolls = ?roller.last_item(), "leaf failed");
                        failed += 1;
                    }
                    continue;
                }
                Err(err) => return Err(err),
            };
            if !roller.finish_item() {
                continue;
            }
            // Bands are only reported for d100 lookups, so jumped digits
            // are uniform and the weight scales the chance linearly.
            let probability = roller.last_item_probability();
            let weight = if self.config.skip {
                optimizer.apply(&mut roller)
            } else {
                1
            };
            let probability = probability * weight as f64;
            debug!(item = %item, weight, rolls = %item.rolls, "enumerated");
            tally.add(&item, weight, probability);
            items += 1;
        }

        info!(
            tier = %request.tier,
            kind = %request.kind,
            items,
            failed,
            outcomes = tally.len(),
            leaves = tally.total(),
            complete,
            "enumeration finished"
        );
        Ok(Enumeration {
            tally,
            items,
            failed,
            complete,
        })
    }
}
