//! The generation entry points.

use tracing::{debug, warn};
use trove_dice::{DiceExpr, Listener, RollLog, RollSource};

use crate::config::GenerateConfig;
use crate::error::{ItemError, ItemResult};
use crate::item::{Compose, Interrupt, Item, ItemKind, Step, composer};
use crate::request::ItemRequest;
use crate::table::{TableStore, names};
use crate::tier::{Degree, Strength, Tier};

/// The outcome of one generation call.
#[derive(Debug, Clone)]
pub enum Generated {
    /// A finished item.
    Item(Item),
    /// The enumerating roll source has visited every combination.
    Complete,
}

impl Generated {
    /// The item, unless enumeration completed.
    pub fn into_item(self) -> Option<Item> {
        match self {
            Self::Item(item) => Some(item),
            Self::Complete => None,
        }
    }
}

/// Composes items from a table store.
#[derive(Debug)]
pub struct Generator<S> {
    store: S,
    config: GenerateConfig,
}

impl<S: TableStore> Generator<S> {
    /// A generator with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, GenerateConfig::default())
    }

    /// A generator with an explicit configuration.
    pub fn with_config(store: S, config: GenerateConfig) -> Self {
        Self { store, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// The underlying table store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generate one item of `kind` at `tier`.
    ///
    /// Returns [`Generated::Complete`] when an enumerating roll source runs
    /// out of combinations. A missing table row is an error.
    pub fn generate_item(
        &self,
        tier: Tier,
        kind: ItemKind,
        roller: &mut dyn RollSource,
        listener: &mut dyn Listener,
    ) -> ItemResult<Generated> {
        self.compose(tier, kind, None, roller, listener)
    }

    /// Generate the item a keyword request describes.
    pub fn generate_request(
        &self,
        request: &ItemRequest,
        roller: &mut dyn RollSource,
        listener: &mut dyn Listener,
    ) -> ItemResult<Generated> {
        self.compose(
            request.tier,
            request.kind,
            request.subtype.as_deref(),
            roller,
            listener,
        )
    }

    /// Generate random items of a random kind at `strength` until one is
    /// worth at least `min_value` gold.
    ///
    /// Each attempt is buffered in `log` and dropped when rejected. After
    /// the configured number of attempts the result is an invalid item.
    pub fn generate_generic(
        &self,
        strength: Strength,
        min_value: f64,
        roller: &mut dyn RollSource,
        listener: &mut dyn Listener,
        log: &mut RollLog,
    ) -> ItemResult<Generated> {
        log.start_session(&format!("generic {strength} item worth at least {min_value} gp"));
        let attempts = self.config.max_generic_attempts;
        for attempt in 1..=attempts {
            log.start_item(&format!("attempt {attempt}"));
            let item = match self.generic_attempt(strength, roller, listener) {
                Ok(Generated::Item(item)) => item,
                Ok(Generated::Complete) => {
                    log.cancel_item();
                    return Ok(Generated::Complete);
                }
                Err(err) => {
                    log.cancel_item();
                    return Err(err);
                }
            };
            log.record(&item.rolls);
            if item.valid && item.price.value().is_some_and(|value| value >= min_value) {
                log.finish_item();
                return Ok(Generated::Item(item));
            }
            debug!(attempt, label = %item.label, price = %item.price, "generic item rejected");
            log.cancel_item();
        }
        warn!(%strength, min_value, attempts, "no generic item reached the minimum value");
        Ok(Generated::Item(Item::invalid(format!(
            "gave up after {attempts} tries"
        ))))
    }

    fn generic_attempt(
        &self,
        strength: Strength,
        roller: &mut dyn RollSource,
        listener: &mut dyn Listener,
    ) -> ItemResult<Generated> {
        let placeholder = Tier::new(Degree::Lesser, strength)?;
        let mut cx = Compose::new(&self.store, roller, listener, &self.config, placeholder);
        let (tier, kind, preset) = match pick_generic(&mut cx, strength) {
            Ok(picked) => picked,
            Err(Interrupt::Complete) => return Ok(Generated::Complete),
            Err(Interrupt::Failed(err)) => return Err(err),
        };
        let mut rolls = cx.rolls;

        let generated = self.compose(tier, kind, preset, roller, listener)?;
        Ok(match generated {
            Generated::Item(mut item) => {
                rolls.extend(item.rolls);
                item.rolls = rolls;
                Generated::Item(item)
            }
            Generated::Complete => Generated::Complete,
        })
    }

    fn compose(
        &self,
        tier: Tier,
        kind: ItemKind,
        preset: Option<&str>,
        roller: &mut dyn RollSource,
        listener: &mut dyn Listener,
    ) -> ItemResult<Generated> {
        let compose = composer(kind)
            .ok_or_else(|| ItemError::InvalidRequest(format!("{kind} items are not composed")))?;
        let mut cx = Compose::new(&self.store, roller, listener, &self.config, tier);
        let draft = match compose(&mut cx, preset) {
            Ok(draft) => draft,
            Err(Interrupt::Complete) => return Ok(Generated::Complete),
            Err(Interrupt::Failed(err)) => return Err(err),
        };
        let item = Item {
            kind,
            tier: Some(cx.tier),
            subtype: draft.subtype,
            label: draft.label,
            price: draft.price,
            valid: draft.valid,
            rolls: cx.rolls,
            details: draft.details,
        };
        debug!(%kind, item = %item, price = %item.price, "item composed");
        Ok(Generated::Item(item))
    }
}

/// Roll the degree and the kind of a generic item.
fn pick_generic(
    cx: &mut Compose<'_>,
    strength: Strength,
) -> Step<(Tier, ItemKind, Option<&'static str>)> {
    let roll = cx.roll(DiceExpr::D100, "degree")?;
    let degree = match roll {
        1..=25 if strength == Strength::Minor => Degree::Least,
        1..=50 => Degree::Lesser,
        _ => Degree::Greater,
    };
    let tier = Tier::new(degree, strength)?;
    let row = cx.lookup(names::ITEM_TYPES, Some(strength.as_str()), "item type")?;
    let (kind, preset) = ItemKind::from_keyword(&row.result)?;
    Ok((tier, kind, preset))
}
