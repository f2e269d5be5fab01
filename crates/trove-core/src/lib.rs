//! Table-driven magic item composition.
//!
//! Items are built by walking nested percentile tables held in a
//! [`TableStore`]. Every decision goes through a
//! [`trove_dice::RollSource`], so the same composers serve random
//! generation, manual rolling, scripted replay and exhaustive enumeration.
//!
//! The entry points are [`Generator::generate_item`] and
//! [`Generator::generate_generic`].

pub mod config;
pub mod error;
pub mod generator;
pub mod item;
pub mod price;
pub mod request;
pub mod special;
pub mod table;
pub mod tier;

pub use config::{GenerateConfig, GenerationMode};
pub use error::{ItemError, ItemResult};
pub use generator::{Generated, Generator};
pub use item::{Item, ItemKind};
pub use price::{EnhancementKind, Price};
pub use request::ItemRequest;
pub use table::{CacheMode, CachedStore, MemoryStore, TableRow, TableStore};
pub use tier::{Degree, Strength, Tier};

#[cfg(test)]
pub(crate) mod testing {
    use crate::table::MemoryStore;

    /// The sample table set shipped with the repository.
    pub fn sample_store() -> MemoryStore {
        MemoryStore::from_json(include_str!("../../../data/sample_tables.json"))
            .expect("sample tables parse")
    }
}
