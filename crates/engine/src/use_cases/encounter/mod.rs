//! Encounter generation core.
//!
//! Sampling, snapshotting, full-table generation and single-entry
//! replacement. Nothing here persists anything; the lifecycle use cases in
//! `encounter_table` decide what gets stored.

mod error;
mod generator;
mod replacer;
mod sampler;
mod snapshot;

use std::sync::Arc;

pub use error::EncounterError;
pub use generator::TableGenerator;
pub use replacer::EntryReplacer;
pub use sampler::{shuffle, PoolSampler, DEFAULT_FETCH_OVERSAMPLE};
pub use snapshot::{ability_score, SnapshotBuilder};

use crate::infrastructure::ports::{MonsterRepo, RandomPort};

/// Container for the generation core.
pub struct EncounterUseCases {
    pub sampler: Arc<PoolSampler>,
    pub snapshots: SnapshotBuilder,
    pub generator: Arc<TableGenerator>,
    pub replacer: Arc<EntryReplacer>,
}

impl EncounterUseCases {
    pub fn new(
        monsters: Arc<dyn MonsterRepo>,
        random: Arc<dyn RandomPort>,
        fetch_oversample: usize,
    ) -> Self {
        let sampler =
            Arc::new(PoolSampler::new(monsters.clone(), random).with_oversample(fetch_oversample));
        Self {
            snapshots: SnapshotBuilder::new(),
            generator: Arc::new(TableGenerator::new(sampler.clone())),
            replacer: Arc::new(EntryReplacer::new(sampler.clone(), monsters)),
            sampler,
        }
    }
}
