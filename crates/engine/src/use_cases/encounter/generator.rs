//! Full-table generation.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use shadowtables_domain::{
    DieSize, EncounterTableEntry, EncounterTableId, FilterCriteria, MonsterId, UserId,
};

use super::error::EncounterError;
use super::sampler::PoolSampler;
use super::snapshot::SnapshotBuilder;

/// Fills every roll position of a table with a distinct monster.
pub struct TableGenerator {
    sampler: Arc<PoolSampler>,
    snapshots: SnapshotBuilder,
}

impl TableGenerator {
    pub fn new(sampler: Arc<PoolSampler>) -> Self {
        Self {
            sampler,
            snapshots: SnapshotBuilder::new(),
        }
    }

    /// Build `die_size` entries with roll numbers `1..=die_size`.
    ///
    /// Entries follow the sampler's shuffled order, so the roll a monster
    /// lands on is as random as which monsters were picked.
    pub async fn generate(
        &self,
        table_id: EncounterTableId,
        die_size: u32,
        filter: &FilterCriteria,
        exclude_ids: &BTreeSet<MonsterId>,
        caller: Option<UserId>,
    ) -> Result<Vec<EncounterTableEntry>, EncounterError> {
        let die = DieSize::new(die_size).map_err(|_| EncounterError::InvalidDieSize(die_size))?;
        let count = die.faces() as usize;

        let records = self
            .sampler
            .sample(filter, count, exclude_ids, caller)
            .await?;

        let mut seen = HashSet::with_capacity(records.len());
        if let Some(duplicate) = records.iter().find(|r| !seen.insert(r.id)) {
            tracing::error!(
                table_id = %table_id,
                die_size,
                monster_id = %duplicate.id,
                "Sampled monster set contains a duplicate"
            );
            return Err(EncounterError::InternalConsistency(format!(
                "monster {} sampled twice for table {}",
                duplicate.id, table_id
            )));
        }
        if records.len() != count {
            tracing::error!(
                table_id = %table_id,
                die_size,
                sampled = records.len(),
                "Sampler returned the wrong number of monsters"
            );
            return Err(EncounterError::InternalConsistency(format!(
                "expected {} monsters for table {}, got {}",
                count,
                table_id,
                records.len()
            )));
        }

        let entries: Vec<EncounterTableEntry> = die
            .roll_numbers()
            .zip(self.snapshots.snapshot_many(&records))
            .map(|(roll, snapshot)| EncounterTableEntry::new(table_id, roll, snapshot))
            .collect();

        tracing::debug!(table_id = %table_id, die_size, "Generated encounter entries");
        Ok(entries)
    }

    /// Replacement entry set for the whole table. No exclusions apply.
    pub async fn regenerate(
        &self,
        table_id: EncounterTableId,
        die_size: u32,
        filter: &FilterCriteria,
        caller: Option<UserId>,
    ) -> Result<Vec<EncounterTableEntry>, EncounterError> {
        self.generate(table_id, die_size, filter, &BTreeSet::new(), caller)
            .await
    }
}
