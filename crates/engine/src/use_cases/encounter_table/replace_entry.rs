//! Replace the monster at one roll position.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shadowtables_domain::{EncounterTableEntry, EncounterTableId, MonsterId, UserId};

use crate::infrastructure::ports::{ClockPort, EncounterTableRepo};
use crate::use_cases::encounter::EntryReplacer;

use super::error::EncounterTableError;
use super::owned_table;

/// How the replacement monster is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "monster_id", rename_all = "snake_case")]
pub enum ReplaceMode {
    /// Draw from the table's filters
    Random,
    /// Use this monster regardless of filters
    Explicit(MonsterId),
}

impl ReplaceMode {
    fn explicit_id(self) -> Option<MonsterId> {
        match self {
            Self::Random => None,
            Self::Explicit(id) => Some(id),
        }
    }
}

pub struct ReplaceTableEntry {
    tables: Arc<dyn EncounterTableRepo>,
    replacer: Arc<EntryReplacer>,
    clock: Arc<dyn ClockPort>,
}

impl ReplaceTableEntry {
    pub fn new(
        tables: Arc<dyn EncounterTableRepo>,
        replacer: Arc<EntryReplacer>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            tables,
            replacer,
            clock,
        }
    }

    /// Swap the entry at `roll_number`, leaving every other entry as is.
    pub async fn execute(
        &self,
        owner: UserId,
        table_id: EncounterTableId,
        roll_number: u32,
        mode: ReplaceMode,
    ) -> Result<EncounterTableEntry, EncounterTableError> {
        let mut table = owned_table(self.tables.as_ref(), table_id, owner).await?;
        if !table.die_size.contains(roll_number) {
            return Err(EncounterTableError::RollOutOfRange {
                roll_number,
                die_size: table.die_size.faces(),
            });
        }

        let entries = self.tables.get_entries(table_id).await?;
        if !entries.iter().any(|e| e.roll_number == roll_number) {
            return Err(EncounterTableError::EntryNotFound {
                table_id,
                roll_number,
            });
        }
        // The outgoing monster may come back; every other one may not.
        let current_ids: BTreeSet<MonsterId> = entries
            .iter()
            .filter(|e| e.roll_number != roll_number)
            .filter_map(|e| e.monster_id)
            .collect();

        let entry = self
            .replacer
            .replace(
                table_id,
                roll_number,
                &table.filters,
                &current_ids,
                mode.explicit_id(),
                Some(owner),
            )
            .await?;
        self.tables.save_entry(&entry).await?;

        table.touch(self.clock.now());
        self.tables.save(&table).await?;

        tracing::info!(
            table_id = %table_id,
            roll_number,
            monster_id = ?entry.monster_id,
            "Replaced encounter table entry"
        );
        Ok(entry)
    }
}
