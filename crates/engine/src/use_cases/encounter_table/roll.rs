//! Roll on a table.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shadowtables_domain::{DieSize, EncounterTableEntry, EncounterTableId, UserId};

use crate::infrastructure::ports::{EncounterTableRepo, RandomPort};

use super::error::EncounterTableError;
use super::visible_table;

/// The rolled number and the entry it landed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollResult {
    pub table_id: EncounterTableId,
    pub roll_number: u32,
    pub entry: EncounterTableEntry,
}

/// Uniform roll in `1..=die.faces()`.
pub fn roll_die(random: &dyn RandomPort, die: DieSize) -> u32 {
    let faces = die.faces();
    let max = i32::try_from(faces).unwrap_or(i32::MAX);
    u32::try_from(random.gen_range(1, max))
        .unwrap_or(1)
        .clamp(1, faces)
}

pub struct RollEncounterTable {
    tables: Arc<dyn EncounterTableRepo>,
    random: Arc<dyn RandomPort>,
}

impl RollEncounterTable {
    pub fn new(tables: Arc<dyn EncounterTableRepo>, random: Arc<dyn RandomPort>) -> Self {
        Self { tables, random }
    }

    pub async fn execute(
        &self,
        caller: Option<UserId>,
        table_id: EncounterTableId,
    ) -> Result<RollResult, EncounterTableError> {
        let table = visible_table(self.tables.as_ref(), table_id, caller).await?;
        let roll_number = roll_die(self.random.as_ref(), table.die_size);

        let entry = self
            .tables
            .get_entry(table_id, roll_number)
            .await?
            .ok_or(EncounterTableError::EntryNotFound {
                table_id,
                roll_number,
            })?;

        tracing::debug!(
            table_id = %table_id,
            roll_number,
            monster = %entry.monster_snapshot.name,
            "Rolled on encounter table"
        );
        Ok(RollResult {
            table_id,
            roll_number,
            entry,
        })
    }
}
