//! Regenerate every entry of an existing table.

use std::sync::Arc;

use shadowtables_domain::{EncounterTableId, UserId};

use crate::infrastructure::ports::{ClockPort, EncounterTableRepo};
use crate::use_cases::encounter::TableGenerator;

use super::error::EncounterTableError;
use super::{owned_table, TableWithEntries};

/// Replaces the whole entry set using the table's current filters.
///
/// Monsters already on the table are not excluded; a fresh draw may keep
/// some of them. On failure the old entries stay untouched.
pub struct RegenerateEncounterTable {
    tables: Arc<dyn EncounterTableRepo>,
    generator: Arc<TableGenerator>,
    clock: Arc<dyn ClockPort>,
}

impl RegenerateEncounterTable {
    pub fn new(
        tables: Arc<dyn EncounterTableRepo>,
        generator: Arc<TableGenerator>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            tables,
            generator,
            clock,
        }
    }

    pub async fn execute(
        &self,
        owner: UserId,
        table_id: EncounterTableId,
    ) -> Result<TableWithEntries, EncounterTableError> {
        let mut table = owned_table(self.tables.as_ref(), table_id, owner).await?;

        let entries = self
            .generator
            .regenerate(table.id, table.die_size.faces(), &table.filters, Some(owner))
            .await?;
        self.tables.replace_entries(table.id, &entries).await?;

        table.touch(self.clock.now());
        self.tables.save(&table).await?;

        tracing::info!(
            table_id = %table_id,
            entries = entries.len(),
            "Regenerated encounter table"
        );
        Ok(TableWithEntries { table, entries })
    }
}
