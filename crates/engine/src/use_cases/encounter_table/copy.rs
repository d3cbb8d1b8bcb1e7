//! Copy someone else's public table into the caller's collection.

use std::sync::Arc;

use shadowtables_domain::{
    EncounterTable, EncounterTableEntry, PublicSlug, TableName, UserId, MAX_TABLE_NAME_LENGTH,
};

use crate::infrastructure::ports::{ClockPort, EncounterTableRepo};

use super::error::EncounterTableError;
use super::TableWithEntries;

const COPY_SUFFIX: &str = " (Copy)";

/// Name for a copy of `original`, shortened so the suffix always fits.
fn copy_name(original: &TableName) -> Result<TableName, EncounterTableError> {
    let budget = MAX_TABLE_NAME_LENGTH - COPY_SUFFIX.chars().count();
    let base: String = original.as_str().chars().take(budget).collect();
    Ok(TableName::new(format!("{}{}", base.trim_end(), COPY_SUFFIX))?)
}

/// Copies a public table, entries included, as a new private table.
///
/// Entries keep their snapshots; nothing is regenerated. A copy whose entries
/// cannot be stored is deleted again.
pub struct CopyPublicTable {
    tables: Arc<dyn EncounterTableRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CopyPublicTable {
    pub fn new(tables: Arc<dyn EncounterTableRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { tables, clock }
    }

    pub async fn execute(
        &self,
        caller: UserId,
        slug: &str,
    ) -> Result<TableWithEntries, EncounterTableError> {
        let not_found = || EncounterTableError::PublicTableNotFound(slug.to_string());
        let public_slug = PublicSlug::new(slug).map_err(|_| not_found())?;
        let source = self
            .tables
            .get_by_slug(&public_slug)
            .await?
            .filter(|table| table.is_public())
            .ok_or_else(not_found)?;

        if source.is_owned_by(caller) {
            return Err(EncounterTableError::CopyOwnTable(source.id));
        }
        let source_entries = self.tables.get_entries(source.id).await?;
        if source_entries.is_empty() {
            return Err(EncounterTableError::NothingToCopy(source.id));
        }

        let mut table = EncounterTable::new(
            caller,
            copy_name(&source.name)?,
            source.die_size,
            source.filters.clone(),
            self.clock.now(),
        );
        table.description = source.description.clone();
        self.tables.save(&table).await?;

        let entries: Vec<EncounterTableEntry> = source_entries
            .into_iter()
            .map(|entry| EncounterTableEntry {
                table_id: table.id,
                ..entry
            })
            .collect();
        if let Err(e) = self.tables.replace_entries(table.id, &entries).await {
            tracing::warn!(table_id = %table.id, error = %e, "Copying entries failed, deleting copy");
            if let Err(delete_err) = self.tables.delete(table.id).await {
                tracing::error!(
                    table_id = %table.id,
                    error = %delete_err,
                    "Failed to delete incomplete copy"
                );
            }
            return Err(e.into());
        }

        tracing::info!(
            source_id = %source.id,
            table_id = %table.id,
            owner_id = %caller,
            "Copied public encounter table"
        );
        Ok(TableWithEntries { table, entries })
    }
}
