//! Read a single table with its entries.

use std::sync::Arc;

use shadowtables_domain::{EncounterTableId, PublicSlug, UserId};

use crate::infrastructure::ports::EncounterTableRepo;

use super::error::EncounterTableError;
use super::{visible_table, TableWithEntries};

pub struct GetEncounterTable {
    tables: Arc<dyn EncounterTableRepo>,
}

impl GetEncounterTable {
    pub fn new(tables: Arc<dyn EncounterTableRepo>) -> Self {
        Self { tables }
    }

    /// Public tables are readable by anyone; private ones by their owner.
    pub async fn by_id(
        &self,
        viewer: Option<UserId>,
        table_id: EncounterTableId,
    ) -> Result<TableWithEntries, EncounterTableError> {
        let table = visible_table(self.tables.as_ref(), table_id, viewer).await?;
        let entries = self.tables.get_entries(table_id).await?;
        Ok(TableWithEntries { table, entries })
    }

    /// Look up a shared table by its slug.
    pub async fn by_slug(&self, slug: &str) -> Result<TableWithEntries, EncounterTableError> {
        let not_found = || EncounterTableError::PublicTableNotFound(slug.to_string());
        let slug = PublicSlug::new(slug).map_err(|_| not_found())?;
        let table = self
            .tables
            .get_by_slug(&slug)
            .await?
            .filter(|table| table.is_public())
            .ok_or_else(not_found)?;
        let entries = self.tables.get_entries(table.id).await?;
        Ok(TableWithEntries { table, entries })
    }
}
