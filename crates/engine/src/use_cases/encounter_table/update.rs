//! Update table settings.
//!
//! Changing filters does not touch existing entries; the owner regenerates
//! explicitly when they want the new filters applied.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shadowtables_domain::{
    EncounterTable, EncounterTableId, FilterCriteria, TableDescription, TableName, UserId,
};

use crate::infrastructure::ports::{ClockPort, EncounterTableRepo};
use crate::use_cases::encounter::EncounterError;

use super::error::EncounterTableError;
use super::owned_table;

/// Fields to change. `None` leaves a field as it is; an empty description
/// clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub filters: Option<FilterCriteria>,
}

pub struct UpdateEncounterTable {
    tables: Arc<dyn EncounterTableRepo>,
    clock: Arc<dyn ClockPort>,
}

impl UpdateEncounterTable {
    pub fn new(tables: Arc<dyn EncounterTableRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { tables, clock }
    }

    pub async fn execute(
        &self,
        owner: UserId,
        table_id: EncounterTableId,
        update: TableUpdate,
    ) -> Result<EncounterTable, EncounterTableError> {
        let name = update.name.map(TableName::new).transpose()?;
        let description = update.description.map(TableDescription::new).transpose()?;
        if let Some(filters) = &update.filters {
            filters.validate().map_err(EncounterError::InvalidFilter)?;
        }

        let mut table = owned_table(self.tables.as_ref(), table_id, owner).await?;
        if let Some(name) = name {
            table.name = name;
        }
        if let Some(description) = description {
            table.description = Some(description).filter(|d| !d.is_empty());
        }
        if let Some(filters) = update.filters {
            table.filters = filters;
        }
        table.touch(self.clock.now());
        self.tables.save(&table).await?;

        tracing::info!(table_id = %table_id, "Updated encounter table");
        Ok(table)
    }
}
