//! Create encounter table use case.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shadowtables_domain::{
    DieSize, EncounterTable, FilterCriteria, TableDescription, TableName, UserId,
};

use crate::infrastructure::ports::{ClockPort, EncounterTableRepo};
use crate::use_cases::encounter::{EncounterError, TableGenerator};

use super::error::EncounterTableError;
use super::naming::TableNameGenerator;
use super::TableWithEntries;

fn default_generate_immediately() -> bool {
    true
}

/// Input for creating a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableInput {
    /// Generated when absent
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub die_size: u32,
    pub filters: FilterCriteria,
    #[serde(default = "default_generate_immediately")]
    pub generate_immediately: bool,
}

impl CreateTableInput {
    pub fn new(die_size: u32, filters: FilterCriteria) -> Self {
        Self {
            name: None,
            description: None,
            die_size,
            filters,
            generate_immediately: default_generate_immediately(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn without_generation(mut self) -> Self {
        self.generate_immediately = false;
        self
    }
}

/// Create encounter table use case.
///
/// Orchestrates: input validation, table persistence, optional immediate
/// generation. A table whose generation fails is deleted again so no
/// half-built table is left behind.
pub struct CreateEncounterTable {
    tables: Arc<dyn EncounterTableRepo>,
    generator: Arc<TableGenerator>,
    names: Arc<TableNameGenerator>,
    clock: Arc<dyn ClockPort>,
}

impl CreateEncounterTable {
    pub fn new(
        tables: Arc<dyn EncounterTableRepo>,
        generator: Arc<TableGenerator>,
        names: Arc<TableNameGenerator>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            tables,
            generator,
            names,
            clock,
        }
    }

    pub async fn execute(
        &self,
        owner: UserId,
        input: CreateTableInput,
    ) -> Result<TableWithEntries, EncounterTableError> {
        let name = match input.name {
            Some(name) => TableName::new(name)?,
            None => self.names.generate()?,
        };
        let description = input
            .description
            .map(TableDescription::new)
            .transpose()?
            .filter(|d| !d.is_empty());
        let die_size = DieSize::new(input.die_size)
            .map_err(|_| EncounterError::InvalidDieSize(input.die_size))?;
        input
            .filters
            .validate()
            .map_err(EncounterError::InvalidFilter)?;

        let mut table = EncounterTable::new(owner, name, die_size, input.filters, self.clock.now());
        if let Some(description) = description {
            table = table.with_description(description);
        }
        self.tables.save(&table).await?;

        tracing::info!(
            table_id = %table.id,
            owner_id = %owner,
            die_size = die_size.faces(),
            "Created encounter table"
        );

        if !input.generate_immediately {
            return Ok(TableWithEntries {
                table,
                entries: Vec::new(),
            });
        }

        let generated = self
            .generator
            .generate(
                table.id,
                die_size.faces(),
                &table.filters,
                &BTreeSet::new(),
                Some(owner),
            )
            .await
            .map_err(EncounterTableError::from);
        let stored = match generated {
            Ok(entries) => self
                .tables
                .replace_entries(table.id, &entries)
                .await
                .map(|_| entries)
                .map_err(EncounterTableError::from),
            Err(e) => Err(e),
        };

        match stored {
            Ok(entries) => Ok(TableWithEntries { table, entries }),
            Err(e) => {
                self.rollback(&table).await;
                Err(e)
            }
        }
    }

    async fn rollback(&self, table: &EncounterTable) {
        tracing::warn!(table_id = %table.id, "Generation failed, deleting new table");
        if let Err(e) = self.tables.delete(table.id).await {
            tracing::error!(
                table_id = %table.id,
                error = %e,
                "Failed to delete table after generation failure"
            );
        }
    }
}
