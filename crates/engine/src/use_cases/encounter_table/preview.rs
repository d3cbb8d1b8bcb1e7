//! Preview use case.
//!
//! Generates entries under a throwaway table id without storing anything, so
//! a caller can try filters before committing to a table.

use std::collections::BTreeSet;
use std::sync::Arc;

use shadowtables_domain::{EncounterTableEntry, EncounterTableId, FilterCriteria, UserId};

use crate::use_cases::encounter::TableGenerator;

use super::error::EncounterTableError;

pub struct PreviewEncounterTable {
    generator: Arc<TableGenerator>,
}

impl PreviewEncounterTable {
    pub fn new(generator: Arc<TableGenerator>) -> Self {
        Self { generator }
    }

    /// Anonymous callers may preview unless the filter needs their identity.
    pub async fn execute(
        &self,
        caller: Option<UserId>,
        die_size: u32,
        filters: &FilterCriteria,
    ) -> Result<Vec<EncounterTableEntry>, EncounterTableError> {
        let preview_id = EncounterTableId::new();
        let entries = self
            .generator
            .generate(preview_id, die_size, filters, &BTreeSet::new(), caller)
            .await?;
        tracing::debug!(preview_id = %preview_id, die_size, "Generated table preview");
        Ok(entries)
    }
}
