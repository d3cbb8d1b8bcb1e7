//! List the caller's tables, newest first.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shadowtables_domain::{DomainError, EncounterTable, UserId};

use crate::infrastructure::ports::EncounterTableRepo;

use super::error::EncounterTableError;

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// One page of tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePage {
    pub tables: Vec<EncounterTable>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

pub struct ListEncounterTables {
    tables: Arc<dyn EncounterTableRepo>,
}

impl ListEncounterTables {
    pub fn new(tables: Arc<dyn EncounterTableRepo>) -> Self {
        Self { tables }
    }

    /// `page` starts at 1; `limit` defaults to 20 and may not exceed 100.
    pub async fn execute(
        &self,
        owner: UserId,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<TablePage, EncounterTableError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if page < 1 {
            return Err(DomainError::validation("Page must be at least 1").into());
        }
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(DomainError::validation(format!(
                "Limit must be between 1 and {}",
                MAX_PAGE_LIMIT
            ))
            .into());
        }

        let offset = (page - 1).saturating_mul(limit);
        let tables = self.tables.list_for_owner(owner, limit, offset).await?;
        let total = self.tables.count_for_owner(owner).await?;

        Ok(TablePage {
            tables,
            page,
            limit,
            total,
            total_pages: total.div_ceil(u64::from(limit)),
        })
    }
}
