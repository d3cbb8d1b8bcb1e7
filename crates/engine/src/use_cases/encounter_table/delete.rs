//! Delete encounter table use case.

use std::sync::Arc;

use shadowtables_domain::{EncounterTableId, UserId};

use crate::infrastructure::ports::EncounterTableRepo;

use super::error::EncounterTableError;
use super::owned_table;

pub struct DeleteEncounterTable {
    tables: Arc<dyn EncounterTableRepo>,
}

impl DeleteEncounterTable {
    pub fn new(tables: Arc<dyn EncounterTableRepo>) -> Self {
        Self { tables }
    }

    /// Delete a table and its entries. Owner only.
    pub async fn execute(
        &self,
        owner: UserId,
        table_id: EncounterTableId,
    ) -> Result<(), EncounterTableError> {
        owned_table(self.tables.as_ref(), table_id, owner).await?;
        self.tables.delete(table_id).await?;
        tracing::info!(table_id = %table_id, owner_id = %owner, "Deleted encounter table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockEncounterTableRepo;
    use crate::test_fixtures::monsters::fixed_now;
    use crate::test_fixtures::tables::sample_table;

    #[tokio::test]
    async fn owner_deletes_table() {
        let owner = UserId::new();
        let table = sample_table(owner, 6, fixed_now());
        let table_id = table.id;

        let mut tables = MockEncounterTableRepo::new();
        tables
            .expect_get()
            .returning(move |_| Ok(Some(table.clone())));
        tables
            .expect_delete()
            .withf(move |id| *id == table_id)
            .times(1)
            .returning(|_| Ok(()));

        DeleteEncounterTable::new(Arc::new(tables))
            .execute(owner, table_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn stranger_cannot_delete() {
        let table = sample_table(UserId::new(), 6, fixed_now());
        let table_id = table.id;

        let mut tables = MockEncounterTableRepo::new();
        tables
            .expect_get()
            .returning(move |_| Ok(Some(table.clone())));
        tables.expect_delete().never();

        let result = DeleteEncounterTable::new(Arc::new(tables))
            .execute(UserId::new(), table_id)
            .await;
        assert!(matches!(result, Err(EncounterTableError::Forbidden(id)) if id == table_id));
    }

    #[tokio::test]
    async fn missing_table_is_not_found() {
        let mut tables = MockEncounterTableRepo::new();
        tables.expect_get().returning(|_| Ok(None));

        let result = DeleteEncounterTable::new(Arc::new(tables))
            .execute(UserId::new(), EncounterTableId::new())
            .await;
        assert!(matches!(result, Err(EncounterTableError::TableNotFound(_))));
    }
}
