//! In-memory encounter table storage.

use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::DashMap;
use shadowtables_domain::{
    check_entry_set, EncounterTable, EncounterTableEntry, EncounterTableId, PublicSlug, UserId,
};

use crate::infrastructure::ports::{EncounterTableRepo, RepoError};

/// Tables and their entries, keyed by table id.
///
/// Enforces the same constraints a relational schema would: entries need an
/// existing table, roll numbers stay within the die, and a monster appears
/// at most once per table.
#[derive(Default)]
pub struct InMemoryEncounterTableRepo {
    tables: DashMap<EncounterTableId, EncounterTable>,
    entries: DashMap<EncounterTableId, BTreeMap<u32, EncounterTableEntry>>,
}

impl InMemoryEncounterTableRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    fn require_table(&self, table_id: EncounterTableId) -> Result<EncounterTable, RepoError> {
        self.tables
            .get(&table_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| RepoError::not_found("EncounterTable", table_id))
    }
}

#[async_trait]
impl EncounterTableRepo for InMemoryEncounterTableRepo {
    async fn get(&self, id: EncounterTableId) -> Result<Option<EncounterTable>, RepoError> {
        Ok(self.tables.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, table: &EncounterTable) -> Result<(), RepoError> {
        if let Some(slug) = table.public_slug() {
            let taken = self
                .tables
                .iter()
                .any(|other| other.key() != &table.id && other.public_slug() == Some(slug));
            if taken {
                return Err(RepoError::constraint(format!(
                    "Public slug {} is already in use",
                    slug
                )));
            }
        }
        self.tables.insert(table.id, table.clone());
        Ok(())
    }

    async fn delete(&self, id: EncounterTableId) -> Result<(), RepoError> {
        self.entries.remove(&id);
        self.tables.remove(&id);
        Ok(())
    }

    async fn list_for_owner(
        &self,
        owner_id: UserId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<EncounterTable>, RepoError> {
        let mut tables: Vec<EncounterTable> = self
            .tables
            .iter()
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect();
        tables.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(tables
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_for_owner(&self, owner_id: UserId) -> Result<u64, RepoError> {
        Ok(self
            .tables
            .iter()
            .filter(|entry| entry.owner_id == owner_id)
            .count() as u64)
    }

    async fn get_by_slug(&self, slug: &PublicSlug) -> Result<Option<EncounterTable>, RepoError> {
        Ok(self
            .tables
            .iter()
            .find(|entry| entry.public_slug() == Some(slug))
            .map(|entry| entry.value().clone()))
    }

    async fn slug_exists(&self, slug: &PublicSlug) -> Result<bool, RepoError> {
        Ok(self
            .tables
            .iter()
            .any(|entry| entry.public_slug() == Some(slug)))
    }

    async fn get_entries(
        &self,
        table_id: EncounterTableId,
    ) -> Result<Vec<EncounterTableEntry>, RepoError> {
        Ok(self
            .entries
            .get(&table_id)
            .map(|rolls| rolls.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_entry(
        &self,
        table_id: EncounterTableId,
        roll_number: u32,
    ) -> Result<Option<EncounterTableEntry>, RepoError> {
        Ok(self
            .entries
            .get(&table_id)
            .and_then(|rolls| rolls.get(&roll_number).cloned()))
    }

    async fn replace_entries(
        &self,
        table_id: EncounterTableId,
        entries: &[EncounterTableEntry],
    ) -> Result<(), RepoError> {
        let table = self.require_table(table_id)?;
        check_entry_set(table_id, table.die_size, entries)?;

        let rolls = entries
            .iter()
            .map(|entry| (entry.roll_number, entry.clone()))
            .collect();
        self.entries.insert(table_id, rolls);
        Ok(())
    }

    async fn save_entry(&self, entry: &EncounterTableEntry) -> Result<(), RepoError> {
        let table = self.require_table(entry.table_id)?;
        if !table.die_size.contains(entry.roll_number) {
            return Err(RepoError::constraint(format!(
                "Roll {} is outside {}",
                entry.roll_number, table.die_size
            )));
        }

        let mut rolls = self.entries.entry(entry.table_id).or_default();
        if let Some(monster_id) = entry.monster_id {
            let clash = rolls
                .values()
                .any(|other| other.roll_number != entry.roll_number && other.monster_id == Some(monster_id));
            if clash {
                return Err(RepoError::constraint(format!(
                    "Monster {} is already on table {}",
                    monster_id, entry.table_id
                )));
            }
        }
        rolls.insert(entry.roll_number, entry.clone());
        Ok(())
    }
}
