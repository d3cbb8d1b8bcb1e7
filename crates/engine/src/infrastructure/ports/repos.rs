//! Repository port traits for storage access.

use std::collections::BTreeSet;

use async_trait::async_trait;
use shadowtables_domain::{
    EncounterTable, EncounterTableEntry, EncounterTableId, MonsterId, MonsterQuery,
    MonsterRecord, PublicSlug, UserId,
};

use super::error::RepoError;

// =============================================================================
// Monster Catalog
// =============================================================================

/// Read access to the monster catalog.
///
/// Implementations must select exactly the records `MonsterQuery::matches`
/// accepts. `count` and `fetch` are separate reads; the engine tolerates the
/// catalog changing between them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MonsterRepo: Send + Sync {
    /// Number of monsters matching the query.
    async fn count(&self, query: &MonsterQuery) -> Result<usize, RepoError>;

    /// Up to `limit` matching monsters drawn at random from the whole
    /// matching set, as `ORDER BY random() LIMIT n` would. A fixed prefix
    /// (first rows by name, id or insertion) is not acceptable: it would make
    /// most of a large pool unreachable.
    async fn fetch(
        &self,
        query: &MonsterQuery,
        limit: usize,
    ) -> Result<Vec<MonsterRecord>, RepoError>;

    async fn fetch_by_id(&self, id: MonsterId) -> Result<Option<MonsterRecord>, RepoError>;

    /// Monsters the user has favorited.
    async fn list_favorite_ids(&self, user_id: UserId) -> Result<BTreeSet<MonsterId>, RepoError>;
}

// =============================================================================
// Encounter Table Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EncounterTableRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: EncounterTableId) -> Result<Option<EncounterTable>, RepoError>;
    async fn save(&self, table: &EncounterTable) -> Result<(), RepoError>;
    /// Deletes the table and all of its entries.
    async fn delete(&self, id: EncounterTableId) -> Result<(), RepoError>;

    // Queries
    /// Tables owned by `owner_id`, newest first.
    async fn list_for_owner(
        &self,
        owner_id: UserId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<EncounterTable>, RepoError>;
    async fn count_for_owner(&self, owner_id: UserId) -> Result<u64, RepoError>;
    async fn get_by_slug(&self, slug: &PublicSlug) -> Result<Option<EncounterTable>, RepoError>;
    async fn slug_exists(&self, slug: &PublicSlug) -> Result<bool, RepoError>;

    // Entries
    /// All entries of a table ordered by roll number.
    async fn get_entries(
        &self,
        table_id: EncounterTableId,
    ) -> Result<Vec<EncounterTableEntry>, RepoError>;
    async fn get_entry(
        &self,
        table_id: EncounterTableId,
        roll_number: u32,
    ) -> Result<Option<EncounterTableEntry>, RepoError>;
    /// Discard every existing entry of the table and store `entries` instead.
    async fn replace_entries(
        &self,
        table_id: EncounterTableId,
        entries: &[EncounterTableEntry],
    ) -> Result<(), RepoError>;
    /// Insert or overwrite the entry at `entry.roll_number`.
    async fn save_entry(&self, entry: &EncounterTableEntry) -> Result<(), RepoError>;
}
