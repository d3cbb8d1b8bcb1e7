//! Encounter table lifecycle use cases.
//!
//! Ownership checks, persistence and rollback around the generation core.
//! Private tables are visible to their owner only; public tables can be read
//! and rolled by anyone, including anonymous callers.

mod copy;
mod create;
mod delete;
mod error;
mod get;
mod list;
mod naming;
mod preview;
mod regenerate;
mod replace_entry;
mod roll;
mod share;
mod slug;
mod update;

use serde::{Deserialize, Serialize};
use shadowtables_domain::{
    EncounterTable, EncounterTableEntry, EncounterTableId, MonsterId, UserId,
};

use crate::infrastructure::ports::EncounterTableRepo;

pub use copy::CopyPublicTable;
pub use create::{CreateEncounterTable, CreateTableInput};
pub use delete::DeleteEncounterTable;
pub use error::EncounterTableError;
pub use get::GetEncounterTable;
pub use list::{ListEncounterTables, TablePage, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use naming::TableNameGenerator;
pub use preview::PreviewEncounterTable;
pub use regenerate::RegenerateEncounterTable;
pub use replace_entry::{ReplaceMode, ReplaceTableEntry};
pub use roll::{roll_die, RollEncounterTable, RollResult};
pub use share::{ShareEncounterTable, ShareResult};
pub use slug::{random_slug, SlugGenerator, DEFAULT_SLUG_ATTEMPTS};
pub use update::{TableUpdate, UpdateEncounterTable};

/// A table together with its entries ordered by roll number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableWithEntries {
    pub table: EncounterTable,
    pub entries: Vec<EncounterTableEntry>,
}

impl TableWithEntries {
    /// Monster IDs currently on the table.
    pub fn monster_ids(&self) -> impl Iterator<Item = MonsterId> + '_ {
        self.entries.iter().filter_map(|entry| entry.monster_id)
    }
}

/// Container for encounter table use cases.
pub struct EncounterTableUseCases {
    pub create: CreateEncounterTable,
    pub preview: PreviewEncounterTable,
    pub get: GetEncounterTable,
    pub list: ListEncounterTables,
    pub update: UpdateEncounterTable,
    pub regenerate: RegenerateEncounterTable,
    pub replace_entry: ReplaceTableEntry,
    pub roll: RollEncounterTable,
    pub share: ShareEncounterTable,
    pub copy: CopyPublicTable,
    pub delete: DeleteEncounterTable,
}

impl EncounterTableUseCases {
    pub fn new(
        create: CreateEncounterTable,
        preview: PreviewEncounterTable,
        get: GetEncounterTable,
        list: ListEncounterTables,
        update: UpdateEncounterTable,
        regenerate: RegenerateEncounterTable,
        replace_entry: ReplaceTableEntry,
        roll: RollEncounterTable,
        share: ShareEncounterTable,
        copy: CopyPublicTable,
        delete: DeleteEncounterTable,
    ) -> Self {
        Self {
            create,
            preview,
            get,
            list,
            update,
            regenerate,
            replace_entry,
            roll,
            share,
            copy,
            delete,
        }
    }
}

/// Load a table the caller must own.
async fn owned_table(
    tables: &dyn EncounterTableRepo,
    table_id: EncounterTableId,
    owner: UserId,
) -> Result<EncounterTable, EncounterTableError> {
    let table = tables
        .get(table_id)
        .await?
        .ok_or(EncounterTableError::TableNotFound(table_id))?;
    if !table.is_owned_by(owner) {
        return Err(EncounterTableError::Forbidden(table_id));
    }
    Ok(table)
}

/// Load a table the caller may read.
async fn visible_table(
    tables: &dyn EncounterTableRepo,
    table_id: EncounterTableId,
    viewer: Option<UserId>,
) -> Result<EncounterTable, EncounterTableError> {
    let table = tables
        .get(table_id)
        .await?
        .ok_or(EncounterTableError::TableNotFound(table_id))?;
    if !table.is_visible_to(viewer) {
        return Err(EncounterTableError::Forbidden(table_id));
    }
    Ok(table)
}
