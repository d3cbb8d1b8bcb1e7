//! Encounter table entity - A die-indexed list of frozen monsters
//!
//! An encounter table owns `die_size` entries, one per roll number. Entries
//! hold a `MonsterSnapshot`, so edits to the catalog never leak into a table
//! after it was generated.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{EncounterTableId, MonsterId, UserId};
use crate::value_objects::{
    DieSize, FilterCriteria, MonsterSnapshot, PublicSlug, TableDescription, TableName,
};

/// Who can see and roll on a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableVisibility {
    /// Only the owner
    Private,
    /// Anyone holding the slug
    Public { slug: PublicSlug },
}

/// A random-encounter roll table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterTable {
    pub id: EncounterTableId,
    pub owner_id: UserId,
    pub name: TableName,
    pub description: Option<TableDescription>,
    pub die_size: DieSize,
    /// Filters used for generation; reused by regeneration and replacement
    pub filters: FilterCriteria,
    pub visibility: TableVisibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EncounterTable {
    pub fn new(
        owner_id: UserId,
        name: TableName,
        die_size: DieSize,
        filters: FilterCriteria,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EncounterTableId::new(),
            owner_id,
            name,
            description: None,
            die_size,
            filters,
            visibility: TableVisibility::Private,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: EncounterTableId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: TableDescription) -> Self {
        self.description = Some(description);
        self
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    pub fn is_public(&self) -> bool {
        matches!(self.visibility, TableVisibility::Public { .. })
    }

    pub fn public_slug(&self) -> Option<&PublicSlug> {
        match &self.visibility {
            TableVisibility::Public { slug } => Some(slug),
            TableVisibility::Private => None,
        }
    }

    /// Whether `viewer` may read and roll on this table.
    pub fn is_visible_to(&self, viewer: Option<UserId>) -> bool {
        self.is_public() || viewer.is_some_and(|user| self.is_owned_by(user))
    }

    pub fn make_public(&mut self, slug: PublicSlug, now: DateTime<Utc>) {
        self.visibility = TableVisibility::Public { slug };
        self.updated_at = now;
    }

    pub fn make_private(&mut self, now: DateTime<Utc>) {
        self.visibility = TableVisibility::Private;
        self.updated_at = now;
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// One roll position of an encounter table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterTableEntry {
    pub table_id: EncounterTableId,
    /// 1-indexed roll position
    pub roll_number: u32,
    /// Weak reference to the catalog; may dangle once the monster is deleted
    pub monster_id: Option<MonsterId>,
    pub monster_snapshot: MonsterSnapshot,
}

impl EncounterTableEntry {
    pub fn new(table_id: EncounterTableId, roll_number: u32, snapshot: MonsterSnapshot) -> Self {
        Self {
            table_id,
            roll_number,
            monster_id: Some(snapshot.id),
            monster_snapshot: snapshot,
        }
    }
}

/// Check the invariants of a complete entry set for one table.
///
/// # Errors
///
/// Returns `DomainError::Validation` if:
/// - The entry count differs from the die size
/// - Roll numbers are not exactly `1..=die_size`
/// - Any entry belongs to another table
/// - Two entries reference the same monster
pub fn check_entry_set(
    table_id: EncounterTableId,
    die_size: DieSize,
    entries: &[EncounterTableEntry],
) -> Result<(), DomainError> {
    if entries.len() != die_size.faces() as usize {
        return Err(DomainError::validation(format!(
            "Expected {} entries but found {}",
            die_size.faces(),
            entries.len()
        )));
    }

    let mut rolls = HashSet::with_capacity(entries.len());
    let mut monsters = HashSet::with_capacity(entries.len());
    for entry in entries {
        if entry.table_id != table_id {
            return Err(DomainError::validation(format!(
                "Entry {} belongs to table {}",
                entry.roll_number, entry.table_id
            )));
        }
        if !die_size.contains(entry.roll_number) || !rolls.insert(entry.roll_number) {
            return Err(DomainError::validation(format!(
                "Roll number {} is out of range or repeated",
                entry.roll_number
            )));
        }
        if let Some(monster_id) = entry.monster_id {
            if !monsters.insert(monster_id) {
                return Err(DomainError::validation(format!(
                    "Monster {} appears more than once",
                    monster_id
                )));
            }
        }
    }
    Ok(())
}
