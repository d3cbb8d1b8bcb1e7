//! Shadowtables domain.
//!
//! Monsters as the catalog stores them, encounter tables with their frozen
//! entries, and the filter vocabulary that decides which monsters a table may
//! draw from. No I/O and no randomness live here.

extern crate self as shadowtables_domain;

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    check_entry_set, Ability, AbilityModifiers, Alignment, Attack, EncounterTable,
    EncounterTableEntry, MonsterOrigin, MonsterRecord, TableVisibility, Treasure,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{EncounterTableId, MonsterId, UserId};

// Re-export value objects
pub use value_objects::{
    AbilityScores, DieSize, FilterCriteria, MonsterQuery, MonsterSnapshot, MonsterSource,
    PublicSlug, ResolvedModifiers, TableDescription, TableName, MAX_DIE_SIZE,
    MAX_TABLE_NAME_LENGTH, MIN_DIE_SIZE, PUBLIC_SLUG_ALPHABET, PUBLIC_SLUG_LENGTH,
    SNAPSHOT_SCHEMA_VERSION,
};
