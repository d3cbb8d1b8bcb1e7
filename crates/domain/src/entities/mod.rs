//! Domain entities - Core business objects with identity

mod encounter_table;
mod monster;

pub use encounter_table::{check_entry_set, EncounterTable, EncounterTableEntry, TableVisibility};
pub use monster::{Ability, AbilityModifiers, Alignment, Attack, MonsterOrigin, MonsterRecord, Treasure};
