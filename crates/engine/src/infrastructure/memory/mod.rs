//! In-memory storage adapters.
//!
//! Back every storage port with `DashMap`s. Nothing survives a restart; the
//! binary and the tests use them in place of a database.

mod encounter_table_repo;
mod monster_repo;

pub use encounter_table_repo::InMemoryEncounterTableRepo;
pub use monster_repo::InMemoryMonsterRepo;
