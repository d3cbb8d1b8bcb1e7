//! Use cases - User story orchestration.
//!
//! `encounter` is the generation core: sampling, snapshots, full-table
//! generation and single-entry replacement. `encounter_table` wraps it with
//! ownership checks, persistence, sharing and rolling.

pub mod encounter;
pub mod encounter_table;

// Re-export main types
pub use encounter::EncounterUseCases;
pub use encounter_table::EncounterTableUseCases;
