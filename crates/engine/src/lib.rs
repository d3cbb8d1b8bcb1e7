//! Shadowtables Engine library.
//!
//! Builds dice-indexed random encounter tables from a monster catalog.
//!
//! ## Structure
//!
//! - `use_cases/` - Generation core and table lifecycle orchestration
//! - `infrastructure/` - Ports, in-memory adapters, catalog loading, settings
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures module for integration testing.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
