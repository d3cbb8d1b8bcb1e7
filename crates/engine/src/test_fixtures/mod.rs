//! Test fixtures and common test helpers.
//!
//! JSON catalogs live under `test_data/`; everything else is built in code.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::monsters::{official_monsters, MonsterFactory};
//!
//! #[tokio::test]
//! async fn test_small_pool() {
//!     let repo = InMemoryMonsterRepo::new();
//!     for m in official_monsters(4, 2) {
//!         repo.insert(m);
//!     }
//!     // ... test logic
//! }
//! ```

use std::path::PathBuf;

// =============================================================================
// Fixture Loading
// =============================================================================

/// Absolute path of a file under `test_data/`.
pub fn fixture_path(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(path)
}

/// Load a JSON fixture from the test_data/ directory.
///
/// # Panics
///
/// Panics if the fixture file cannot be read or parsed.
pub fn load_fixture<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let fixture_path = fixture_path(path);
    let content = std::fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture '{}': {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        panic!(
            "Failed to parse fixture '{}': {}",
            fixture_path.display(),
            e
        )
    })
}

// =============================================================================
// Monster Fixtures
// =============================================================================

/// Catalog monsters with a fixed creation time.
pub mod monsters {
    use chrono::{DateTime, TimeZone, Utc};
    use shadowtables_domain::{MonsterRecord, UserId};

    /// Builds monsters that all share one timestamp.
    pub struct MonsterFactory {
        now: DateTime<Utc>,
    }

    impl MonsterFactory {
        pub fn new() -> Self {
            Self {
                now: fixed_now(),
            }
        }

        pub fn official(&self, name: impl Into<String>, level: u8) -> MonsterRecord {
            MonsterRecord::official(name, level, self.now)
        }

        pub fn custom(&self, owner: UserId, name: impl Into<String>, level: u8) -> MonsterRecord {
            MonsterRecord::custom(owner, name, level, self.now)
        }
    }

    impl Default for MonsterFactory {
        fn default() -> Self {
            Self::new()
        }
    }

    /// `count` official monsters named "Official 0", "Official 1", ...
    pub fn official_monsters(count: usize, level: u8) -> Vec<MonsterRecord> {
        let factory = MonsterFactory::new();
        (0..count)
            .map(|i| factory.official(format!("Official {}", i), level))
            .collect()
    }

    pub fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 31, 21, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

// =============================================================================
// Table Fixtures
// =============================================================================

/// Encounter tables and complete entry sets.
pub mod tables {
    use chrono::{DateTime, Utc};
    use shadowtables_domain::{
        DieSize, EncounterTable, EncounterTableEntry, EncounterTableId, FilterCriteria,
        TableName, UserId,
    };

    use super::monsters::official_monsters;
    use crate::use_cases::encounter::SnapshotBuilder;

    /// A private table over official monsters.
    pub fn sample_table(owner: UserId, faces: u32, now: DateTime<Utc>) -> EncounterTable {
        EncounterTable::new(
            owner,
            TableName::new("Crypt of Testing").unwrap(),
            DieSize::new(faces).unwrap(),
            FilterCriteria::default(),
            now,
        )
    }

    /// Entries `1..=count` each holding a distinct monster.
    pub fn sample_entries(table_id: EncounterTableId, count: usize) -> Vec<EncounterTableEntry> {
        let builder = SnapshotBuilder::new();
        official_monsters(count, 1)
            .iter()
            .zip(1u32..)
            .map(|(record, roll)| EncounterTableEntry::new(table_id, roll, builder.snapshot(record)))
            .collect()
    }
}

// =============================================================================
// Engine Harness
// =============================================================================

/// In-memory ports wired to the generation core.
pub mod engine {
    use std::sync::Arc;

    use chrono::{DateTime, Utc};
    use shadowtables_domain::MonsterRecord;

    use super::monsters::{fixed_now, official_monsters};
    use crate::infrastructure::clock::{FixedClock, SystemRandom};
    use crate::infrastructure::memory::{InMemoryEncounterTableRepo, InMemoryMonsterRepo};
    use crate::infrastructure::ports::{ClockPort, RandomPort};
    use crate::use_cases::encounter::{EntryReplacer, PoolSampler, TableGenerator};

    pub struct TestEngine {
        pub monsters: Arc<InMemoryMonsterRepo>,
        pub tables: Arc<InMemoryEncounterTableRepo>,
        pub random: Arc<dyn RandomPort>,
        pub clock: Arc<dyn ClockPort>,
        pub generator: Arc<TableGenerator>,
        pub replacer: Arc<EntryReplacer>,
    }

    impl TestEngine {
        pub fn new() -> Self {
            Self::with_random(Arc::new(SystemRandom::new()))
        }

        pub fn with_random(random: Arc<dyn RandomPort>) -> Self {
            let monsters = Arc::new(InMemoryMonsterRepo::new().with_random(random.clone()));
            let sampler = Arc::new(PoolSampler::new(monsters.clone(), random.clone()));
            Self {
                tables: Arc::new(InMemoryEncounterTableRepo::new()),
                clock: Arc::new(FixedClock(fixed_now())),
                generator: Arc::new(TableGenerator::new(sampler.clone())),
                replacer: Arc::new(EntryReplacer::new(sampler, monsters.clone())),
                monsters,
                random,
            }
        }

        /// Insert `count` official monsters and return them.
        pub fn seed_official(&self, count: usize, level: u8) -> Vec<MonsterRecord> {
            let records = official_monsters(count, level);
            for record in &records {
                self.monsters.insert(record.clone());
            }
            records
        }

        pub fn now(&self) -> DateTime<Utc> {
            self.clock.now()
        }
    }

    impl Default for TestEngine {
        fn default() -> Self {
            Self::new()
        }
    }
}
