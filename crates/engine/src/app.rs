//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    memory::{InMemoryEncounterTableRepo, InMemoryMonsterRepo},
    ports::{ClockPort, EncounterTableRepo, MonsterRepo, RandomPort},
    settings::EngineSettings,
};
use crate::use_cases;
use crate::use_cases::encounter_table::{
    CopyPublicTable, CreateEncounterTable, DeleteEncounterTable, GetEncounterTable,
    ListEncounterTables, PreviewEncounterTable, RegenerateEncounterTable, ReplaceTableEntry,
    RollEncounterTable, ShareEncounterTable, SlugGenerator, TableNameGenerator,
    UpdateEncounterTable,
};

/// Main application state.
///
/// Holds the storage ports and every use case built on them.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub settings: EngineSettings,
}

/// Container for the storage ports, injected directly.
pub struct Repositories {
    pub monsters: Arc<dyn MonsterRepo>,
    pub tables: Arc<dyn EncounterTableRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub encounter: use_cases::EncounterUseCases,
    pub encounter_table: use_cases::EncounterTableUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        monsters: Arc<dyn MonsterRepo>,
        tables: Arc<dyn EncounterTableRepo>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
        settings: EngineSettings,
    ) -> Self {
        let encounter = use_cases::EncounterUseCases::new(
            monsters.clone(),
            random.clone(),
            settings.fetch_oversample,
        );

        let names = Arc::new(TableNameGenerator::new(random.clone()));
        let slugs = Arc::new(
            SlugGenerator::new(tables.clone(), random.clone())
                .with_max_attempts(settings.slug_attempts),
        );

        let encounter_table = use_cases::EncounterTableUseCases::new(
            CreateEncounterTable::new(
                tables.clone(),
                encounter.generator.clone(),
                names,
                clock.clone(),
            ),
            PreviewEncounterTable::new(encounter.generator.clone()),
            GetEncounterTable::new(tables.clone()),
            ListEncounterTables::new(tables.clone()),
            UpdateEncounterTable::new(tables.clone(), clock.clone()),
            RegenerateEncounterTable::new(
                tables.clone(),
                encounter.generator.clone(),
                clock.clone(),
            ),
            ReplaceTableEntry::new(tables.clone(), encounter.replacer.clone(), clock.clone()),
            RollEncounterTable::new(tables.clone(), random),
            ShareEncounterTable::new(tables.clone(), slugs, clock.clone()),
            CopyPublicTable::new(tables.clone(), clock),
            DeleteEncounterTable::new(tables.clone()),
        );

        Self {
            repositories: Repositories { monsters, tables },
            use_cases: UseCases {
                encounter,
                encounter_table,
            },
            settings,
        }
    }

    /// App over in-memory storage with the system clock and random source.
    pub fn in_memory(monsters: InMemoryMonsterRepo, settings: EngineSettings) -> Self {
        Self::new(
            Arc::new(monsters),
            Arc::new(InMemoryEncounterTableRepo::new()),
            Arc::new(SystemRandom::new()),
            Arc::new(SystemClock::new()),
            settings,
        )
    }
}
