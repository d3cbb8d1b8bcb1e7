//! Evocative table names for tables created without one.

use std::sync::Arc;

use shadowtables_domain::{DomainError, TableName};

use crate::infrastructure::ports::RandomPort;

const ADJECTIVES: &[&str] = &[
    "Cursed", "Forgotten", "Burning", "Frozen", "Bleeding", "Twisted", "Haunted", "Shattered",
    "Whispering", "Dread", "Endless", "Rotting", "Vengeful", "Sunken", "Screaming", "Blighted",
    "Wretched", "Nameless", "Hungry", "Creeping",
];

const NOUNS: &[&str] = &[
    "Crypts", "Vale", "Depths", "Halls", "Tombs", "Wastes", "Ruins", "Shadows", "Cairns",
    "Barrows", "Spire", "Chambers", "Labyrinth", "Chasm", "Maw", "Ossuary", "Catacombs",
    "Sanctum", "Threshold", "Abyss",
];

const PREFIXES: &[&str] = &[
    "Beyond the", "Beneath the", "Within the", "Through the", "Into the", "From the",
    "Above the", "Of the", "Across the", "Among the", "Below the", "Inside the", "Toward the",
    "At the", "Near the",
];

const INTENSIFIERS: &[&str] = &[
    "of Darkness", "of Blood", "of Bone", "of Sorrow", "of Death", "of Despair", "of Ruin",
    "of Silence", "of Flame", "of Shadow",
];

/// Picks names like "The Cursed Crypts" or "Beneath the Crypts of Bone".
pub struct TableNameGenerator {
    random: Arc<dyn RandomPort>,
}

impl TableNameGenerator {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }

    pub fn generate(&self) -> Result<TableName, DomainError> {
        let raw = match self.random.gen_range(0, 5) {
            0 => format!("The {} {}", self.pick(ADJECTIVES), self.pick(NOUNS)),
            1 => format!("{} {}", self.pick(ADJECTIVES), self.pick(NOUNS)),
            2 => format!("{} {}", self.pick(NOUNS), self.pick(INTENSIFIERS)),
            3 => format!(
                "The {} {} {}",
                self.pick(ADJECTIVES),
                self.pick(NOUNS),
                self.pick(INTENSIFIERS)
            ),
            4 => format!(
                "{} {} {}",
                self.pick(PREFIXES),
                self.pick(ADJECTIVES),
                self.pick(NOUNS)
            ),
            _ => format!(
                "{} {} {}",
                self.pick(PREFIXES),
                self.pick(NOUNS),
                self.pick(INTENSIFIERS)
            ),
        };

        TableName::new(raw)
    }

    fn pick(&self, words: &[&'static str]) -> &'static str {
        let last = i32::try_from(words.len().saturating_sub(1)).unwrap_or(i32::MAX);
        let index = usize::try_from(self.random.gen_range(0, last)).unwrap_or(0);
        words[index.min(words.len() - 1)]
    }
}
