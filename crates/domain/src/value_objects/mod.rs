//! Value objects - Immutable objects defined by their attributes

mod die_size;
mod encounter_filter;
mod monster_query;
mod monster_snapshot;
mod names;

pub use die_size::{DieSize, MAX_DIE_SIZE, MIN_DIE_SIZE};
pub use encounter_filter::{
    FilterCriteria, MonsterSource, MAX_CHALLENGE_LEVEL, MAX_SEARCH_QUERY_LENGTH,
    MIN_CHALLENGE_LEVEL,
};
pub use monster_query::MonsterQuery;
pub use monster_snapshot::{
    AbilityScores, MonsterSnapshot, ResolvedModifiers, SNAPSHOT_SCHEMA_VERSION,
};
pub use names::{
    PublicSlug, TableDescription, TableName, MAX_TABLE_NAME_LENGTH, PUBLIC_SLUG_ALPHABET,
    PUBLIC_SLUG_LENGTH,
};
