//! Frozen monster stat blocks
//!
//! A `MonsterSnapshot` is captured when a monster is placed on an encounter
//! table and never changes afterwards, even if the catalog row is edited or
//! deleted. Historical tables must not silently mutate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Ability, Alignment, Attack, MonsterOrigin, Treasure};
use crate::ids::{MonsterId, UserId};

/// Current snapshot layout version. Bump when fields change meaning.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Raw ability scores derived from stored modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub str: i32,
    pub dex: i32,
    pub con: i32,
    pub int: i32,
    pub wis: i32,
    pub cha: i32,
}

/// The six modifiers with missing values resolved to zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedModifiers {
    pub str_mod: i32,
    pub dex_mod: i32,
    pub con_mod: i32,
    pub int_mod: i32,
    pub wis_mod: i32,
    pub cha_mod: i32,
}

/// Immutable, denormalized copy of a `MonsterRecord`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterSnapshot {
    pub schema_version: u32,

    pub id: MonsterId,
    pub name: String,
    pub origin: MonsterOrigin,
    pub owner_id: Option<UserId>,
    pub is_public: bool,

    pub challenge_level: u8,
    pub armor_class: i32,
    pub hit_points: i32,
    pub hit_dice: String,
    pub speed: String,
    pub movement_types: Vec<String>,

    pub scores: AbilityScores,
    pub modifiers: ResolvedModifiers,

    pub attacks: Vec<Attack>,
    pub abilities: Vec<Ability>,
    pub traits: Option<String>,

    pub alignment: Option<Alignment>,
    pub size: Option<String>,
    pub creature_type: Option<String>,
    pub description: Option<String>,
    pub author_notes: Option<String>,
    pub treasure: Option<Treasure>,
    pub tags: Vec<String>,
    pub icon_url: Option<String>,

    /// Catalog timestamps at capture time, kept for reference
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
