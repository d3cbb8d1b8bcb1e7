//! Monster entity - A full catalog stat block
//!
//! `MonsterRecord` is the persisted monster row as the catalog owns it. The
//! encounter engine only reads it; tables keep a frozen `MonsterSnapshot`
//! instead of referencing it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{MonsterId, UserId};

/// Where a monster comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonsterOrigin {
    /// Published rulebook monster
    Official,
    /// Created by a user (may be private or shared publicly)
    Custom,
}

/// Creature alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Lawful,
    Neutral,
    Chaotic,
}

/// A single attack line of a stat block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    pub name: String,
    /// Attack roll bonus
    pub bonus: i32,
    /// Damage formula, e.g. "1d8+2"
    pub damage: String,
    pub damage_type: String,
    pub range: Option<String>,
    pub description: Option<String>,
}

/// A special ability or trait
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub description: String,
    /// Usage limit, e.g. "1/day"
    pub usage: Option<String>,
}

/// Coins and items carried by a monster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasure {
    pub copper: u32,
    pub silver: u32,
    pub gold: u32,
    pub items: Vec<String>,
}

/// Stored ability modifiers. Catalog rows may omit any of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityModifiers {
    pub str_mod: Option<i32>,
    pub dex_mod: Option<i32>,
    pub con_mod: Option<i32>,
    pub int_mod: Option<i32>,
    pub wis_mod: Option<i32>,
    pub cha_mod: Option<i32>,
}

impl AbilityModifiers {
    /// All six modifiers present.
    pub fn new(str: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32) -> Self {
        Self {
            str_mod: Some(str),
            dex_mod: Some(dex),
            con_mod: Some(con),
            int_mod: Some(int),
            wis_mod: Some(wis),
            cha_mod: Some(cha),
        }
    }
}

/// A monster as persisted in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub id: MonsterId,
    pub name: String,
    pub origin: MonsterOrigin,
    /// Creator of a custom monster; `None` for official monsters
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub is_public: bool,

    pub challenge_level: u8,
    pub armor_class: i32,
    pub hit_points: i32,
    #[serde(default)]
    pub hit_dice: String,
    /// Free-form speed line, e.g. "near, fly far"
    #[serde(default)]
    pub speed: String,
    #[serde(default)]
    pub movement_types: Vec<String>,
    #[serde(default)]
    pub modifiers: AbilityModifiers,

    #[serde(default)]
    pub attacks: Vec<Attack>,
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub traits: Option<String>,

    #[serde(default)]
    pub alignment: Option<Alignment>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub creature_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Free-text notes left by the author
    #[serde(default)]
    pub author_notes: Option<String>,
    #[serde(default)]
    pub treasure: Option<Treasure>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub icon_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MonsterRecord {
    fn new(
        name: impl Into<String>,
        origin: MonsterOrigin,
        owner_id: Option<UserId>,
        challenge_level: u8,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MonsterId::new(),
            name: name.into(),
            origin,
            owner_id,
            is_public: false,
            challenge_level,
            armor_class: 10,
            hit_points: 1,
            hit_dice: String::new(),
            speed: "near".to_string(),
            movement_types: Vec::new(),
            modifiers: AbilityModifiers::default(),
            attacks: Vec::new(),
            abilities: Vec::new(),
            traits: None,
            alignment: None,
            size: None,
            creature_type: None,
            description: None,
            author_notes: None,
            treasure: None,
            tags: Vec::new(),
            icon_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an official catalog monster.
    pub fn official(name: impl Into<String>, challenge_level: u8, now: DateTime<Utc>) -> Self {
        Self::new(name, MonsterOrigin::Official, None, challenge_level, now)
    }

    /// Create a user-authored monster (private until made public).
    pub fn custom(
        owner_id: UserId,
        name: impl Into<String>,
        challenge_level: u8,
        now: DateTime<Utc>,
    ) -> Self {
        Self::new(name, MonsterOrigin::Custom, Some(owner_id), challenge_level, now)
    }

    pub fn with_id(mut self, id: MonsterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn with_speed(mut self, speed: impl Into<String>) -> Self {
        self.speed = speed.into();
        self
    }

    pub fn with_movement_types(mut self, movement_types: Vec<String>) -> Self {
        self.movement_types = movement_types;
        self
    }

    pub fn with_modifiers(mut self, modifiers: AbilityModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_author_notes(mut self, notes: impl Into<String>) -> Self {
        self.author_notes = Some(notes.into());
        self
    }

    pub fn with_attack(mut self, attack: Attack) -> Self {
        self.attacks.push(attack);
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn is_official(&self) -> bool {
        self.origin == MonsterOrigin::Official
    }

    /// True for custom monsters authored by `user_id`.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.origin == MonsterOrigin::Custom && self.owner_id == Some(user_id)
    }

    /// True for custom monsters shared with the community.
    pub fn is_community_public(&self) -> bool {
        self.origin == MonsterOrigin::Custom && self.is_public
    }
}
