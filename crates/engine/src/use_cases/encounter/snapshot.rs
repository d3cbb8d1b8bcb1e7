//! Freezes monster records into table snapshots.

use shadowtables_domain::{
    AbilityModifiers, AbilityScores, MonsterRecord, MonsterSnapshot, ResolvedModifiers,
    SNAPSHOT_SCHEMA_VERSION,
};

/// Builds immutable snapshots of catalog monsters.
///
/// Stateless and pure; later edits to a monster never reach a snapshot that
/// was already taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotBuilder;

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn snapshot(&self, record: &MonsterRecord) -> MonsterSnapshot {
        let modifiers = resolve_modifiers(&record.modifiers);

        MonsterSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            id: record.id,
            name: record.name.clone(),
            origin: record.origin,
            owner_id: record.owner_id,
            is_public: record.is_public,
            challenge_level: record.challenge_level,
            armor_class: record.armor_class,
            hit_points: record.hit_points,
            hit_dice: record.hit_dice.clone(),
            speed: record.speed.clone(),
            movement_types: record.movement_types.clone(),
            scores: derive_scores(&modifiers),
            modifiers,
            attacks: record.attacks.clone(),
            abilities: record.abilities.clone(),
            traits: record.traits.clone(),
            alignment: record.alignment,
            size: record.size.clone(),
            creature_type: record.creature_type.clone(),
            description: record.description.clone(),
            author_notes: record.author_notes.clone(),
            treasure: record.treasure.clone(),
            tags: record.tags.clone(),
            icon_url: record.icon_url.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// One snapshot per record, in input order.
    pub fn snapshot_many(&self, records: &[MonsterRecord]) -> Vec<MonsterSnapshot> {
        records.iter().map(|record| self.snapshot(record)).collect()
    }
}

/// Raw ability score for a stored modifier.
pub fn ability_score(modifier: i32) -> i32 {
    10 + modifier * 2
}

fn resolve_modifiers(stored: &AbilityModifiers) -> ResolvedModifiers {
    ResolvedModifiers {
        str_mod: stored.str_mod.unwrap_or(0),
        dex_mod: stored.dex_mod.unwrap_or(0),
        con_mod: stored.con_mod.unwrap_or(0),
        int_mod: stored.int_mod.unwrap_or(0),
        wis_mod: stored.wis_mod.unwrap_or(0),
        cha_mod: stored.cha_mod.unwrap_or(0),
    }
}

fn derive_scores(modifiers: &ResolvedModifiers) -> AbilityScores {
    AbilityScores {
        str: ability_score(modifiers.str_mod),
        dex: ability_score(modifiers.dex_mod),
        con: ability_score(modifiers.con_mod),
        int: ability_score(modifiers.int_mod),
        wis: ability_score(modifiers.wis_mod),
        cha: ability_score(modifiers.cha_mod),
    }
}
