//! Single-slot replacement.

use std::collections::BTreeSet;
use std::sync::Arc;

use shadowtables_domain::{
    EncounterTableEntry, EncounterTableId, FilterCriteria, MonsterId, MonsterRecord, UserId,
};

use crate::infrastructure::ports::MonsterRepo;

use super::error::EncounterError;
use super::sampler::PoolSampler;
use super::snapshot::SnapshotBuilder;

/// Swaps the monster at one roll position without touching the others.
pub struct EntryReplacer {
    sampler: Arc<PoolSampler>,
    monsters: Arc<dyn MonsterRepo>,
    snapshots: SnapshotBuilder,
}

impl EntryReplacer {
    pub fn new(sampler: Arc<PoolSampler>, monsters: Arc<dyn MonsterRepo>) -> Self {
        Self {
            sampler,
            monsters,
            snapshots: SnapshotBuilder::new(),
        }
    }

    /// Produce the new entry for `roll_number`.
    ///
    /// With `explicit_id` the filter is ignored and that monster is used as
    /// long as it is not already on the table. Without it, one monster is
    /// drawn from the filter's pool minus `current_ids`.
    pub async fn replace(
        &self,
        table_id: EncounterTableId,
        roll_number: u32,
        filter: &FilterCriteria,
        current_ids: &BTreeSet<MonsterId>,
        explicit_id: Option<MonsterId>,
        caller: Option<UserId>,
    ) -> Result<EncounterTableEntry, EncounterError> {
        let record = match explicit_id {
            Some(monster_id) => self.explicit(monster_id, current_ids, caller).await?,
            None => self.random(filter, current_ids, caller).await?,
        };

        if current_ids.contains(&record.id) {
            tracing::error!(
                table_id = %table_id,
                roll_number,
                monster_id = %record.id,
                "Replacement drew a monster already on the table"
            );
            return Err(EncounterError::InternalConsistency(format!(
                "replacement monster {} already on table {}",
                record.id, table_id
            )));
        }

        tracing::debug!(
            table_id = %table_id,
            roll_number,
            monster_id = %record.id,
            explicit = explicit_id.is_some(),
            "Replaced encounter entry"
        );
        Ok(EncounterTableEntry::new(
            table_id,
            roll_number,
            self.snapshots.snapshot(&record),
        ))
    }

    async fn explicit(
        &self,
        monster_id: MonsterId,
        current_ids: &BTreeSet<MonsterId>,
        caller: Option<UserId>,
    ) -> Result<MonsterRecord, EncounterError> {
        if current_ids.contains(&monster_id) {
            return Err(EncounterError::DuplicateInTable(monster_id));
        }

        let record = self
            .monsters
            .fetch_by_id(monster_id)
            .await?
            .ok_or(EncounterError::MonsterNotFound(monster_id))?;

        // Someone else's private monster is reported as missing.
        if !is_accessible(&record, caller) {
            return Err(EncounterError::MonsterNotFound(monster_id));
        }
        Ok(record)
    }

    async fn random(
        &self,
        filter: &FilterCriteria,
        current_ids: &BTreeSet<MonsterId>,
        caller: Option<UserId>,
    ) -> Result<MonsterRecord, EncounterError> {
        let mut drawn = self
            .sampler
            .sample(filter, 1, current_ids, caller)
            .await
            .map_err(|err| match err {
                EncounterError::InsufficientPool { .. } => EncounterError::NoAvailableCandidates,
                other => other,
            })?;

        drawn.pop().ok_or(EncounterError::NoAvailableCandidates)
    }
}

fn is_accessible(record: &MonsterRecord, caller: Option<UserId>) -> bool {
    record.is_official()
        || record.is_community_public()
        || caller.is_some_and(|user_id| record.is_owned_by(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedRandom, SystemRandom};
    use crate::infrastructure::memory::InMemoryMonsterRepo;
    use crate::infrastructure::ports::MockMonsterRepo;
    use crate::test_fixtures::monsters::{official_monsters, MonsterFactory};

    fn replacer_over(repo: InMemoryMonsterRepo) -> EntryReplacer {
        let repo = Arc::new(repo);
        let sampler = PoolSampler::new(repo.clone(), Arc::new(SystemRandom::new()));
        EntryReplacer::new(Arc::new(sampler), repo)
    }

    fn ids(records: &[MonsterRecord]) -> BTreeSet<MonsterId> {
        records.iter().map(|m| m.id).collect()
    }

    #[tokio::test]
    async fn explicit_duplicate_is_rejected() {
        let monsters = official_monsters(3, 1);
        let current = ids(&monsters);
        let target = monsters[1].id;

        // Fails before any lookup.
        let sampler = PoolSampler::new(Arc::new(MockMonsterRepo::new()), Arc::new(FixedRandom(0)));
        let replacer = EntryReplacer::new(Arc::new(sampler), Arc::new(MockMonsterRepo::new()));

        let result = replacer
            .replace(
                EncounterTableId::new(),
                2,
                &FilterCriteria::default(),
                &current,
                Some(target),
                None,
            )
            .await;

        assert!(matches!(result, Err(EncounterError::DuplicateInTable(id)) if id == target));
    }

    #[tokio::test]
    async fn explicit_new_monster_keeps_roll_number() {
        let repo = InMemoryMonsterRepo::new();
        let monsters = official_monsters(3, 1);
        for m in &monsters {
            repo.insert(m.clone());
        }
        // Explicit mode ignores the level filter.
        let newcomer = MonsterFactory::new().official("Owlbear", 9);
        repo.insert(newcomer.clone());

        let table_id = EncounterTableId::new();
        let entry = replacer_over(repo)
            .replace(
                table_id,
                4,
                &FilterCriteria::default().with_levels(1, 2),
                &ids(&monsters),
                Some(newcomer.id),
                None,
            )
            .await
            .unwrap();

        assert_eq!(entry.table_id, table_id);
        assert_eq!(entry.roll_number, 4);
        assert_eq!(entry.monster_id, Some(newcomer.id));
        assert_eq!(entry.monster_snapshot.name, "Owlbear");
    }

    #[tokio::test]
    async fn explicit_unknown_monster_is_not_found() {
        let missing = MonsterId::new();
        let result = replacer_over(InMemoryMonsterRepo::new())
            .replace(
                EncounterTableId::new(),
                1,
                &FilterCriteria::default(),
                &BTreeSet::new(),
                Some(missing),
                None,
            )
            .await;

        assert!(matches!(result, Err(EncounterError::MonsterNotFound(id)) if id == missing));
    }

    #[tokio::test]
    async fn explicit_private_monster_of_another_user_is_not_found() {
        let owner = UserId::new();
        let secret = MonsterFactory::new().custom(owner, "Secret Horror", 4);
        let repo = InMemoryMonsterRepo::new();
        repo.insert(secret.clone());
        let replacer = replacer_over(repo);

        let stranger = replacer
            .replace(
                EncounterTableId::new(),
                1,
                &FilterCriteria::default(),
                &BTreeSet::new(),
                Some(secret.id),
                Some(UserId::new()),
            )
            .await;
        assert!(matches!(stranger, Err(EncounterError::MonsterNotFound(_))));

        let own = replacer
            .replace(
                EncounterTableId::new(),
                1,
                &FilterCriteria::default(),
                &BTreeSet::new(),
                Some(secret.id),
                Some(owner),
            )
            .await
            .unwrap();
        assert_eq!(own.monster_id, Some(secret.id));
    }

    #[tokio::test]
    async fn random_mode_draws_outside_current_set() {
        let repo = InMemoryMonsterRepo::new();
        let monsters = official_monsters(5, 1);
        for m in &monsters {
            repo.insert(m.clone());
        }
        let current = ids(&monsters[..4]);

        let entry = replacer_over(repo)
            .replace(
                EncounterTableId::new(),
                3,
                &FilterCriteria::default(),
                &current,
                None,
                None,
            )
            .await
            .unwrap();

        assert_eq!(entry.roll_number, 3);
        assert_eq!(entry.monster_id, Some(monsters[4].id));
    }

    #[tokio::test]
    async fn random_mode_with_exhausted_pool_reports_no_candidates() {
        let repo = InMemoryMonsterRepo::new();
        let monsters = official_monsters(3, 1);
        for m in &monsters {
            repo.insert(m.clone());
        }

        let result = replacer_over(repo)
            .replace(
                EncounterTableId::new(),
                1,
                &FilterCriteria::default(),
                &ids(&monsters),
                None,
                None,
            )
            .await;

        assert!(matches!(result, Err(EncounterError::NoAvailableCandidates)));
    }

    #[tokio::test]
    async fn random_mode_keeps_other_sampler_errors() {
        let filter = FilterCriteria::new([shadowtables_domain::MonsterSource::Favorites]);
        let result = replacer_over(InMemoryMonsterRepo::new())
            .replace(
                EncounterTableId::new(),
                1,
                &filter,
                &BTreeSet::new(),
                None,
                None,
            )
            .await;

        assert!(matches!(result, Err(EncounterError::Unauthenticated)));
    }
}
