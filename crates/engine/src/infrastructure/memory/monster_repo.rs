//! In-memory monster catalog.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use shadowtables_domain::{MonsterId, MonsterQuery, MonsterRecord, UserId};

use crate::infrastructure::clock::SystemRandom;
use crate::infrastructure::ports::{MonsterRepo, RandomPort, RepoError};

/// Catalog held in memory, filtered with `MonsterQuery::matches`.
///
/// `fetch` draws its rows with the injected `RandomPort`.
pub struct InMemoryMonsterRepo {
    monsters: DashMap<MonsterId, MonsterRecord>,
    favorites: DashMap<UserId, BTreeSet<MonsterId>>,
    random: Arc<dyn RandomPort>,
}

impl Default for InMemoryMonsterRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMonsterRepo {
    pub fn new() -> Self {
        Self {
            monsters: DashMap::new(),
            favorites: DashMap::new(),
            random: Arc::new(SystemRandom::new()),
        }
    }

    pub fn with_random(mut self, random: Arc<dyn RandomPort>) -> Self {
        self.random = random;
        self
    }

    /// Insert or overwrite a monster.
    pub fn insert(&self, record: MonsterRecord) {
        self.monsters.insert(record.id, record);
    }

    /// Remove a monster and drop it from every favorites list.
    pub fn remove(&self, id: MonsterId) -> Option<MonsterRecord> {
        for mut favorites in self.favorites.iter_mut() {
            favorites.value_mut().remove(&id);
        }
        self.monsters.remove(&id).map(|(_, record)| record)
    }

    pub fn add_favorite(&self, user_id: UserId, monster_id: MonsterId) {
        self.favorites.entry(user_id).or_default().insert(monster_id);
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    fn matching(&self, query: &MonsterQuery) -> Vec<MonsterRecord> {
        let mut records: Vec<MonsterRecord> = self
            .monsters
            .iter()
            .filter(|entry| query.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        // DashMap iteration order is arbitrary; sort so scripted randomness
        // picks the same rows every run.
        records.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        records
    }
}

/// Move `limit` uniformly chosen records to the front, then drop the rest.
fn draw(records: &mut Vec<MonsterRecord>, limit: usize, random: &dyn RandomPort) {
    let take = limit.min(records.len());
    let last = records.len().saturating_sub(1) as i32;
    for i in 0..take {
        let j = random.gen_range(i as i32, last) as usize;
        let hi = records.len() - 1;
        records.swap(i, j.clamp(i, hi));
    }
    records.truncate(take);
}

#[async_trait]
impl MonsterRepo for InMemoryMonsterRepo {
    async fn count(&self, query: &MonsterQuery) -> Result<usize, RepoError> {
        Ok(self
            .monsters
            .iter()
            .filter(|entry| query.matches(entry.value()))
            .count())
    }

    async fn fetch(
        &self,
        query: &MonsterQuery,
        limit: usize,
    ) -> Result<Vec<MonsterRecord>, RepoError> {
        let mut records = self.matching(query);
        draw(&mut records, limit, self.random.as_ref());
        Ok(records)
    }

    async fn fetch_by_id(&self, id: MonsterId) -> Result<Option<MonsterRecord>, RepoError> {
        Ok(self.monsters.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_favorite_ids(&self, user_id: UserId) -> Result<BTreeSet<MonsterId>, RepoError> {
        Ok(self
            .favorites
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedRandom, SequenceRandom};
    use crate::test_fixtures::monsters::{official_monsters, MonsterFactory};
    use shadowtables_domain::{FilterCriteria, MonsterSource};

    fn seeded() -> (InMemoryMonsterRepo, UserId) {
        let factory = MonsterFactory::new();
        let owner = UserId::new();
        let repo = InMemoryMonsterRepo::new();
        repo.insert(factory.official("Zombie", 2).with_speed("near"));
        repo.insert(factory.official("Harpy", 3).with_speed("near (fly)"));
        repo.insert(factory.official("Kraken", 15).with_movement_types(vec!["Swim".into()]));
        repo.insert(factory.custom(owner, "Hollow Knight", 4));
        repo.insert(
            factory
                .custom(UserId::new(), "Grave Moth", 2)
                .with_public(true)
                .with_speed("far (fly)"),
        );
        repo.insert(factory.custom(UserId::new(), "Hidden Thing", 2));
        (repo, owner)
    }

    #[tokio::test]
    async fn count_and_fetch_agree_with_query() {
        let (repo, owner) = seeded();
        let query = MonsterQuery::new(
            FilterCriteria::new([MonsterSource::Official, MonsterSource::UserOwned]),
            Some(owner),
        );

        assert_eq!(repo.count(&query).await.unwrap(), 4);
        let mut names: Vec<String> = repo
            .fetch(&query, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Harpy", "Hollow Knight", "Kraken", "Zombie"]);
    }

    #[tokio::test]
    async fn fetch_honours_limit() {
        let (repo, _) = seeded();
        let query = MonsterQuery::new(FilterCriteria::default(), None);
        assert_eq!(repo.fetch(&query, 2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn movement_filter_spans_official_and_public() {
        let (repo, _) = seeded();
        let query = MonsterQuery::new(
            FilterCriteria::new([MonsterSource::Official, MonsterSource::PublicCommunity])
                .with_movement(["fly"]),
            None,
        );

        let mut names: Vec<String> = repo
            .fetch(&query, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Grave Moth", "Harpy"]);
    }

    #[tokio::test]
    async fn favorites_follow_removal() {
        let repo = InMemoryMonsterRepo::new();
        let user = UserId::new();
        let monster = MonsterFactory::new().official("Imp", 1);
        repo.insert(monster.clone());
        repo.add_favorite(user, monster.id);

        assert!(repo.list_favorite_ids(user).await.unwrap().contains(&monster.id));

        repo.remove(monster.id);
        assert!(repo.list_favorite_ids(user).await.unwrap().is_empty());
        assert!(repo.fetch_by_id(monster.id).await.unwrap().is_none());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn fetch_is_not_a_fixed_prefix() {
        let records = official_monsters(10, 1);
        let mut sorted = records.clone();
        sorted.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        let repo = InMemoryMonsterRepo::new().with_random(Arc::new(FixedRandom(i32::MAX)));
        for record in records {
            repo.insert(record);
        }
        let query = MonsterQuery::new(FilterCriteria::default(), None);

        let fetched: Vec<MonsterId> = repo
            .fetch(&query, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();

        // Always picking the last candidate pulls rows from the tail.
        assert_eq!(fetched, vec![sorted[9].id, sorted[0].id]);
    }

    #[tokio::test]
    async fn fetch_follows_injected_randomness() {
        let records = official_monsters(5, 1);
        let mut sorted = records.clone();
        sorted.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        let repo =
            InMemoryMonsterRepo::new().with_random(Arc::new(SequenceRandom::new(vec![3, 1, 4])));
        for record in records {
            repo.insert(record);
        }
        let query = MonsterQuery::new(FilterCriteria::default(), None);

        let fetched: Vec<MonsterId> = repo
            .fetch(&query, 3)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();

        // [0 1 2 3 4] -> swap(0,3) -> swap(1,1) -> swap(2,4)
        assert_eq!(fetched, vec![sorted[3].id, sorted[1].id, sorted[4].id]);
    }

    #[tokio::test]
    async fn repeated_fetches_reach_the_whole_pool() {
        let repo = InMemoryMonsterRepo::new();
        for record in official_monsters(100, 1) {
            repo.insert(record);
        }
        let query = MonsterQuery::new(FilterCriteria::default(), None);

        let mut seen = BTreeSet::new();
        for _ in 0..200 {
            for record in repo.fetch(&query, 12).await.unwrap() {
                seen.insert(record.id);
            }
        }

        assert!(seen.len() >= 90, "only {} of 100 monsters reachable", seen.len());
    }
}
