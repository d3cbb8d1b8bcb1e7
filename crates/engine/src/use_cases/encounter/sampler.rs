//! Pool sampling.
//!
//! Draws `count` distinct monsters from the pool a filter describes. The pool
//! is counted before anything is fetched so an undersized pool fails with
//! exact numbers instead of a partial result.

use std::collections::BTreeSet;
use std::sync::Arc;

use shadowtables_domain::{FilterCriteria, MonsterId, MonsterQuery, MonsterRecord, UserId};

use crate::infrastructure::ports::{MonsterRepo, RandomPort};

use super::error::EncounterError;

/// How many candidates to fetch per requested monster.
pub const DEFAULT_FETCH_OVERSAMPLE: usize = 2;

/// Selects unique candidate monsters for a filter.
pub struct PoolSampler {
    monsters: Arc<dyn MonsterRepo>,
    random: Arc<dyn RandomPort>,
    oversample: usize,
}

impl PoolSampler {
    pub fn new(monsters: Arc<dyn MonsterRepo>, random: Arc<dyn RandomPort>) -> Self {
        Self {
            monsters,
            random,
            oversample: DEFAULT_FETCH_OVERSAMPLE,
        }
    }

    /// Override the fetch multiplier (minimum 1).
    pub fn with_oversample(mut self, oversample: usize) -> Self {
        self.oversample = oversample.max(1);
        self
    }

    /// Resolve `filter` for `caller` into a storage query.
    ///
    /// Favorites restrict the pool to the caller's favorited IDs; every other
    /// filter dimension still applies on top of that restriction.
    pub async fn resolve_query(
        &self,
        filter: &FilterCriteria,
        exclude_ids: &BTreeSet<MonsterId>,
        caller: Option<UserId>,
    ) -> Result<MonsterQuery, EncounterError> {
        filter.validate().map_err(EncounterError::InvalidFilter)?;

        let mut query = MonsterQuery::new(filter.clone(), caller)
            .excluding(exclude_ids.iter().copied());

        if filter.includes_favorites() {
            let user_id = caller.ok_or(EncounterError::Unauthenticated)?;
            let favorites = self.monsters.list_favorite_ids(user_id).await?;
            if favorites.is_empty() {
                return Err(EncounterError::EmptyFavorites);
            }
            query = query.restricted_to(favorites);
        }

        Ok(query)
    }

    /// Draw exactly `count` distinct monsters matching `filter`, none of them
    /// in `exclude_ids`.
    ///
    /// # Errors
    ///
    /// * `InvalidCount` - `count` is zero
    /// * `InvalidFilter` - the filter breaks its own invariants
    /// * `Unauthenticated` / `EmptyFavorites` - favorites cannot be resolved
    /// * `InsufficientPool` - fewer than `count` monsters are eligible
    pub async fn sample(
        &self,
        filter: &FilterCriteria,
        count: usize,
        exclude_ids: &BTreeSet<MonsterId>,
        caller: Option<UserId>,
    ) -> Result<Vec<MonsterRecord>, EncounterError> {
        if count == 0 {
            return Err(EncounterError::InvalidCount);
        }

        let query = self.resolve_query(filter, exclude_ids, caller).await?;

        let available = self.monsters.count(&query).await?;
        tracing::debug!(
            required = count,
            available,
            excluded = exclude_ids.len(),
            "Counted monster pool"
        );
        if available < count {
            return Err(EncounterError::InsufficientPool {
                required: count,
                available,
            });
        }

        let limit = available.min(count.saturating_mul(self.oversample));
        let mut candidates = self.monsters.fetch(&query, limit).await?;

        // Defends against adapters that ignore part of the query.
        candidates.retain(|record| query.matches(record));
        dedup_by_id(&mut candidates);

        if candidates.len() < count {
            // The catalog changed between count and fetch.
            tracing::warn!(
                required = count,
                counted = available,
                fetched = candidates.len(),
                "Monster pool shrank between count and fetch"
            );
            return Err(EncounterError::InsufficientPool {
                required: count,
                available: candidates.len(),
            });
        }

        shuffle(&mut candidates, self.random.as_ref());
        candidates.truncate(count);
        Ok(candidates)
    }
}

/// Uniform in-place Fisher-Yates shuffle driven by the injected RNG.
pub fn shuffle<T>(items: &mut [T], random: &dyn RandomPort) {
    for i in (1..items.len()).rev() {
        let upper = i32::try_from(i).unwrap_or(i32::MAX);
        let j = usize::try_from(random.gen_range(0, upper)).unwrap_or(0).min(i);
        items.swap(i, j);
    }
}

fn dedup_by_id(records: &mut Vec<MonsterRecord>) {
    let mut seen = BTreeSet::new();
    records.retain(|record| seen.insert(record.id));
}
