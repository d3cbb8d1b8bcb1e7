//! Resolved monster pool query
//!
//! A `MonsterQuery` is a `FilterCriteria` after identity resolution: it knows
//! who is asking, which favorites restrict the pool, and which monsters are
//! already taken. Storage adapters translate it into their own query language;
//! `matches` is the reference predicate they must agree with.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entities::MonsterRecord;
use crate::ids::{MonsterId, UserId};
use crate::value_objects::{FilterCriteria, MonsterSource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterQuery {
    pub criteria: FilterCriteria,
    /// Authenticated caller, if any
    pub caller: Option<UserId>,
    /// When set, only these IDs are eligible and `criteria.sources` is ignored
    pub restrict_to: Option<BTreeSet<MonsterId>>,
    /// IDs that must never be returned
    pub exclude: BTreeSet<MonsterId>,
}

impl MonsterQuery {
    pub fn new(criteria: FilterCriteria, caller: Option<UserId>) -> Self {
        Self {
            criteria,
            caller,
            restrict_to: None,
            exclude: BTreeSet::new(),
        }
    }

    pub fn restricted_to(mut self, ids: BTreeSet<MonsterId>) -> Self {
        self.restrict_to = Some(ids);
        self
    }

    pub fn excluding(mut self, ids: impl IntoIterator<Item = MonsterId>) -> Self {
        self.exclude.extend(ids);
        self
    }

    /// Whether `record` belongs to the pool this query describes.
    pub fn matches(&self, record: &MonsterRecord) -> bool {
        if self.exclude.contains(&record.id) {
            return false;
        }

        match &self.restrict_to {
            Some(ids) => {
                if !ids.contains(&record.id) {
                    return false;
                }
            }
            None => {
                if !self.matches_any_source(record) {
                    return false;
                }
            }
        }

        if !self.criteria.level_contains(record.challenge_level) {
            return false;
        }

        if !self.matches_movement(record) {
            return false;
        }

        match self.criteria.search_term() {
            Some(term) => matches_search(record, term),
            None => true,
        }
    }

    fn matches_any_source(&self, record: &MonsterRecord) -> bool {
        self.criteria.sources.iter().any(|source| match source {
            MonsterSource::Official => record.is_official(),
            MonsterSource::UserOwned => self
                .caller
                .is_some_and(|caller| record.is_owned_by(caller)),
            MonsterSource::PublicCommunity => record.is_community_public(),
            // Favorites are resolved into `restrict_to` before querying
            MonsterSource::Favorites => false,
        })
    }

    fn matches_movement(&self, record: &MonsterRecord) -> bool {
        if self.criteria.movement_types.is_empty() {
            return true;
        }
        let speed = record.speed.to_lowercase();
        self.criteria.movement_types.iter().any(|wanted| {
            let wanted = wanted.trim().to_lowercase();
            speed.contains(&wanted)
                || record
                    .movement_types
                    .iter()
                    .any(|tag| tag.to_lowercase() == wanted)
        })
    }
}

fn matches_search(record: &MonsterRecord, term: &str) -> bool {
    let term = term.to_lowercase();
    record.name.to_lowercase().contains(&term)
        || record
            .author_notes
            .as_deref()
            .is_some_and(|notes| notes.to_lowercase().contains(&term))
        || record
            .description
            .as_deref()
            .is_some_and(|desc| desc.to_lowercase().contains(&term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn official(name: &str, level: u8) -> MonsterRecord {
        MonsterRecord::official(name, level, Utc::now())
    }

    #[test]
    fn official_source_ignores_custom_monsters() {
        let query = MonsterQuery::new(FilterCriteria::new([MonsterSource::Official]), None);
        let owner = UserId::new();

        assert!(query.matches(&official("Goblin", 1)));
        assert!(!query.matches(&MonsterRecord::custom(owner, "Homebrew", 1, Utc::now())));
    }

    #[test]
    fn user_source_needs_matching_caller() {
        let owner = UserId::new();
        let mine = MonsterRecord::custom(owner, "Pet Drake", 3, Utc::now());
        let filter = FilterCriteria::new([MonsterSource::UserOwned]);

        assert!(MonsterQuery::new(filter.clone(), Some(owner)).matches(&mine));
        assert!(!MonsterQuery::new(filter.clone(), Some(UserId::new())).matches(&mine));
        assert!(!MonsterQuery::new(filter, None).matches(&mine));
    }

    #[test]
    fn public_source_only_matches_shared_custom_monsters() {
        let owner = UserId::new();
        let shared = MonsterRecord::custom(owner, "Mire Toad", 2, Utc::now()).with_public(true);
        let private = MonsterRecord::custom(owner, "Secret Toad", 2, Utc::now());
        let query = MonsterQuery::new(FilterCriteria::new([MonsterSource::PublicCommunity]), None);

        assert!(query.matches(&shared));
        assert!(!query.matches(&private));
    }

    #[test]
    fn level_band_is_inclusive() {
        let query = MonsterQuery::new(FilterCriteria::default().with_levels(2, 4), None);
        assert!(!query.matches(&official("Rat", 1)));
        assert!(query.matches(&official("Wolf", 2)));
        assert!(query.matches(&official("Ogre", 4)));
        assert!(!query.matches(&official("Troll", 5)));
    }

    #[test]
    fn movement_matches_any_requested_type_in_speed() {
        let query = MonsterQuery::new(FilterCriteria::default().with_movement(["fly", "swim"]), None);
        let bat = official("Giant Bat", 1).with_speed("near, Fly far");
        let eel = official("Eel", 1).with_speed("near (swim)");
        let boar = official("Boar", 1).with_speed("near");
        let tagged = official("Kraken Spawn", 1).with_movement_types(vec!["swim".into()]);

        assert!(query.matches(&bat));
        assert!(query.matches(&eel));
        assert!(!query.matches(&boar));
        assert!(query.matches(&tagged));
    }

    #[test]
    fn search_checks_name_and_notes() {
        let query = MonsterQuery::new(FilterCriteria::default().with_search("  CRYPT "), None);
        let by_name = official("Crypt Thing", 3);
        let by_notes = official("Ghoul", 3).with_author_notes("Lurks in the old crypt");
        let miss = official("Ghoul", 3);

        assert!(query.matches(&by_name));
        assert!(query.matches(&by_notes));
        assert!(!query.matches(&miss));
    }

    #[test]
    fn restriction_replaces_source_check_but_keeps_other_filters() {
        let owner = UserId::new();
        let fav = MonsterRecord::custom(UserId::new(), "Someone's Wyrm", 9, Utc::now());
        let low = official("Kobold", 1);
        let criteria = FilterCriteria::new([MonsterSource::Favorites]).with_levels(5, 10);
        let query = MonsterQuery::new(criteria, Some(owner))
            .restricted_to([fav.id, low.id].into_iter().collect());

        assert!(query.matches(&fav));
        assert!(!query.matches(&low));
        assert!(!query.matches(&official("Dragon", 9)));
    }

    #[test]
    fn excluded_ids_never_match() {
        let goblin = official("Goblin", 1);
        let query = MonsterQuery::new(FilterCriteria::default(), None).excluding([goblin.id]);
        assert!(!query.matches(&goblin));
    }
}
