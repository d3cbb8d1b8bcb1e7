//! JSON monster catalog loading.
//!
//! A catalog file holds the monsters and, optionally, each user's favorites:
//!
//! ```json
//! {
//!   "monsters": [ { "id": "...", "name": "Ghoul", "origin": "official", ... } ],
//!   "favorites": [ { "user_id": "...", "monster_ids": ["..."] } ]
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shadowtables_domain::{MonsterId, MonsterRecord, UserId};
use thiserror::Error;
use tokio::fs;

use super::memory::InMemoryMonsterRepo;

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoriteList {
    pub user_id: UserId,
    #[serde(default)]
    pub monster_ids: Vec<MonsterId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterCatalog {
    #[serde(default)]
    pub monsters: Vec<MonsterRecord>,
    #[serde(default)]
    pub favorites: Vec<FavoriteList>,
}

impl MonsterCatalog {
    pub fn parse(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    /// Move the catalog into an in-memory repository.
    ///
    /// Later duplicates of a monster id are dropped, as are favorites that
    /// point at monsters the catalog does not contain.
    pub fn into_repo(self) -> InMemoryMonsterRepo {
        let repo = InMemoryMonsterRepo::new();
        let mut known = HashSet::with_capacity(self.monsters.len());

        for record in self.monsters {
            if !known.insert(record.id) {
                tracing::warn!(monster_id = %record.id, name = %record.name, "Duplicate monster id in catalog, skipping");
                continue;
            }
            repo.insert(record);
        }

        for list in self.favorites {
            for monster_id in list.monster_ids {
                if known.contains(&monster_id) {
                    repo.add_favorite(list.user_id, monster_id);
                } else {
                    tracing::warn!(
                        user_id = %list.user_id,
                        monster_id = %monster_id,
                        "Favorite points at unknown monster, skipping"
                    );
                }
            }
        }

        tracing::info!(monsters = repo.len(), "Loaded monster catalog");
        repo
    }
}
