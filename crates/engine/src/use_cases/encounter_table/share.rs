//! Toggle public visibility.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shadowtables_domain::{EncounterTableId, PublicSlug, UserId};

use crate::infrastructure::ports::{ClockPort, EncounterTableRepo};

use super::error::EncounterTableError;
use super::owned_table;
use super::slug::SlugGenerator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareResult {
    pub is_public: bool,
    pub slug: Option<PublicSlug>,
}

/// Makes a table public under a fresh slug, or private again.
///
/// Sharing an already public table keeps its slug so existing links stay
/// valid. Making a table private drops the slug for good.
pub struct ShareEncounterTable {
    tables: Arc<dyn EncounterTableRepo>,
    slugs: Arc<SlugGenerator>,
    clock: Arc<dyn ClockPort>,
}

impl ShareEncounterTable {
    pub fn new(
        tables: Arc<dyn EncounterTableRepo>,
        slugs: Arc<SlugGenerator>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            tables,
            slugs,
            clock,
        }
    }

    pub async fn execute(
        &self,
        owner: UserId,
        table_id: EncounterTableId,
        public: bool,
    ) -> Result<ShareResult, EncounterTableError> {
        let mut table = owned_table(self.tables.as_ref(), table_id, owner).await?;

        match (public, table.public_slug().cloned()) {
            (true, Some(slug)) => {
                return Ok(ShareResult {
                    is_public: true,
                    slug: Some(slug),
                })
            }
            (true, None) => {
                let slug = self.slugs.generate_unique().await?;
                table.make_public(slug, self.clock.now());
            }
            (false, _) => {
                if !table.is_public() {
                    return Ok(ShareResult {
                        is_public: false,
                        slug: None,
                    });
                }
                table.make_private(self.clock.now());
            }
        }

        self.tables.save(&table).await?;
        tracing::info!(
            table_id = %table_id,
            is_public = table.is_public(),
            "Changed encounter table visibility"
        );
        Ok(ShareResult {
            is_public: table.is_public(),
            slug: table.public_slug().cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedRandom, SequenceRandom};
    use crate::infrastructure::ports::RandomPort;
    use crate::test_fixtures::engine::TestEngine;
    use crate::test_fixtures::monsters::fixed_now;
    use crate::test_fixtures::tables::sample_table;

    fn use_case(engine: &TestEngine, random: Arc<dyn RandomPort>) -> ShareEncounterTable {
        ShareEncounterTable::new(
            engine.tables.clone(),
            Arc::new(SlugGenerator::new(engine.tables.clone(), random)),
            engine.clock.clone(),
        )
    }

    #[tokio::test]
    async fn publishing_assigns_a_slug_and_is_idempotent() {
        let engine = TestEngine::new();
        let owner = UserId::new();
        let table = sample_table(owner, 6, fixed_now());
        engine.tables.save(&table).await.unwrap();
        let share = use_case(&engine, Arc::new(FixedRandom(0)));

        let first = share.execute(owner, table.id, true).await.unwrap();
        assert!(first.is_public);
        assert_eq!(first.slug.as_ref().map(|s| s.as_str()), Some("AAAAAAAA"));

        let again = share.execute(owner, table.id, true).await.unwrap();
        assert_eq!(again, first);

        let stored = engine.tables.get(table.id).await.unwrap().unwrap();
        assert!(stored.is_public());
        assert_eq!(stored.public_slug(), first.slug.as_ref());
    }

    #[tokio::test]
    async fn unpublishing_clears_the_slug() {
        let engine = TestEngine::new();
        let owner = UserId::new();
        let mut table = sample_table(owner, 6, fixed_now());
        table.make_public(PublicSlug::new("abcdEFGH").unwrap(), fixed_now());
        engine.tables.save(&table).await.unwrap();

        let result = use_case(&engine, Arc::new(FixedRandom(0)))
            .execute(owner, table.id, false)
            .await
            .unwrap();

        assert_eq!(
            result,
            ShareResult {
                is_public: false,
                slug: None
            }
        );
        let slug = PublicSlug::new("abcdEFGH").unwrap();
        assert!(engine.tables.get_by_slug(&slug).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn colliding_slug_is_retried() {
        let engine = TestEngine::new();
        let mut taken = sample_table(UserId::new(), 6, fixed_now());
        taken.make_public(PublicSlug::new("AAAAAAAA").unwrap(), fixed_now());
        engine.tables.save(&taken).await.unwrap();

        let owner = UserId::new();
        let table = sample_table(owner, 6, fixed_now());
        engine.tables.save(&table).await.unwrap();

        // Eight zeros collide, the next eight ones give "BBBBBBBB".
        let mut script = vec![0; 8];
        script.extend(vec![1; 8]);
        let result = use_case(&engine, Arc::new(SequenceRandom::new(script)))
            .execute(owner, table.id, true)
            .await
            .unwrap();

        assert_eq!(result.slug.map(|s| s.as_str().to_string()), Some("BBBBBBBB".into()));
    }

    #[tokio::test]
    async fn only_owner_may_share() {
        let engine = TestEngine::new();
        let table = sample_table(UserId::new(), 6, fixed_now());
        engine.tables.save(&table).await.unwrap();

        let result = use_case(&engine, Arc::new(FixedRandom(0)))
            .execute(UserId::new(), table.id, true)
            .await;
        assert!(matches!(result, Err(EncounterTableError::Forbidden(_))));
    }
}
