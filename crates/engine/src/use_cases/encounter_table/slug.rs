//! Public share slugs.

use std::sync::Arc;

use shadowtables_domain::{PublicSlug, PUBLIC_SLUG_ALPHABET, PUBLIC_SLUG_LENGTH};

use crate::infrastructure::ports::{EncounterTableRepo, RandomPort};

use super::error::EncounterTableError;

pub const DEFAULT_SLUG_ATTEMPTS: u32 = 5;

/// Generates slugs that no stored table uses yet.
pub struct SlugGenerator {
    tables: Arc<dyn EncounterTableRepo>,
    random: Arc<dyn RandomPort>,
    max_attempts: u32,
}

impl SlugGenerator {
    pub fn new(tables: Arc<dyn EncounterTableRepo>, random: Arc<dyn RandomPort>) -> Self {
        Self {
            tables,
            random,
            max_attempts: DEFAULT_SLUG_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Draw slugs until one is free.
    ///
    /// A failed uniqueness lookup consumes an attempt like a collision does.
    pub async fn generate_unique(&self) -> Result<PublicSlug, EncounterTableError> {
        for attempt in 1..=self.max_attempts {
            let slug = random_slug(self.random.as_ref())?;
            match self.tables.slug_exists(&slug).await {
                Ok(false) => return Ok(slug),
                Ok(true) => {
                    tracing::warn!(attempt, slug = %slug, "Public slug collision");
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Failed to check public slug uniqueness");
                }
            }
        }

        Err(EncounterTableError::SlugGenerationExhausted {
            attempts: self.max_attempts,
        })
    }
}

/// A random slug over the URL-safe alphabet.
pub fn random_slug(random: &dyn RandomPort) -> Result<PublicSlug, EncounterTableError> {
    let last = PUBLIC_SLUG_ALPHABET.len() as i32 - 1;
    let slug: String = (0..PUBLIC_SLUG_LENGTH)
        .map(|_| {
            let index = usize::try_from(random.gen_range(0, last)).unwrap_or(0);
            char::from(PUBLIC_SLUG_ALPHABET[index.min(PUBLIC_SLUG_ALPHABET.len() - 1)])
        })
        .collect();
    Ok(PublicSlug::new(slug)?)
}
