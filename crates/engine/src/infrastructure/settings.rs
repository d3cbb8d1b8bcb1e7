//! Engine settings read from the environment.
//!
//! Every value has a default; an unparsable or out-of-range value is logged
//! and replaced by its default rather than aborting startup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use shadowtables_domain::{MAX_DIE_SIZE, MIN_DIE_SIZE};

use crate::use_cases::encounter::DEFAULT_FETCH_OVERSAMPLE;

pub const ENV_CATALOG: &str = "SHADOWTABLES_CATALOG";
pub const ENV_FETCH_OVERSAMPLE: &str = "SHADOWTABLES_FETCH_OVERSAMPLE";
pub const ENV_SLUG_ATTEMPTS: &str = "SHADOWTABLES_SLUG_ATTEMPTS";
pub const ENV_PREVIEW_DIE_SIZE: &str = "SHADOWTABLES_PREVIEW_DIE_SIZE";

/// Largest accepted oversample factor.
const MAX_FETCH_OVERSAMPLE: usize = 50;
const MAX_SLUG_ATTEMPTS: u32 = 100;

fn default_fetch_oversample() -> usize {
    DEFAULT_FETCH_OVERSAMPLE
}

fn default_slug_attempts() -> u32 {
    5
}

fn default_preview_die_size() -> u32 {
    6
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// JSON monster catalog to load at startup
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Candidates fetched per requested monster
    #[serde(default = "default_fetch_oversample")]
    pub fetch_oversample: usize,

    /// Public slug generation attempts before giving up
    #[serde(default = "default_slug_attempts")]
    pub slug_attempts: u32,

    /// Die size of the table the binary previews
    #[serde(default = "default_preview_die_size")]
    pub preview_die_size: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            catalog_path: None,
            fetch_oversample: default_fetch_oversample(),
            slug_attempts: default_slug_attempts(),
            preview_die_size: default_preview_die_size(),
        }
    }
}

impl EngineSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns the raw value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let catalog_path = lookup(ENV_CATALOG)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Self {
            catalog_path,
            fetch_oversample: parse_bounded(
                &lookup,
                ENV_FETCH_OVERSAMPLE,
                1,
                MAX_FETCH_OVERSAMPLE,
                defaults.fetch_oversample,
            ),
            slug_attempts: parse_bounded(
                &lookup,
                ENV_SLUG_ATTEMPTS,
                1,
                MAX_SLUG_ATTEMPTS,
                defaults.slug_attempts,
            ),
            preview_die_size: parse_bounded(
                &lookup,
                ENV_PREVIEW_DIE_SIZE,
                MIN_DIE_SIZE,
                MAX_DIE_SIZE,
                defaults.preview_die_size,
            ),
        }
    }
}

fn parse_bounded<F, T>(lookup: &F, key: &str, min: T, max: T, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Copy + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if value >= min && value <= max => value,
        Ok(value) => {
            tracing::warn!(
                key,
                value = %value,
                min = %min,
                max = %max,
                default = %default,
                "Setting out of range, using default"
            );
            default
        }
        Err(_) => {
            tracing::warn!(
                key,
                raw = %raw,
                default = %default,
                "Setting is not a number, using default"
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> EngineSettings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(settings_from(&[]), EngineSettings::default());
        let defaults = EngineSettings::default();
        assert_eq!(defaults.fetch_oversample, 2);
        assert_eq!(defaults.slug_attempts, 5);
        assert_eq!(defaults.preview_die_size, 6);
    }

    #[test]
    fn reads_every_variable() {
        let settings = settings_from(&[
            (ENV_CATALOG, "/srv/catalog.json"),
            (ENV_FETCH_OVERSAMPLE, "3"),
            (ENV_SLUG_ATTEMPTS, " 8 "),
            (ENV_PREVIEW_DIE_SIZE, "20"),
        ]);

        assert_eq!(
            settings.catalog_path,
            Some(PathBuf::from("/srv/catalog.json"))
        );
        assert_eq!(settings.fetch_oversample, 3);
        assert_eq!(settings.slug_attempts, 8);
        assert_eq!(settings.preview_die_size, 20);
    }

    #[test]
    fn invalid_values_fall_back() {
        let settings = settings_from(&[
            (ENV_CATALOG, "   "),
            (ENV_FETCH_OVERSAMPLE, "0"),
            (ENV_SLUG_ATTEMPTS, "lots"),
            (ENV_PREVIEW_DIE_SIZE, "1"),
        ]);

        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn deserializes_with_defaults() {
        let settings: EngineSettings = serde_json::from_str(r#"{"slug_attempts": 9}"#).unwrap();
        assert_eq!(settings.slug_attempts, 9);
        assert_eq!(settings.fetch_oversample, 2);
        assert!(settings.catalog_path.is_none());
    }
}
