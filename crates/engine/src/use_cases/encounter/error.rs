//! Encounter generation errors.

use shadowtables_domain::{DomainError, MonsterId, MAX_DIE_SIZE, MIN_DIE_SIZE};

use crate::infrastructure::ports::RepoError;

/// Errors surfaced by sampling, generation and replacement.
///
/// None of these are retried inside the engine: pool exhaustion is a fact
/// about the catalog, not a transient fault.
#[derive(Debug, thiserror::Error)]
pub enum EncounterError {
    #[error("Die size must be between 2 and 1000, got {0}")]
    InvalidDieSize(u32),
    #[error("Sample count must be at least 1")]
    InvalidCount,
    #[error("Invalid filter: {0}")]
    InvalidFilter(DomainError),
    #[error("Favorites require an authenticated user")]
    Unauthenticated,
    #[error("No favorite monsters to draw from")]
    EmptyFavorites,
    #[error("Insufficient monsters: {required} required, {available} available")]
    InsufficientPool { required: usize, available: usize },
    #[error("No available monsters match the table filters")]
    NoAvailableCandidates,
    #[error("Monster {0} is already in the table")]
    DuplicateInTable(MonsterId),
    #[error("Monster not found: {0}")]
    MonsterNotFound(MonsterId),
    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl EncounterError {
    /// Text suitable for showing to the person who asked for the table.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidDieSize(_) => {
                format!("Die size must be between {} and {}", MIN_DIE_SIZE, MAX_DIE_SIZE)
            }
            Self::InvalidCount => "At least one monster must be requested".to_string(),
            Self::InvalidFilter(err) => match err {
                DomainError::Validation(msg) | DomainError::Parse(msg) => msg.clone(),
                DomainError::InvalidId(msg) => format!("Invalid ID: {}", msg),
            },
            Self::Unauthenticated => "Sign in to draw from your favorites".to_string(),
            Self::EmptyFavorites => "You have no favorite monsters yet".to_string(),
            Self::InsufficientPool {
                required,
                available,
            } => format!(
                "Only {} monsters match your filters; you asked for {}",
                available, required
            ),
            Self::NoAvailableCandidates => {
                "No other monsters match this table's filters".to_string()
            }
            Self::DuplicateInTable(_) => "This monster is already in the table".to_string(),
            Self::MonsterNotFound(_) => "Monster not found or inaccessible".to_string(),
            Self::InternalConsistency(_) | Self::Repo(_) => {
                "Something went wrong while building the table".to_string()
            }
        }
    }

    /// Whether the caller supplied something wrong, as opposed to a storage
    /// or engine failure.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::InternalConsistency(_) | Self::Repo(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_pool_message_names_both_counts() {
        let err = EncounterError::InsufficientPool {
            required: 20,
            available: 12,
        };
        assert_eq!(
            err.user_message(),
            "Only 12 monsters match your filters; you asked for 20"
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = EncounterError::InternalConsistency("duplicate ids".into());
        assert!(!err.user_message().contains("duplicate"));
        assert!(!err.is_client_error());
    }
}
