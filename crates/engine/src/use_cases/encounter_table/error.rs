//! Encounter table lifecycle errors.

use shadowtables_domain::{DomainError, EncounterTableId};

use crate::infrastructure::ports::RepoError;
use crate::use_cases::encounter::EncounterError;

/// Errors that can occur while managing encounter tables.
#[derive(Debug, thiserror::Error)]
pub enum EncounterTableError {
    #[error("Encounter table not found: {0}")]
    TableNotFound(EncounterTableId),
    #[error("Public encounter table not found: {0}")]
    PublicTableNotFound(String),
    #[error("Not allowed to access encounter table {0}")]
    Forbidden(EncounterTableId),
    #[error("No entry at roll {roll_number} of table {table_id}")]
    EntryNotFound {
        table_id: EncounterTableId,
        roll_number: u32,
    },
    #[error("Roll {roll_number} is outside 1..={die_size}")]
    RollOutOfRange { roll_number: u32, die_size: u32 },
    #[error("Could not generate a unique public slug after {attempts} attempts")]
    SlugGenerationExhausted { attempts: u32 },
    #[error("Table {0} has no entries to copy")]
    NothingToCopy(EncounterTableId),
    #[error("Table {0} already belongs to the caller")]
    CopyOwnTable(EncounterTableId),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Generation failed: {0}")]
    Encounter(#[from] EncounterError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl EncounterTableError {
    /// Text suitable for showing to the caller.
    pub fn user_message(&self) -> String {
        match self {
            Self::TableNotFound(_) => "Encounter table not found".to_string(),
            Self::PublicTableNotFound(_) => {
                "Public encounter table not found; it may be private or the link may be invalid"
                    .to_string()
            }
            Self::Forbidden(_) => "You do not have access to this table".to_string(),
            Self::EntryNotFound { roll_number, .. } => {
                format!("No entry found for roll {}", roll_number)
            }
            Self::RollOutOfRange {
                roll_number,
                die_size,
            } => format!(
                "Roll {} is invalid for a d{}; choose 1 to {}",
                roll_number, die_size, die_size
            ),
            Self::SlugGenerationExhausted { .. } => {
                "Failed to generate a public link. Please try again.".to_string()
            }
            Self::NothingToCopy(_) => "This table has no entries to copy".to_string(),
            Self::CopyOwnTable(_) => "This table already belongs to you".to_string(),
            Self::Validation(DomainError::Validation(msg))
            | Self::Validation(DomainError::Parse(msg)) => msg.clone(),
            Self::Validation(DomainError::InvalidId(msg)) => format!("Invalid ID: {}", msg),
            Self::Encounter(err) => err.user_message(),
            Self::Repo(_) => "Something went wrong while saving the table".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encounter_messages_pass_through() {
        let err = EncounterTableError::from(EncounterError::InsufficientPool {
            required: 20,
            available: 12,
        });
        assert_eq!(
            err.user_message(),
            "Only 12 monsters match your filters; you asked for 20"
        );
    }

    #[test]
    fn roll_out_of_range_names_the_die() {
        let err = EncounterTableError::RollOutOfRange {
            roll_number: 9,
            die_size: 8,
        };
        assert_eq!(err.user_message(), "Roll 9 is invalid for a d8; choose 1 to 8");
    }
}
