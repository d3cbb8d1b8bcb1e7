//! Die size for encounter tables
//!
//! The die a table is rolled with. Its face count is also the number of
//! entries the table holds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const MIN_DIE_SIZE: u32 = 2;
pub const MAX_DIE_SIZE: u32 = 1000;

/// A validated die size in `2..=1000`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DieSize(u32);

impl DieSize {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when `faces` is outside `2..=1000`.
    pub fn new(faces: u32) -> Result<Self, DomainError> {
        if !(MIN_DIE_SIZE..=MAX_DIE_SIZE).contains(&faces) {
            return Err(DomainError::validation(format!(
                "Die size must be between {} and {}",
                MIN_DIE_SIZE, MAX_DIE_SIZE
            )));
        }
        Ok(Self(faces))
    }

    pub fn faces(&self) -> u32 {
        self.0
    }

    /// Whether `roll` is a face of this die.
    pub fn contains(&self, roll: u32) -> bool {
        (1..=self.0).contains(&roll)
    }

    /// Roll numbers in table order, `1..=faces`.
    pub fn roll_numbers(&self) -> impl Iterator<Item = u32> {
        1..=self.0
    }
}

impl fmt::Display for DieSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}

impl TryFrom<u32> for DieSize {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DieSize> for u32 {
    fn from(value: DieSize) -> Self {
        value.0
    }
}
