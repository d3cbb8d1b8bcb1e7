//! Validated text newtypes for encounter tables
//!
//! These newtypes ensure that values are valid by construction:
//! - Within length limits
//! - Trimmed of leading/trailing whitespace
//! - Slugs restricted to URL-safe characters

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

const MIN_TABLE_NAME_LENGTH: usize = 3;
/// Longest table name in characters
pub const MAX_TABLE_NAME_LENGTH: usize = 100;
const MAX_TABLE_DESCRIPTION_LENGTH: usize = 500;

/// Length of a public share slug
pub const PUBLIC_SLUG_LENGTH: usize = 8;

/// Characters a public slug may contain
pub const PUBLIC_SLUG_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

// ============================================================================
// TableName
// ============================================================================

/// A validated encounter table name (3..=100 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName(String);

impl TableName {
    /// Create a new validated table name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is shorter than
    /// 3 or longer than 100 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        let len = trimmed.chars().count();
        if len < MIN_TABLE_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Table name must be at least {} characters",
                MIN_TABLE_NAME_LENGTH
            )));
        }
        if len > MAX_TABLE_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Table name cannot exceed {} characters",
                MAX_TABLE_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for TableName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<TableName> for String {
    fn from(name: TableName) -> String {
        name.0
    }
}

// ============================================================================
// TableDescription
// ============================================================================

/// A validated table description (<=500 chars, trimmed, may be empty)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableDescription(String);

impl TableDescription {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed description exceeds
    /// 500 characters.
    pub fn new(description: impl Into<String>) -> Result<Self, DomainError> {
        let description = description.into();
        let trimmed = description.trim();
        if trimmed.chars().count() > MAX_TABLE_DESCRIPTION_LENGTH {
            return Err(DomainError::validation(format!(
                "Description cannot exceed {} characters",
                MAX_TABLE_DESCRIPTION_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TableDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for TableDescription {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<TableDescription> for String {
    fn from(description: TableDescription) -> String {
        description.0
    }
}

// ============================================================================
// PublicSlug
// ============================================================================

/// Share token for a public table: exactly 8 chars of `A-Za-z0-9_-`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicSlug(String);

impl PublicSlug {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless the slug is exactly 8
    /// URL-safe characters.
    pub fn new(slug: impl Into<String>) -> Result<Self, DomainError> {
        let slug = slug.into();
        if slug.len() != PUBLIC_SLUG_LENGTH {
            return Err(DomainError::validation(format!(
                "Public slug must be exactly {} characters",
                PUBLIC_SLUG_LENGTH
            )));
        }
        if !slug.bytes().all(|b| PUBLIC_SLUG_ALPHABET.contains(&b)) {
            return Err(DomainError::validation(
                "Public slug may only contain A-Z, a-z, 0-9, '_' and '-'",
            ));
        }
        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PublicSlug {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PublicSlug> for String {
    fn from(slug: PublicSlug) -> String {
        slug.0
    }
}
