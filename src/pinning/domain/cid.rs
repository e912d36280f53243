//! Content identifier value type.

use super::PinningDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, backend-agnostic content address.
///
/// Any multibase encoding is accepted (`Qm...`, `bafy...`, base64 `m...`,
/// base64url `u...`). The value is stored exactly as given; only empty
/// values and values containing whitespace are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentId(String);

impl ContentId {
    /// Creates a content identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PinningDomainError::EmptyContentId`] when the value is
    /// empty, or [`PinningDomainError::InvalidContentId`] when it contains
    /// whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, PinningDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(PinningDomainError::EmptyContentId);
        }

        if raw.chars().any(char::is_whitespace) {
            return Err(PinningDomainError::InvalidContentId(raw));
        }

        Ok(Self(raw))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContentId {
    type Error = PinningDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContentId> for String {
    fn from(value: ContentId) -> Self {
        value.0
    }
}

impl AsRef<str> for ContentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
