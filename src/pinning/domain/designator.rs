//! Backend designator value type.

use super::PinningDomainError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Short, case-sensitive name identifying a backend family.
///
/// Designators are registry keys and the scheme of a descriptor, so they
/// may only contain characters valid in a URL scheme: ASCII alphanumerics,
/// `-` and `.`. The `+` separator is reserved for variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Designator(String);

impl Designator {
    /// Creates a validated designator. The input is not normalized;
    /// designator lookup is exact.
    ///
    /// # Errors
    ///
    /// Returns [`PinningDomainError`] when validation fails.
    pub fn new(value: impl Into<String>) -> Result<Self, PinningDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(PinningDomainError::EmptyDesignator);
        }

        let is_valid = raw.chars().all(|character| {
            character.is_ascii_alphanumeric() || character == '-' || character == '.'
        });
        if !is_valid {
            return Err(PinningDomainError::InvalidDesignator(raw));
        }

        Ok(Self(raw))
    }

    /// Creates a designator from a compile-time constant already known to
    /// be valid.
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_owned())
    }

    /// Returns the designator as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Designator {
    type Error = PinningDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Designator> for String {
    fn from(value: Designator) -> Self {
        value.0
    }
}

impl AsRef<str> for Designator {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Designator {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Designator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
