//! Error types for pinning domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing pinning domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PinningDomainError {
    /// The content identifier is empty.
    #[error("content identifier must not be empty")]
    EmptyContentId,

    /// The content identifier contains whitespace.
    #[error("content identifier '{0}' contains whitespace")]
    InvalidContentId(String),

    /// The designator is empty.
    #[error("pinning designator must not be empty")]
    EmptyDesignator,

    /// The designator contains characters a URL scheme cannot carry.
    #[error("pinning designator '{0}' contains invalid characters")]
    InvalidDesignator(String),

    /// The descriptor does not follow `designator[+variant]://host[:port]`.
    #[error("malformed pinning descriptor '{descriptor}': {reason}")]
    MalformedDescriptor {
        /// The descriptor as supplied by the caller.
        descriptor: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The rewritten connection string is not a valid URL.
    #[error("connection string '{connection_string}' is not a valid URL: {reason}")]
    InvalidConnectionString {
        /// The rewritten connection string.
        connection_string: String,
        /// Parser diagnostic.
        reason: String,
    },
}

impl PinningDomainError {
    pub(crate) fn malformed(descriptor: &str, reason: impl Into<String>) -> Self {
        Self::MalformedDescriptor {
            descriptor: descriptor.to_owned(),
            reason: reason.into(),
        }
    }
}
