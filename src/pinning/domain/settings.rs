//! Deserializable pinning settings.

use serde::{Deserialize, Serialize};

/// The list of descriptors an aggregation is built from.
///
/// Hosts embed this in their own configuration; loading it from files or
/// the command line is left to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinningSettings {
    #[serde(default)]
    descriptors: Vec<String>,
}

impl PinningSettings {
    /// Creates settings from descriptors, keeping their order.
    #[must_use]
    pub fn new(descriptors: impl IntoIterator<Item = String>) -> Self {
        Self {
            descriptors: descriptors.into_iter().collect(),
        }
    }

    /// Parses a comma-separated descriptor list, as passed through a single
    /// flag or environment variable. Blank entries are skipped.
    #[must_use]
    pub fn from_comma_separated(value: &str) -> Self {
        Self::new(
            value
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_owned),
        )
    }

    /// Returns the descriptors in configured order.
    #[must_use]
    pub fn descriptors(&self) -> &[String] {
        &self.descriptors
    }

    /// Returns `true` when no descriptor is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
