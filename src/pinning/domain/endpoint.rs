//! Designator-specific rewrite rules applied by the descriptor resolver.

use std::collections::BTreeMap;

/// Scheme and default port a descriptor is rewritten to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRule {
    scheme: String,
    default_port: u16,
}

impl TransportRule {
    /// Creates a transport rule.
    #[must_use]
    pub fn new(scheme: impl Into<String>, default_port: u16) -> Self {
        Self {
            scheme: scheme.into(),
            default_port,
        }
    }

    /// Returns the scheme the backend connection string uses.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the port used when the descriptor names none.
    #[must_use]
    pub const fn default_port(&self) -> u16 {
        self.default_port
    }
}

/// Rewrite table for one designator.
///
/// The plain rule applies to `designator://...`; each variant rule applies
/// to `designator+variant://...`. A variant's default port is the plain
/// port shifted by a designator-specific offset, so two designators can
/// map the same variant to different ports.
///
/// ```
/// use pinning_aggregation::pinning::domain::EndpointRules;
///
/// let rules = EndpointRules::new("http", 5002)
///     .with_variant("http", "http", 0)
///     .with_variant("https", "https", 1000);
/// assert_eq!(rules.variant("https").map(|rule| rule.default_port()), Some(6002));
/// assert!(rules.variant("quic").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRules {
    plain: TransportRule,
    variants: BTreeMap<String, TransportRule>,
}

impl EndpointRules {
    /// Creates a table with only the plain rule.
    #[must_use]
    pub fn new(scheme: impl Into<String>, default_port: u16) -> Self {
        Self {
            plain: TransportRule::new(scheme, default_port),
            variants: BTreeMap::new(),
        }
    }

    /// Adds a variant whose default port is `port_offset` above the plain
    /// default port. Re-adding a variant replaces it.
    #[must_use]
    pub fn with_variant(
        mut self,
        variant: impl Into<String>,
        scheme: impl Into<String>,
        port_offset: u16,
    ) -> Self {
        let port = self.plain.default_port.saturating_add(port_offset);
        self.variants
            .insert(variant.into(), TransportRule::new(scheme, port));
        self
    }

    /// Returns the rule for descriptors without a variant.
    #[must_use]
    pub const fn plain(&self) -> &TransportRule {
        &self.plain
    }

    /// Returns the rule for a named variant, if the table knows it.
    #[must_use]
    pub fn variant(&self, variant: &str) -> Option<&TransportRule> {
        self.variants.get(variant)
    }
}
