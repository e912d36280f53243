//! Connection-string descriptors and their resolved form.
//!
//! A descriptor follows `designator[+variant]://host[:port][/path][?query]`.
//! Parsing splits it into parts without interpreting the designator;
//! registry lookup and rewriting happen in the services layer, which owns
//! the designator table.

use super::{Designator, EndpointRules, PinningDomainError};
use std::fmt;
use url::Url;

/// Parsed descriptor supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    raw: String,
    scheme: String,
    host: String,
    port: Option<u16>,
    tail: String,
}

impl Descriptor {
    /// Parses a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`PinningDomainError::MalformedDescriptor`] when the `://`
    /// separator, the scheme, or the host is missing, or the port is not a
    /// valid `u16`.
    pub fn parse(raw: impl Into<String>) -> Result<Self, PinningDomainError> {
        let raw_descriptor = raw.into().trim().to_owned();
        let (scheme, rest) = raw_descriptor
            .split_once("://")
            .ok_or_else(|| PinningDomainError::malformed(&raw_descriptor, "missing '://'"))?;
        if scheme.is_empty() {
            return Err(PinningDomainError::malformed(&raw_descriptor, "missing scheme"));
        }

        let (authority, tail) = rest
            .find(['/', '?', '#'])
            .map_or((rest, ""), |index| rest.split_at(index));
        let (host, port) = split_authority(&raw_descriptor, authority)?;

        Ok(Self {
            scheme: scheme.to_owned(),
            host,
            port,
            tail: tail.to_owned(),
            raw: raw_descriptor,
        })
    }

    /// Returns the descriptor exactly as supplied (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the full scheme segment, including any `+variant` suffix.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the designator part of the scheme (before `+`).
    #[must_use]
    pub fn designator_segment(&self) -> &str {
        self.scheme
            .split_once('+')
            .map_or(self.scheme.as_str(), |(designator, _)| designator)
    }

    /// Returns the variant part of the scheme (after `+`), if any.
    #[must_use]
    pub fn variant(&self) -> Option<&str> {
        self.scheme.split_once('+').map(|(_, variant)| variant)
    }

    /// Returns the host, with brackets for IPv6 literals.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the explicit port, if the descriptor named one.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns path, query and fragment, verbatim.
    #[must_use]
    pub fn tail(&self) -> &str {
        &self.tail
    }

    /// Rewrites the descriptor into a backend connection string using a
    /// designator's rule table.
    ///
    /// An explicit port wins over the rule's default. Returns `None` when
    /// the descriptor carries a variant the table does not know.
    #[must_use]
    pub fn rewrite(&self, rules: &EndpointRules) -> Option<String> {
        let rule = match self.variant() {
            None => rules.plain(),
            Some(variant) => rules.variant(variant)?,
        };
        let port = self.port.unwrap_or(rule.default_port());
        Some(format!(
            "{}://{}:{}{}",
            rule.scheme(),
            self.host,
            port,
            self.tail
        ))
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.raw)
    }
}

fn split_authority(
    descriptor: &str,
    authority: &str,
) -> Result<(String, Option<u16>), PinningDomainError> {
    let (host, port_text) = if let Some(bracketed) = authority.strip_prefix('[') {
        let (inner, after) = bracketed
            .split_once(']')
            .ok_or_else(|| PinningDomainError::malformed(descriptor, "unclosed IPv6 host"))?;
        let port_text = if after.is_empty() {
            None
        } else {
            Some(after.strip_prefix(':').ok_or_else(|| {
                PinningDomainError::malformed(descriptor, "unexpected text after IPv6 host")
            })?)
        };
        (format!("[{inner}]"), port_text)
    } else {
        authority.rsplit_once(':').map_or_else(
            || (authority.to_owned(), None),
            |(host, port_text)| (host.to_owned(), Some(port_text)),
        )
    };

    if host.is_empty() || host == "[]" {
        return Err(PinningDomainError::malformed(descriptor, "missing host"));
    }

    let port = port_text
        .map(|text| {
            text.parse::<u16>().map_err(|_| {
                PinningDomainError::malformed(descriptor, format!("invalid port '{text}'"))
            })
        })
        .transpose()?;
    Ok((host, port))
}

/// A descriptor after registry lookup and rewriting.
///
/// This is what a backend factory receives: the designator that selected
/// it and a connection string in the backend's own URL form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDescriptor {
    designator: Designator,
    variant: Option<String>,
    connection_string: String,
}

impl ResolvedDescriptor {
    /// Creates a resolved descriptor, checking the connection string is a
    /// well-formed URL.
    ///
    /// # Errors
    ///
    /// Returns [`PinningDomainError::InvalidConnectionString`] when the
    /// `url` parser rejects the connection string.
    pub fn new(
        designator: Designator,
        variant: Option<String>,
        connection_string: impl Into<String>,
    ) -> Result<Self, PinningDomainError> {
        let connection = connection_string.into();
        Url::parse(&connection).map_err(|err| PinningDomainError::InvalidConnectionString {
            connection_string: connection.clone(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            designator,
            variant,
            connection_string: connection,
        })
    }

    /// Returns the designator that selected the backend factory.
    #[must_use]
    pub const fn designator(&self) -> &Designator {
        &self.designator
    }

    /// Returns the transport variant, if the descriptor named one.
    #[must_use]
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Returns the backend connection string.
    #[must_use]
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}
