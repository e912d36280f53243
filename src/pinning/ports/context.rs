//! Shared context handed to every backend factory.

use super::{IpfsApi, PowergateConnector};
use std::fmt;
use std::sync::Arc;

/// Process-wide handles shared by reference across all backends.
///
/// The aggregator never mutates the context; backends take what they need
/// and ignore the rest.
#[derive(Clone, Default)]
pub struct PinningContext {
    ipfs: Option<Arc<dyn IpfsApi>>,
    powergate: Option<Arc<dyn PowergateConnector>>,
}

impl PinningContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shared IPFS client.
    #[must_use]
    pub fn with_ipfs(mut self, ipfs: Arc<dyn IpfsApi>) -> Self {
        self.ipfs = Some(ipfs);
        self
    }

    /// Sets the connector Powergate backends open sessions through.
    #[must_use]
    pub fn with_powergate(mut self, connector: Arc<dyn PowergateConnector>) -> Self {
        self.powergate = Some(connector);
        self
    }

    /// Returns the shared IPFS client, if any.
    #[must_use]
    pub const fn ipfs(&self) -> Option<&Arc<dyn IpfsApi>> {
        self.ipfs.as_ref()
    }

    /// Returns the Powergate connector, if any.
    #[must_use]
    pub const fn powergate(&self) -> Option<&Arc<dyn PowergateConnector>> {
        self.powergate.as_ref()
    }
}

impl fmt::Debug for PinningContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PinningContext")
            .field("ipfs", &self.ipfs.is_some())
            .field("powergate", &self.powergate.is_some())
            .finish()
    }
}
