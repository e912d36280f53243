//! Port contracts for pinning aggregation.
//!
//! Ports define the capability every backend satisfies, the factory
//! contract the registry resolves designators to, and the low-level client
//! seams the built-in backends talk through.

mod backend;
mod client;
mod context;
mod factory;

pub use backend::{Pinning, PinningBackendError, PinningBackendResult};
#[cfg(test)]
pub(crate) use client::{MockIpfsApi, MockPowergateApi, MockPowergateConnector};
pub use client::{IpfsApi, PowergateApi, PowergateConnector, PowergateJobStatus};
pub use context::PinningContext;
pub use factory::PinningFactory;
