//! Aggregated content pinning across heterogeneous pinning services.
//!
//! A caller describes each pinning service with a connection-string
//! descriptor such as `ipfs+https://example.com` or
//! `powergate://localhost:5002?token=...`. The module resolves every
//! descriptor to a concrete backend through an extensible factory registry
//! and fans pin, unpin, and lifecycle operations out to all of them. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
