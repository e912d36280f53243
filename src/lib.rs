//! Pinning aggregation: one logical pinning target over many services.
//!
//! This crate lets a caller treat a set of heterogeneous content-pinning
//! services (an IPFS node, a Powergate deal-making service, or any
//! third-party backend) as a single target. Pin, unpin, open and close are
//! issued once and fanned out to every configured backend.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure value types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for backends and their clients
//! - **Adapters**: Concrete backend implementations
//!
//! # Modules
//!
//! - [`pinning`]: Descriptor resolution, backend registry and aggregation

pub mod pinning;
