//! Adapter implementations for the pinning ports.

pub mod memory;

mod ipfs;
mod powergate;

pub use ipfs::{IPFS_DESIGNATOR, IpfsPinning, IpfsPinningFactory};
pub use powergate::{POWERGATE_DESIGNATOR, PowergatePinning, PowergatePinningFactory};

use crate::pinning::ports::PinningFactory;
use std::sync::Arc;

/// Returns the factories registered by default: `ipfs` and `powergate`.
#[must_use]
pub fn builtin_factories() -> Vec<Arc<dyn PinningFactory>> {
    vec![
        Arc::new(IpfsPinningFactory::new()),
        Arc::new(PowergatePinningFactory::new()),
    ]
}
