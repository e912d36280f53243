//! Domain model for pinning aggregation.
//!
//! The pinning domain models content identifiers, backend designators,
//! connection-string descriptors and their rewrite rules, and the merged
//! listing and info views reported by backends. Infrastructure concerns
//! remain outside this boundary.

mod cid;
mod descriptor;
mod designator;
mod endpoint;
mod error;
mod listing;
mod settings;

pub use cid::ContentId;
pub use descriptor::{Descriptor, ResolvedDescriptor};
pub use designator::Designator;
pub use endpoint::{EndpointRules, TransportRule};
pub use error::PinningDomainError;
pub use listing::{CidList, PinningInfo};
pub use settings::PinningSettings;
