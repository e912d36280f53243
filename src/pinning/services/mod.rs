//! Application services for pinning aggregation.

mod aggregation;
mod error;
mod fan_out;
mod registry;

pub use aggregation::PinningAggregation;
pub use error::{PinningAggregationError, PinningAggregationResult};
pub use registry::PinningFactoryRegistry;
