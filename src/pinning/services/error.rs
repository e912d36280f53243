//! Service-level errors for building pinning aggregations.

use crate::pinning::{domain::PinningDomainError, ports::PinningBackendError};
use thiserror::Error;

/// Errors returned while building a [`PinningAggregation`](super::PinningAggregation).
#[derive(Debug, Error)]
pub enum PinningAggregationError {
    /// No registered factory answers to the descriptor's scheme segment.
    ///
    /// Carries the full segment, variant included, as the caller wrote it.
    #[error("unknown pinning service: {0}")]
    UnknownPinningService(String),
    /// Descriptor parsing or validation failed.
    #[error(transparent)]
    Domain(#[from] PinningDomainError),
    /// A backend factory failed.
    #[error(transparent)]
    Backend(#[from] PinningBackendError),
}

/// Result type for aggregation service operations.
pub type PinningAggregationResult<T> = Result<T, PinningAggregationError>;
