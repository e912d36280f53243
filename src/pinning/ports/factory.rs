//! Backend factory contract resolved through the registry.

use super::{Pinning, PinningBackendResult, PinningContext};
use crate::pinning::domain::{Designator, EndpointRules};
use async_trait::async_trait;
use std::sync::Arc;

/// Constructs backend instances for one designator.
#[async_trait]
pub trait PinningFactory: Send + Sync {
    /// Registry key this factory answers to.
    fn designator(&self) -> &Designator;

    /// Rewrite table applied to descriptors before [`PinningFactory::build`].
    ///
    /// Factories without a table receive descriptors verbatim and accept no
    /// `+variant` suffix.
    fn endpoint_rules(&self) -> Option<&EndpointRules> {
        None
    }

    /// Builds a backend from a resolved connection string.
    ///
    /// # Errors
    ///
    /// Returns [`PinningBackendError`](super::PinningBackendError) when the
    /// connection string is malformed for this backend or the service is
    /// unreachable.
    async fn build(
        &self,
        connection_string: &str,
        context: &PinningContext,
    ) -> PinningBackendResult<Arc<dyn Pinning>>;
}
