//! Pinning aggregation orchestrator.
//!
//! Provides [`PinningAggregation`], which builds one backend per descriptor
//! and fans capability operations out to all of them. `open`, `close`,
//! `pin`, `ls` and `info` fail with the first backend error observed;
//! `unpin` is best-effort and always succeeds.

use super::{
    PinningAggregationResult, PinningFactoryRegistry,
    fan_out::{all_or_first_error, settle_all},
};
use crate::pinning::{
    domain::{CidList, ContentId, Descriptor, PinningInfo},
    ports::{Pinning, PinningBackendResult, PinningContext, PinningFactory},
};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::fmt;
use std::sync::Arc;

/// Separator between backend ids in the aggregation id.
const ID_SEPARATOR: &str = "|";

/// Ordered set of pinning backends managed as one pinning target.
///
/// Backends appear in descriptor order and are owned by this aggregation
/// alone. The set is fixed at build time.
///
/// # Panics
///
/// The [`Pinning`] operations must run inside a Tokio runtime; see the
/// trait implementation below.
pub struct PinningAggregation {
    id: String,
    backends: Vec<Arc<dyn Pinning>>,
}

impl PinningAggregation {
    /// Builds an aggregation from descriptors using the built-in factories
    /// extended by `extra_factories`.
    ///
    /// Extra factories are added in order and shadow built-ins with the
    /// same designator.
    ///
    /// # Errors
    ///
    /// See [`PinningAggregation::build_with_registry`].
    pub async fn build<D>(
        context: &PinningContext,
        descriptors: impl IntoIterator<Item = D>,
        extra_factories: impl IntoIterator<Item = Arc<dyn PinningFactory>>,
    ) -> PinningAggregationResult<Self>
    where
        D: AsRef<str>,
    {
        let registry = PinningFactoryRegistry::with_builtins().with_factories(extra_factories);
        Self::build_with_registry(&registry, context, descriptors).await
    }

    /// Builds an aggregation against an explicit factory table.
    ///
    /// Every descriptor is resolved before any factory runs, so an unknown
    /// designator aborts the build without constructing anything. Factories
    /// then run concurrently; the first construction failure aborts the
    /// build.
    ///
    /// # Errors
    ///
    /// Returns [`PinningAggregationError::UnknownPinningService`](super::PinningAggregationError::UnknownPinningService)
    /// for the first descriptor whose scheme segment has no factory,
    /// [`PinningAggregationError::Domain`](super::PinningAggregationError::Domain)
    /// for malformed descriptors, and
    /// [`PinningAggregationError::Backend`](super::PinningAggregationError::Backend)
    /// when a factory fails.
    pub async fn build_with_registry<D>(
        registry: &PinningFactoryRegistry,
        context: &PinningContext,
        descriptors: impl IntoIterator<Item = D>,
    ) -> PinningAggregationResult<Self>
    where
        D: AsRef<str>,
    {
        let resolved = descriptors
            .into_iter()
            .map(|raw| {
                let descriptor = Descriptor::parse(raw.as_ref())?;
                registry.resolve(&descriptor)
            })
            .collect::<PinningAggregationResult<Vec<_>>>()?;

        let backends = try_join_all(resolved.iter().map(|(factory, descriptor)| {
            factory.build(descriptor.connection_string(), context)
        }))
        .await?;

        for backend in &backends {
            tracing::debug!(backend = backend.id(), "pinning backend built");
        }
        Ok(Self::from_backends(backends))
    }

    /// Wraps already constructed backends, keeping their order.
    #[must_use]
    pub fn from_backends(backends: Vec<Arc<dyn Pinning>>) -> Self {
        let id = backends
            .iter()
            .map(|backend| backend.id())
            .collect::<Vec<_>>()
            .join(ID_SEPARATOR);
        Self { id, backends }
    }

    /// Returns the backends in descriptor order.
    #[must_use]
    pub fn backends(&self) -> &[Arc<dyn Pinning>] {
        &self.backends
    }

    /// Returns the number of backends.
    #[must_use]
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Returns `true` when the aggregation holds no backend.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl fmt::Debug for PinningAggregation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backend_ids: Vec<&str> = self.backends.iter().map(|backend| backend.id()).collect();
        formatter
            .debug_struct("PinningAggregation")
            .field("backends", &backend_ids)
            .finish()
    }
}

/// Fans every operation out to the backends, one Tokio task per backend.
///
/// # Panics
///
/// Every operation spawns onto the current Tokio runtime and panics when
/// polled outside one, as soon as the aggregation holds a backend.
/// Building an aggregation has no such requirement.
#[async_trait]
impl Pinning for PinningAggregation {
    fn id(&self) -> &str {
        &self.id
    }

    async fn open(&self) -> PinningBackendResult<()> {
        tracing::debug!(backends = self.backends.len(), "opening pinning backends");
        all_or_first_error(&self.backends, |backend| async move { backend.open().await }).await?;
        Ok(())
    }

    async fn close(&self) -> PinningBackendResult<()> {
        tracing::debug!(backends = self.backends.len(), "closing pinning backends");
        all_or_first_error(&self.backends, |backend| async move { backend.close().await })
            .await?;
        Ok(())
    }

    async fn pin(&self, cid: &ContentId) -> PinningBackendResult<()> {
        tracing::debug!(%cid, backends = self.backends.len(), "pinning");
        all_or_first_error(&self.backends, |backend| {
            let target = cid.clone();
            async move { backend.pin(&target).await }
        })
        .await?;
        Ok(())
    }

    async fn unpin(&self, cid: &ContentId) -> PinningBackendResult<()> {
        tracing::debug!(%cid, backends = self.backends.len(), "unpinning");
        let outcomes = settle_all(&self.backends, |backend| {
            let target = cid.clone();
            async move { backend.unpin(&target).await }
        })
        .await;

        for (backend, outcome) in self.backends.iter().zip(outcomes) {
            if let Err(err) = outcome {
                tracing::warn!(backend = backend.id(), %cid, error = %err, "unpin failed, ignoring");
            }
        }
        Ok(())
    }

    async fn ls(&self) -> PinningBackendResult<CidList> {
        let listings =
            all_or_first_error(&self.backends, |backend| async move { backend.ls().await })
                .await?;
        Ok(listings.into_iter().fold(CidList::new(), |mut merged, listing| {
            merged.merge(listing);
            merged
        }))
    }

    async fn info(&self) -> PinningBackendResult<PinningInfo> {
        let reports =
            all_or_first_error(&self.backends, |backend| async move { backend.info().await })
                .await?;
        Ok(reports.into_iter().fold(PinningInfo::new(), |mut merged, report| {
            merged.merge(report);
            merged
        }))
    }
}
