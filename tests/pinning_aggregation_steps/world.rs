//! Shared world state for pinning aggregation BDD scenarios.

use std::sync::Arc;

use pinning_aggregation::pinning::{
    adapters::memory::{InMemoryPinning, InMemoryPinningFactory, PinningOperation},
    domain::Designator,
    ports::PinningBackendResult,
    services::{PinningAggregation, PinningAggregationError},
};
use rstest::fixture;

/// Scenario world for pinning aggregation behaviour tests.
pub struct PinningWorld {
    /// Extra factory answering to the `fake` designator.
    pub fake_factory: Arc<InMemoryPinningFactory>,
    /// Descriptors queued for the build.
    pub descriptors: Vec<String>,
    /// Result of the last build attempt.
    pub build_result: Option<Result<PinningAggregation, PinningAggregationError>>,
    /// Result of the last aggregate operation.
    pub last_operation: Option<PinningBackendResult<()>>,
}

impl PinningWorld {
    /// Creates a world with no descriptors.
    ///
    /// # Errors
    ///
    /// Returns an error when the `fake` designator is rejected.
    pub fn new() -> Result<Self, eyre::Report> {
        let designator = Designator::new("fake")?;
        Ok(Self {
            fake_factory: Arc::new(InMemoryPinningFactory::new(designator)),
            descriptors: Vec::new(),
            build_result: None,
            last_operation: None,
        })
    }

    /// Returns the built aggregation.
    ///
    /// # Errors
    ///
    /// Returns an error when no successful build happened.
    pub fn aggregation(&self) -> Result<&PinningAggregation, eyre::Report> {
        match &self.build_result {
            Some(Ok(aggregation)) => Ok(aggregation),
            Some(Err(err)) => Err(eyre::eyre!("aggregation build failed: {err}")),
            None => Err(eyre::eyre!("aggregation has not been built")),
        }
    }

    /// Returns the fake backend at 1-based `position` in build order.
    ///
    /// # Errors
    ///
    /// Returns an error when no such backend was built.
    pub fn fake_backend(&self, position: usize) -> Result<InMemoryPinning, eyre::Report> {
        let built = self.fake_factory.built()?;
        position
            .checked_sub(1)
            .and_then(|index| built.get(index).cloned())
            .ok_or_else(|| eyre::eyre!("no fake backend at position {position}"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PinningWorld {
    PinningWorld::new().unwrap_or_else(|err| panic!("scenario world: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Maps a feature-file operation name to a [`PinningOperation`].
///
/// # Errors
///
/// Returns an error for unknown operation names.
pub fn parse_operation(name: &str) -> Result<PinningOperation, eyre::Report> {
    [
        PinningOperation::Open,
        PinningOperation::Close,
        PinningOperation::Pin,
        PinningOperation::Unpin,
        PinningOperation::Ls,
        PinningOperation::Info,
    ]
    .into_iter()
    .find(|operation| operation.as_str() == name)
    .ok_or_else(|| eyre::eyre!("unknown pinning operation '{name}'"))
}
