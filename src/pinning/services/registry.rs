//! Designator to factory lookup table.

use super::{PinningAggregationError, PinningAggregationResult};
use crate::pinning::{
    adapters::builtin_factories,
    domain::{Descriptor, Designator, ResolvedDescriptor},
    ports::PinningFactory,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Immutable table mapping designators to backend factories.
///
/// Tables are assembled by value and passed explicitly to
/// [`PinningAggregation::build_with_registry`](super::PinningAggregation::build_with_registry);
/// there is no process-wide registry.
#[derive(Clone, Default)]
pub struct PinningFactoryRegistry {
    factories: HashMap<Designator, Arc<dyn PinningFactory>>,
}

impl PinningFactoryRegistry {
    /// Creates a table with no factories.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a table seeded with the built-in `ipfs` and `powergate`
    /// factories.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::empty().with_factories(builtin_factories())
    }

    /// Adds a factory, shadowing any factory with the same designator.
    #[must_use]
    pub fn with_factory(mut self, factory: Arc<dyn PinningFactory>) -> Self {
        self.factories.insert(factory.designator().clone(), factory);
        self
    }

    /// Adds factories in order; later entries shadow earlier ones.
    #[must_use]
    pub fn with_factories(
        self,
        factories: impl IntoIterator<Item = Arc<dyn PinningFactory>>,
    ) -> Self {
        factories.into_iter().fold(self, Self::with_factory)
    }

    /// Looks up a factory by exact designator.
    #[must_use]
    pub fn get(&self, designator: &str) -> Option<&Arc<dyn PinningFactory>> {
        self.factories.get(designator)
    }

    /// Returns the registered designators in sorted order.
    #[must_use]
    pub fn designators(&self) -> Vec<&Designator> {
        let mut designators: Vec<_> = self.factories.keys().collect();
        designators.sort();
        designators
    }

    /// Returns the number of registered factories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` when no factory is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Resolves a descriptor to its factory and backend connection string.
    ///
    /// The designator segment selects the factory; the factory's rewrite
    /// table then handles the variant. A variant the table does not know,
    /// or any variant on a factory without a table, makes the whole scheme
    /// segment unknown.
    ///
    /// # Errors
    ///
    /// Returns [`PinningAggregationError::UnknownPinningService`] carrying
    /// the full scheme segment, or [`PinningAggregationError::Domain`] when
    /// the rewritten connection string is not a valid URL.
    pub fn resolve(
        &self,
        descriptor: &Descriptor,
    ) -> PinningAggregationResult<(Arc<dyn PinningFactory>, ResolvedDescriptor)> {
        let unknown =
            || PinningAggregationError::UnknownPinningService(descriptor.scheme().to_owned());
        let factory = self.get(descriptor.designator_segment()).ok_or_else(unknown)?;

        let connection_string = match factory.endpoint_rules() {
            Some(rules) => descriptor.rewrite(rules),
            None => descriptor
                .variant()
                .is_none()
                .then(|| descriptor.as_str().to_owned()),
        }
        .ok_or_else(unknown)?;

        let resolved = ResolvedDescriptor::new(
            factory.designator().clone(),
            descriptor.variant().map(str::to_owned),
            connection_string,
        )?;
        Ok((Arc::clone(factory), resolved))
    }
}

impl fmt::Debug for PinningFactoryRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PinningFactoryRegistry")
            .field("designators", &self.designators())
            .finish()
    }
}
