//! In-memory pinning backend for tests and local runs.
//!
//! [`InMemoryPinning`] keeps its pins in process memory, records every call
//! it receives, and can be scripted to fail any operation. Clones share
//! state, so a test can keep a handle to a backend after handing it to an
//! aggregation.

use crate::pinning::{
    domain::{CidList, ContentId, Designator, PinningInfo},
    ports::{Pinning, PinningBackendError, PinningBackendResult, PinningContext, PinningFactory},
};
use async_trait::async_trait;
use serde_json::json;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, RwLock};

/// Capability operation, used to script failures and inspect calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinningOperation {
    /// [`Pinning::open`].
    Open,
    /// [`Pinning::close`].
    Close,
    /// [`Pinning::pin`].
    Pin,
    /// [`Pinning::unpin`].
    Unpin,
    /// [`Pinning::ls`].
    Ls,
    /// [`Pinning::info`].
    Info,
}

impl PinningOperation {
    /// Returns the operation name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Pin => "pin",
            Self::Unpin => "unpin",
            Self::Ls => "ls",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for PinningOperation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Thread-safe in-memory pinning backend.
#[derive(Debug, Clone)]
pub struct InMemoryPinning {
    id: String,
    designator: Designator,
    state: Arc<RwLock<InMemoryPinningState>>,
}

#[derive(Debug, Default)]
struct InMemoryPinningState {
    open: bool,
    pins: BTreeSet<ContentId>,
    calls: Vec<PinningOperation>,
    failures: HashMap<PinningOperation, String>,
}

impl InMemoryPinning {
    /// Creates an empty backend.
    #[must_use]
    pub fn new(id: impl Into<String>, designator: Designator) -> Self {
        Self {
            id: id.into(),
            designator,
            state: Arc::new(RwLock::new(InMemoryPinningState::default())),
        }
    }

    /// Makes every later call of `operation` fail with `message`.
    ///
    /// # Errors
    ///
    /// Returns a runtime error when lock acquisition fails.
    pub fn fail_on(
        &self,
        operation: PinningOperation,
        message: impl Into<String>,
    ) -> PinningBackendResult<()> {
        let mut state = self.write_state()?;
        state.failures.insert(operation, message.into());
        Ok(())
    }

    /// Removes a scripted failure.
    ///
    /// # Errors
    ///
    /// Returns a runtime error when lock acquisition fails.
    pub fn succeed_on(&self, operation: PinningOperation) -> PinningBackendResult<()> {
        let mut state = self.write_state()?;
        state.failures.remove(&operation);
        Ok(())
    }

    /// Returns how many times `operation` was invoked, failed calls
    /// included.
    ///
    /// # Errors
    ///
    /// Returns a runtime error when lock acquisition fails.
    pub fn call_count(&self, operation: PinningOperation) -> PinningBackendResult<usize> {
        let state = self.read_state()?;
        Ok(state
            .calls
            .iter()
            .filter(|&&called| called == operation)
            .count())
    }

    /// Returns `true` between a successful `open` and the next `close`.
    ///
    /// # Errors
    ///
    /// Returns a runtime error when lock acquisition fails.
    pub fn is_open(&self) -> PinningBackendResult<bool> {
        Ok(self.read_state()?.open)
    }

    /// Returns `true` when the backend holds a pin for `cid`.
    ///
    /// # Errors
    ///
    /// Returns a runtime error when lock acquisition fails.
    pub fn is_pinned(&self, cid: &ContentId) -> PinningBackendResult<bool> {
        Ok(self.read_state()?.pins.contains(cid))
    }

    fn read_state(
        &self,
    ) -> PinningBackendResult<std::sync::RwLockReadGuard<'_, InMemoryPinningState>> {
        self.state
            .read()
            .map_err(|err| PinningBackendError::message(err.to_string()))
    }

    fn write_state(
        &self,
    ) -> PinningBackendResult<std::sync::RwLockWriteGuard<'_, InMemoryPinningState>> {
        self.state
            .write()
            .map_err(|err| PinningBackendError::message(err.to_string()))
    }

    /// Records the call and applies `apply` unless a failure is scripted.
    fn record<T>(
        &self,
        operation: PinningOperation,
        apply: impl FnOnce(&mut InMemoryPinningState) -> T,
    ) -> PinningBackendResult<T> {
        let mut state = self.write_state()?;
        state.calls.push(operation);
        if let Some(message) = state.failures.get(&operation) {
            return Err(PinningBackendError::message(message.clone()));
        }
        Ok(apply(&mut *state))
    }
}

#[async_trait]
impl Pinning for InMemoryPinning {
    fn id(&self) -> &str {
        &self.id
    }

    async fn open(&self) -> PinningBackendResult<()> {
        self.record(PinningOperation::Open, |state| state.open = true)
    }

    async fn close(&self) -> PinningBackendResult<()> {
        self.record(PinningOperation::Close, |state| state.open = false)
    }

    async fn pin(&self, cid: &ContentId) -> PinningBackendResult<()> {
        self.record(PinningOperation::Pin, |state| {
            state.pins.insert(cid.clone());
        })
    }

    async fn unpin(&self, cid: &ContentId) -> PinningBackendResult<()> {
        self.record(PinningOperation::Unpin, |state| {
            state.pins.remove(cid);
        })
    }

    async fn ls(&self) -> PinningBackendResult<CidList> {
        self.record(PinningOperation::Ls, |state| {
            CidList::held_by(&self.designator, state.pins.iter().cloned())
        })
    }

    async fn info(&self) -> PinningBackendResult<PinningInfo> {
        self.record(PinningOperation::Info, |state| {
            PinningInfo::single(self.id.clone(), json!({ "pins": state.pins.len() }))
        })
    }
}

/// Factory producing [`InMemoryPinning`] backends under any designator.
///
/// Connection strings are taken verbatim: the factory declares no rewrite
/// table. Every backend it builds stays reachable through
/// [`InMemoryPinningFactory::built`].
#[derive(Debug, Clone)]
pub struct InMemoryPinningFactory {
    designator: Designator,
    built: Arc<RwLock<Vec<InMemoryPinning>>>,
    build_failure: Option<String>,
}

impl InMemoryPinningFactory {
    /// Creates a factory answering to `designator`.
    #[must_use]
    pub fn new(designator: Designator) -> Self {
        Self {
            designator,
            built: Arc::new(RwLock::new(Vec::new())),
            build_failure: None,
        }
    }

    /// Makes every build fail with `message`.
    #[must_use]
    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.build_failure = Some(message.into());
        self
    }

    /// Returns the backends built so far, in build order.
    ///
    /// # Errors
    ///
    /// Returns a runtime error when lock acquisition fails.
    pub fn built(&self) -> PinningBackendResult<Vec<InMemoryPinning>> {
        let built = self
            .built
            .read()
            .map_err(|err| PinningBackendError::message(err.to_string()))?;
        Ok(built.clone())
    }
}

#[async_trait]
impl PinningFactory for InMemoryPinningFactory {
    fn designator(&self) -> &Designator {
        &self.designator
    }

    async fn build(
        &self,
        connection_string: &str,
        _context: &PinningContext,
    ) -> PinningBackendResult<Arc<dyn Pinning>> {
        if let Some(message) = &self.build_failure {
            return Err(PinningBackendError::invalid_connection_string(
                connection_string,
                message.clone(),
            ));
        }

        let backend = InMemoryPinning::new(connection_string, self.designator.clone());
        let mut built = self
            .built
            .write()
            .map_err(|err| PinningBackendError::message(err.to_string()))?;
        built.push(backend.clone());
        Ok(Arc::new(backend))
    }
}
