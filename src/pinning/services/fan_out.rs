//! Concurrency strategies for dispatching one operation to many backends.
//!
//! Each backend call runs as its own Tokio task. Dropping a `JoinHandle`
//! detaches the task rather than aborting it, so calls still in flight when
//! [`all_or_first_error`] returns keep running to completion unobserved.

use crate::pinning::ports::{Pinning, PinningBackendError, PinningBackendResult};
use futures::future::join_all;
use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::sync::Arc;

/// Runs `operation` on every backend; fails with the first error to arrive.
///
/// Successful outputs are returned in backend order.
pub(super) async fn all_or_first_error<T, F, Fut>(
    backends: &[Arc<dyn Pinning>],
    operation: F,
) -> PinningBackendResult<Vec<T>>
where
    T: Send + 'static,
    F: Fn(Arc<dyn Pinning>) -> Fut,
    Fut: Future<Output = PinningBackendResult<T>> + Send + 'static,
{
    let mut in_flight: FuturesUnordered<_> = backends
        .iter()
        .enumerate()
        .map(|(index, backend)| {
            let handle = tokio::spawn(operation(Arc::clone(backend)));
            async move { (index, handle.await) }
        })
        .collect();

    let mut outputs: Vec<Option<T>> = backends.iter().map(|_| None).collect();
    while let Some((index, joined)) = in_flight.next().await {
        let output = joined.map_err(PinningBackendError::runtime)??;
        if let Some(slot) = outputs.get_mut(index) {
            *slot = Some(output);
        }
    }
    Ok(outputs.into_iter().flatten().collect())
}

/// Runs `operation` on every backend and waits for all of them to settle.
///
/// Outcomes are returned in backend order; none is propagated.
pub(super) async fn settle_all<T, F, Fut>(
    backends: &[Arc<dyn Pinning>],
    operation: F,
) -> Vec<PinningBackendResult<T>>
where
    T: Send + 'static,
    F: Fn(Arc<dyn Pinning>) -> Fut,
    Fut: Future<Output = PinningBackendResult<T>> + Send + 'static,
{
    let handles = backends
        .iter()
        .map(|backend| tokio::spawn(operation(Arc::clone(backend))));
    join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.map_err(PinningBackendError::runtime)?)
        .collect()
}
