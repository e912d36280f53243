//! Pinning capability implemented by every backend.

use crate::pinning::domain::{CidList, ContentId, PinningInfo};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for pinning backend operations.
pub type PinningBackendResult<T> = Result<T, PinningBackendError>;

/// Capability contract shared by all pinning backends.
///
/// Implementations own their connection state and use interior mutability
/// for it; the aggregator only ever holds `Arc<dyn Pinning>`.
#[async_trait]
pub trait Pinning: Send + Sync {
    /// Stable identity of this backend instance.
    fn id(&self) -> &str;

    /// Opens the connection to the service.
    async fn open(&self) -> PinningBackendResult<()>;

    /// Closes the connection to the service.
    async fn close(&self) -> PinningBackendResult<()>;

    /// Pins `cid`.
    async fn pin(&self, cid: &ContentId) -> PinningBackendResult<()>;

    /// Removes the pin for `cid`.
    async fn unpin(&self, cid: &ContentId) -> PinningBackendResult<()>;

    /// Lists the CIDs this backend holds pins for.
    async fn ls(&self) -> PinningBackendResult<CidList>;

    /// Reports backend metadata keyed by [`Pinning::id`].
    async fn info(&self) -> PinningBackendResult<PinningInfo>;
}

/// Errors returned by pinning backends and their factories.
#[derive(Debug, Clone, Error)]
pub enum PinningBackendError {
    /// An operation was attempted before `open` succeeded.
    #[error("pinning backend {0} is not open")]
    NotOpen(String),

    /// The service or a required client is not available.
    #[error("pinning backend {backend_id} is unavailable: {reason}")]
    Unavailable {
        /// Backend identity.
        backend_id: String,
        /// Reason string.
        reason: String,
    },

    /// The factory rejected its connection string.
    #[error("invalid connection string '{connection_string}': {reason}")]
    InvalidConnectionString {
        /// Connection string given to the factory.
        connection_string: String,
        /// Reason string.
        reason: String,
    },

    /// A storage job for a CID did not complete successfully.
    #[error("storage job {job_id} for {cid} ended as {status}")]
    JobFailed {
        /// CID the job was for.
        cid: ContentId,
        /// Service-assigned job identifier.
        job_id: String,
        /// Terminal job status.
        status: String,
    },

    /// Generic runtime failure.
    #[error("pinning backend runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl PinningBackendError {
    /// Wraps a runtime error from a backend or its client.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }

    /// Wraps a runtime failure described only by a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::runtime(std::io::Error::other(message.into()))
    }

    pub(crate) fn invalid_connection_string(
        connection_string: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConnectionString {
            connection_string: connection_string.to_owned(),
            reason: reason.into(),
        }
    }
}
