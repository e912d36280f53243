//! Low-level client ports used by the built-in backends.
//!
//! Wire protocols live behind these traits. Hosts hand concrete clients to
//! backends through [`PinningContext`](super::PinningContext).

use super::PinningBackendResult;
use crate::pinning::domain::ContentId;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Subset of the IPFS pin API the IPFS backend needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IpfsApi: Send + Sync {
    /// Adds a pin. `recursive = false` pins only the root block.
    async fn pin_add(&self, cid: &ContentId, recursive: bool) -> PinningBackendResult<()>;

    /// Removes a pin.
    async fn pin_rm(&self, cid: &ContentId) -> PinningBackendResult<()>;

    /// Lists direct pins.
    async fn pin_ls_direct(&self) -> PinningBackendResult<Vec<ContentId>>;
}

/// Terminal state of a Powergate storage job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PowergateJobStatus {
    /// The storage config was applied.
    Success,
    /// The job failed with a service message.
    Failed(String),
    /// The job was cancelled.
    Canceled,
}

impl fmt::Display for PowergateJobStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => formatter.write_str("success"),
            Self::Failed(message) => write!(formatter, "failed ({message})"),
            Self::Canceled => formatter.write_str("canceled"),
        }
    }
}

/// Authenticated session with a Powergate service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PowergateApi: Send + Sync {
    /// Pushes the default storage config for `cid` and returns the job id.
    async fn push_storage_config(&self, cid: &ContentId) -> PinningBackendResult<String>;

    /// Waits until the job reaches a terminal state.
    async fn wait_for_job(&self, job_id: &str) -> PinningBackendResult<PowergateJobStatus>;

    /// Removes the storage config for `cid`.
    async fn remove(&self, cid: &ContentId) -> PinningBackendResult<()>;

    /// Lists CIDs with an active storage config.
    async fn list_stored(&self) -> PinningBackendResult<Vec<ContentId>>;
}

/// Opens Powergate sessions for an endpoint and token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PowergateConnector: Send + Sync {
    /// Connects to `endpoint`, authenticating with `token`.
    async fn connect(
        &self,
        endpoint: &str,
        token: &str,
    ) -> PinningBackendResult<Arc<dyn PowergateApi>>;
}
