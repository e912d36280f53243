//! IPFS node backend.

use crate::pinning::{
    domain::{CidList, ContentId, Designator, EndpointRules, PinningInfo},
    ports::{
        IpfsApi, Pinning, PinningBackendError, PinningBackendResult, PinningContext,
        PinningFactory,
    },
};
use async_trait::async_trait;
use serde_json::json;
use std::fmt;
use std::sync::{Arc, RwLock};
use url::Url;

/// Designator of the IPFS backend.
pub const IPFS_DESIGNATOR: &str = "ipfs";

/// Default port of the IPFS HTTP API.
const DEFAULT_API_PORT: u16 = 5001;

/// Pins content on an IPFS node through the context's shared client.
pub struct IpfsPinning {
    id: String,
    designator: Designator,
    address: String,
    shared_client: Option<Arc<dyn IpfsApi>>,
    client: RwLock<Option<Arc<dyn IpfsApi>>>,
}

impl IpfsPinning {
    /// Creates a backend for the node API at `address`.
    #[must_use]
    pub fn new(address: impl Into<String>, context: &PinningContext) -> Self {
        let node_address = address.into();
        Self {
            id: format!("{IPFS_DESIGNATOR}@{node_address}"),
            designator: Designator::from_static(IPFS_DESIGNATOR),
            address: node_address,
            shared_client: context.ipfs().cloned(),
            client: RwLock::new(None),
        }
    }

    /// Returns the node API address, e.g. `http://localhost:5001`.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    fn lock_error(&self, err: impl fmt::Display) -> PinningBackendError {
        PinningBackendError::Unavailable {
            backend_id: self.id.clone(),
            reason: format!("client lock poisoned: {err}"),
        }
    }

    fn client(&self) -> PinningBackendResult<Arc<dyn IpfsApi>> {
        let guard = self.client.read().map_err(|err| self.lock_error(err))?;
        guard
            .clone()
            .ok_or_else(|| PinningBackendError::NotOpen(self.id.clone()))
    }
}

impl fmt::Debug for IpfsPinning {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("IpfsPinning")
            .field("id", &self.id)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Pinning for IpfsPinning {
    fn id(&self) -> &str {
        &self.id
    }

    async fn open(&self) -> PinningBackendResult<()> {
        let shared = self
            .shared_client
            .clone()
            .ok_or_else(|| PinningBackendError::Unavailable {
                backend_id: self.id.clone(),
                reason: "no IPFS client in pinning context".to_owned(),
            })?;
        let mut guard = self.client.write().map_err(|err| self.lock_error(err))?;
        *guard = Some(shared);
        tracing::debug!(backend = %self.id, "ipfs backend opened");
        Ok(())
    }

    async fn close(&self) -> PinningBackendResult<()> {
        let mut guard = self.client.write().map_err(|err| self.lock_error(err))?;
        *guard = None;
        Ok(())
    }

    async fn pin(&self, cid: &ContentId) -> PinningBackendResult<()> {
        self.client()?.pin_add(cid, false).await
    }

    async fn unpin(&self, cid: &ContentId) -> PinningBackendResult<()> {
        self.client()?.pin_rm(cid).await
    }

    async fn ls(&self) -> PinningBackendResult<CidList> {
        let pinned = self.client()?.pin_ls_direct().await?;
        Ok(CidList::held_by(&self.designator, pinned))
    }

    async fn info(&self) -> PinningBackendResult<PinningInfo> {
        Ok(PinningInfo::single(self.id.clone(), json!({})))
    }
}

/// Factory for [`IpfsPinning`].
///
/// `ipfs://host` maps to `http://host:5001`; `ipfs+https://host` maps to
/// `https://host:5001`. Descriptors naming a path are rejected.
#[derive(Debug, Clone)]
pub struct IpfsPinningFactory {
    designator: Designator,
    rules: EndpointRules,
}

impl IpfsPinningFactory {
    /// Creates the factory with its rewrite table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            designator: Designator::from_static(IPFS_DESIGNATOR),
            rules: EndpointRules::new("http", DEFAULT_API_PORT)
                .with_variant("http", "http", 0)
                .with_variant("https", "https", 0),
        }
    }
}

impl Default for IpfsPinningFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PinningFactory for IpfsPinningFactory {
    fn designator(&self) -> &Designator {
        &self.designator
    }

    fn endpoint_rules(&self) -> Option<&EndpointRules> {
        Some(&self.rules)
    }

    async fn build(
        &self,
        connection_string: &str,
        context: &PinningContext,
    ) -> PinningBackendResult<Arc<dyn Pinning>> {
        let address = http_origin(connection_string, DEFAULT_API_PORT)?;
        Ok(Arc::new(IpfsPinning::new(address, context)))
    }
}

/// Reduces an `http(s)` URL to `scheme://host:port`.
///
/// The query is left to the caller. A path other than `/` is rejected:
/// backends address the service root.
pub(super) fn http_origin(
    connection_string: &str,
    fallback_port: u16,
) -> PinningBackendResult<String> {
    let url = parse_http_url(connection_string)?;
    if url.path() != "/" {
        return Err(PinningBackendError::invalid_connection_string(
            connection_string,
            format!("unsupported path '{}'", url.path()),
        ));
    }
    let host = url.host_str().ok_or_else(|| {
        PinningBackendError::invalid_connection_string(connection_string, "missing host")
    })?;
    let port = url.port_or_known_default().unwrap_or(fallback_port);
    Ok(format!("{}://{host}:{port}", url.scheme()))
}

pub(super) fn parse_http_url(connection_string: &str) -> PinningBackendResult<Url> {
    let url = Url::parse(connection_string).map_err(|err| {
        PinningBackendError::invalid_connection_string(connection_string, err.to_string())
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(PinningBackendError::invalid_connection_string(
            connection_string,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}
