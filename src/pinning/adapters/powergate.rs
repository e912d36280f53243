//! Powergate deal-making service backend.

use super::ipfs::{http_origin, parse_http_url};
use crate::pinning::{
    domain::{CidList, ContentId, Designator, EndpointRules, PinningInfo},
    ports::{
        Pinning, PinningBackendError, PinningBackendResult, PinningContext, PinningFactory,
        PowergateApi, PowergateConnector, PowergateJobStatus,
    },
};
use async_trait::async_trait;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::{Arc, RwLock};

/// Designator of the Powergate backend.
pub const POWERGATE_DESIGNATOR: &str = "powergate";

/// Default port of the plain Powergate endpoint.
const DEFAULT_PORT: u16 = 5002;

/// Offset from the plain port to the TLS-terminated endpoint.
const HTTPS_PORT_OFFSET: u16 = 1000;

/// Number of token digest bytes shown in the backend identity.
const TOKEN_FINGERPRINT_BYTES: usize = 8;

/// Pins content by pushing storage configs to a Powergate service.
pub struct PowergatePinning {
    id: String,
    designator: Designator,
    endpoint: String,
    token: String,
    connector: Option<Arc<dyn PowergateConnector>>,
    session: RwLock<Option<Arc<dyn PowergateApi>>>,
}

impl PowergatePinning {
    /// Creates a backend for `endpoint`, authenticating with `token`.
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        context: &PinningContext,
    ) -> Self {
        let service_endpoint = endpoint.into();
        let auth_token = token.into();
        Self {
            id: format!(
                "{POWERGATE_DESIGNATOR}@{service_endpoint}:{}",
                token_fingerprint(&auth_token)
            ),
            designator: Designator::from_static(POWERGATE_DESIGNATOR),
            endpoint: service_endpoint,
            token: auth_token,
            connector: context.powergate().cloned(),
            session: RwLock::new(None),
        }
    }

    /// Returns the service endpoint, e.g. `https://example.com:6002`.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn lock_error(&self, err: impl fmt::Display) -> PinningBackendError {
        PinningBackendError::Unavailable {
            backend_id: self.id.clone(),
            reason: format!("session lock poisoned: {err}"),
        }
    }

    fn session(&self) -> PinningBackendResult<Arc<dyn PowergateApi>> {
        let guard = self.session.read().map_err(|err| self.lock_error(err))?;
        guard
            .clone()
            .ok_or_else(|| PinningBackendError::NotOpen(self.id.clone()))
    }
}

impl fmt::Debug for PowergatePinning {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PowergatePinning")
            .field("id", &self.id)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

fn token_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    digest
        .iter()
        .take(TOKEN_FINGERPRINT_BYTES)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

#[async_trait]
impl Pinning for PowergatePinning {
    fn id(&self) -> &str {
        &self.id
    }

    async fn open(&self) -> PinningBackendResult<()> {
        let connector =
            self.connector
                .clone()
                .ok_or_else(|| PinningBackendError::Unavailable {
                    backend_id: self.id.clone(),
                    reason: "no Powergate connector in pinning context".to_owned(),
                })?;
        let session = connector.connect(&self.endpoint, &self.token).await?;
        let mut guard = self.session.write().map_err(|err| self.lock_error(err))?;
        *guard = Some(session);
        tracing::debug!(backend = %self.id, "powergate backend opened");
        Ok(())
    }

    async fn close(&self) -> PinningBackendResult<()> {
        let mut guard = self.session.write().map_err(|err| self.lock_error(err))?;
        *guard = None;
        Ok(())
    }

    async fn pin(&self, cid: &ContentId) -> PinningBackendResult<()> {
        let session = self.session()?;
        let job_id = session.push_storage_config(cid).await?;
        tracing::debug!(backend = %self.id, %cid, %job_id, "storage config pushed");
        match session.wait_for_job(&job_id).await? {
            PowergateJobStatus::Success => Ok(()),
            status => Err(PinningBackendError::JobFailed {
                cid: cid.clone(),
                job_id,
                status: status.to_string(),
            }),
        }
    }

    async fn unpin(&self, cid: &ContentId) -> PinningBackendResult<()> {
        self.session()?.remove(cid).await
    }

    async fn ls(&self) -> PinningBackendResult<CidList> {
        let stored = self.session()?.list_stored().await?;
        Ok(CidList::held_by(&self.designator, stored))
    }

    async fn info(&self) -> PinningBackendResult<PinningInfo> {
        Ok(PinningInfo::single(self.id.clone(), json!({})))
    }
}

/// Factory for [`PowergatePinning`].
///
/// `powergate://host?token=T` maps to `http://host:5002`;
/// `powergate+https://host?token=T` maps to `https://host:6002`. The
/// `token` query parameter is required.
#[derive(Debug, Clone)]
pub struct PowergatePinningFactory {
    designator: Designator,
    rules: EndpointRules,
}

impl PowergatePinningFactory {
    /// Creates the factory with its rewrite table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            designator: Designator::from_static(POWERGATE_DESIGNATOR),
            rules: EndpointRules::new("http", DEFAULT_PORT)
                .with_variant("http", "http", 0)
                .with_variant("https", "https", HTTPS_PORT_OFFSET),
        }
    }
}

impl Default for PowergatePinningFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PinningFactory for PowergatePinningFactory {
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
        let url = parse_http_url(connection_string)?;
        let token = url
            .query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                PinningBackendError::invalid_connection_string(
                    connection_string,
                    "missing 'token' query parameter",
                )
            })?;
        let endpoint = http_origin(connection_string, DEFAULT_PORT)?;
        Ok(Arc::new(PowergatePinning::new(endpoint, token, context)))
    }
}
