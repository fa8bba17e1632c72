//! HTTP client for the update-record relay. Publishes signed envelopes to the configured relay
//! and fetches the full update log for a root DID.

use std::time::Duration;

use quick_core::error::Err;
use quick_core::{tracerr, RelayRequest, Relay, Result, SignedEnvelope};
use reqwest::{Response, Url};

/// Default bound applied to every relay call when no timeout is configured.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Relay endpoint path for publishing an update record.
const PUBLISH_PATH: &str = "add-did-quick-update";

/// Relay endpoint path for fetching the update log of a root DID.
const FETCH_PATH: &str = "did-quick-updates";

/// Client for a did:quick update relay.
pub struct RelayClient {
    /// Base URL for the relay.
    relayer_url: String,
    /// Reusable HTTP client.
    http_client: reqwest::Client,
}

impl RelayClient {
    /// Constructor.
    ///
    /// # Arguments
    ///
    /// * `relayer_url` - Base URL for publish and fetch calls.
    /// * `timeout` - Bound for each relay call. A default is applied when `None`.
    pub fn new(relayer_url: &str, timeout: Option<Duration>) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .expect("failed to create HTTP client.");
        Self {
            relayer_url: relayer_url.to_string(),
            http_client,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = if self.relayer_url.ends_with('/') {
            self.relayer_url.clone()
        } else {
            format!("{}/", self.relayer_url)
        };
        match Url::parse(&base).and_then(|u| u.join(path)) {
            Ok(url) => Ok(url),
            Err(e) => tracerr!(Err::InvalidFormat, "invalid relay URL: {}", e),
        }
    }
}

#[allow(async_fn_in_trait)]
impl Relay for RelayClient {
    /// Publish a signed envelope to the relay's append log.
    async fn publish(&self, envelope: &SignedEnvelope) -> Result<()> {
        let url = self.endpoint(PUBLISH_PATH)?;
        let req = RelayRequest::new(envelope.clone());
        let res = match self.http_client.post(url).json(&req).send().await {
            Ok(res) => res,
            Err(e) if e.is_timeout() => {
                tracerr!(Err::Timeout, "relay publish timed out: {}", e)
            }
            Err(e) => tracerr!(Err::RequestError, "failed to submit update record: {}", e),
        };
        if !res.status().is_success() {
            let status = res.status();
            let reason = res.text().await.unwrap_or_default();
            tracerr!(Err::PublishFailed, "relay returned {}: {}", status, reason);
        }
        Ok(())
    }

    /// Fetch every envelope published for the root DID, in publication order.
    async fn fetch_all(&self, root_did: &str) -> Result<Vec<SignedEnvelope>> {
        let url = self.endpoint(&format!("{FETCH_PATH}/{root_did}"))?;
        let res = match self.http_client.get(url).send().await {
            Ok(res) => res,
            Err(e) if e.is_timeout() => {
                tracerr!(Err::Timeout, "relay fetch timed out: {}", e)
            }
            Err(e) => tracerr!(Err::RequestError, "failed to fetch update log: {}", e),
        };
        unpack_response::<Vec<SignedEnvelope>>(res).await
    }
}

// Helper to unpack a successful response body from the relay.
async fn unpack_response<T>(res: Response) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    if !res.status().is_success() {
        let status = res.status();
        let reason = res.text().await.unwrap_or_default();
        tracerr!(Err::RequestError, "relay returned {}: {}", status, reason);
    }
    match res.json::<T>().await {
        Ok(obj) => Ok(obj),
        Err(e) => tracerr!(
            Err::DeserializationError,
            "failed to deserialize relay response: {}",
            e
        ),
    }
}
