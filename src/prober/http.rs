use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT as USER_AGENT_HEADER};
use reqwest::{Client, StatusCode};
use tokio::time::{timeout, Duration, Instant};
use tracing::{debug, warn};

use super::{Ping, ProbeError, Status, USER_AGENT};
use crate::config::Endpoint;
use crate::report::CheckResult;

/// Issues one bounded GET per endpoint and turns the outcome into a result.
#[derive(Debug, Clone)]
pub struct HttpChecker {
    client: Client,
    timeout: Duration,
}

impl HttpChecker {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, timeout })
    }

    /// Never fails: every failure mode ends up in the result's `status`/`ping`.
    pub async fn check(&self, endpoint: &Endpoint) -> CheckResult {
        match self.probe(endpoint).await {
            Ok((code, elapsed)) => {
                let status = Status::from_status_code(code.as_u16());
                debug!(endpoint = %endpoint.name(), url = endpoint.url().unwrap_or_default(), %code, ?elapsed, %status, "response received");
                CheckResult::new(endpoint, status, Ping::from_elapsed(elapsed))
            }
            Err(e) => {
                warn!(endpoint = %endpoint.name(), url = endpoint.url().unwrap_or_default(), error = %e, "probe failed");
                CheckResult::new(endpoint, Status::Offline, e.ping())
            }
        }
    }

    /// Time from just before sending until response headers arrive. Dropping
    /// the pending request on timeout also drops its timer.
    async fn probe(&self, endpoint: &Endpoint) -> Result<(StatusCode, Duration), ProbeError> {
        let url = endpoint.url().ok_or(ProbeError::MissingUrl)?;
        let request = self
            .client
            .get(url)
            .headers(configured_headers(endpoint));

        let start = Instant::now();
        let resp = timeout(self.timeout, request.send())
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))??;
        let elapsed = start.elapsed();
        Ok((resp.status(), elapsed))
    }
}

fn configured_headers(endpoint: &Endpoint) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in endpoint.headers() {
        let (Ok(name), Ok(value)) = (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) else {
            warn!(endpoint = %endpoint.name(), header = %name, "skipping invalid header");
            continue;
        };
        if name == USER_AGENT_HEADER {
            continue;
        }
        headers.insert(name, value);
    }
    headers
}
