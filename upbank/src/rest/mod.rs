pub mod decode;
pub mod pagination;

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{Result, UpError};

/// Status line and body of a completed request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP transport for the Up REST API.
///
/// Issues single GET requests with a fixed timeout. No retries.
#[derive(Debug, Clone)]
pub struct UpHttpClient {
    client: Client,
    timeout: Duration,
}

impl UpHttpClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(UpError::Client)?;
        Ok(Self { client, timeout })
    }

    /// GET `url`, attaching `Authorization: Bearer <token>` when `token` is
    /// non-empty.
    pub async fn request(&self, url: &Url, token: &str) -> Result<RawResponse> {
        debug!(url = %url, "GET");
        let mut req = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json");
        if !token.is_empty() {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let resp = req.send().await.map_err(|e| self.transport_error(e))?;
        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| self.transport_error(e))?;

        debug!(url = %url, status, bytes = body.len(), "response");
        Ok(RawResponse { status, body })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn transport_error(&self, err: reqwest::Error) -> UpError {
        if err.is_timeout() {
            UpError::Timeout(self.timeout)
        } else {
            UpError::Connection(err.without_url())
        }
    }
}
