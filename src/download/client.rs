//! HTTP session used by the transfer loop.
//!
//! One client is built per [`Transfer`](super::Transfer) and reused across
//! hops and links, so connections are kept alive and cookies set by a share
//! page are sent with the next request.

use std::time::Duration;

use reqwest::header::CONTENT_LENGTH;
use reqwest::{Client, Response};
use tracing::{debug, instrument};

use super::config::TransferConfig;
use super::error::TransferError;

/// Browser-impersonating HTTP client.
#[derive(Debug, Clone)]
pub(crate) struct HttpSession {
    client: Client,
}

impl HttpSession {
    /// Builds the session from transfer settings.
    pub(crate) fn new(config: &TransferConfig) -> Result<Self, TransferError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            // Idle limit between reads; a large body may stream for hours.
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .gzip(true)
            .cookie_store(true)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|source| TransferError::ClientBuild { source })?;
        Ok(Self { client })
    }

    /// Sends a GET and returns the response with its body still unread.
    ///
    /// Non-success statuses are returned as [`TransferError::HttpStatus`].
    #[instrument(level = "debug", skip(self))]
    pub(crate) async fn get(&self, url: &str) -> Result<Response, TransferError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransferError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::http_status(url, status.as_u16()));
        }
        debug!(status = status.as_u16(), final_url = %response.url(), "received response");
        Ok(response)
    }
}

/// Reads `Content-Length` from the headers, if present and numeric.
pub(crate) fn content_length(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}
