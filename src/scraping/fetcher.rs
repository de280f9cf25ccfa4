use crate::core::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::headers;

/// Raw body of a successfully fetched page.
///
/// The parsed `Html` tree is not `Send`, so callers parse the body after the
/// last `.await` that touches the page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Where the body came from, after redirects.
    pub url: String,
    pub body: String,
}

/// Seam over "GET one page". No retries: a failure is reported upward as-is.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError>;
}

pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn with_connect_timeout(connect_timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl PageSource for HttpPageFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError> {
        debug!("GET {} (timeout {}ms)", url, timeout.as_millis());

        let mut request = self
            .client
            .get(url)
            .header("User-Agent", headers::random_user_agent())
            .timeout(timeout);
        for (name, value) in headers::page_headers() {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("timed out after {}ms", timeout.as_millis())
            } else {
                e.to_string()
            };
            warn!("fetch failed for {}: {}", url, message);
            FetchError::Network {
                url: url.to_string(),
                message,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("fetch for {} returned HTTP {}", url, status.as_u16());
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            message: format!("failed to read body: {}", e),
        })?;

        Ok(FetchedPage {
            url: final_url,
            body,
        })
    }
}
