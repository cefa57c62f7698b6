use std::time::Duration;

use reqwest::{Client, Url};
use tracing::debug;

use super::av::redact;
use crate::error::{Error, Result};

/// Retrieves the raw body behind a URL.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}

#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        let shown = redact(url);
        debug!(url = %shown, "sending request");

        let res = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Transport {
                url: shown.clone(),
                source: e.without_url(),
            })?;

        if !res.status().is_success() {
            return Err(Error::HttpStatus {
                url: shown,
                status: res.status(),
            });
        }

        let body = res.bytes().await.map_err(|e| Error::Transport {
            url: shown.clone(),
            source: e.without_url(),
        })?;
        debug!(url = %shown, bytes = body.len(), "received response");

        Ok(body.to_vec())
    }
}
