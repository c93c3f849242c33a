#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use stockboard_core::StockboardError;
use url::Url;

use crate::HttpSource;

/// Raw GET abstraction (so we can inject responses in tests).
///
/// Implementations must bypass intermediate caches; the body is returned
/// undecoded.
#[async_trait]
pub trait HttpGet: Send + Sync {
    /// Fetch `url` and return the response body.
    async fn get(&self, url: &Url) -> Result<Vec<u8>, StockboardError>;
}

/// Real adapter backed by a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct RealAdapter {
    client: reqwest::Client,
}

impl RealAdapter {
    /// Wrap an existing client.
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpGet for RealAdapter {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, StockboardError> {
        let resp = self
            .client
            .get(url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| map_reqwest_err(&e))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StockboardError::not_found(url.path().to_string()));
        }
        if !status.is_success() {
            return Err(StockboardError::fetch(
                HttpSource::NAME,
                format!("status {status}: {}", url.path()),
            ));
        }

        let body = resp.bytes().await.map_err(|e| map_reqwest_err(&e))?;
        Ok(body.to_vec())
    }
}

fn map_reqwest_err(e: &reqwest::Error) -> StockboardError {
    if e.is_timeout() {
        StockboardError::fetch(HttpSource::NAME, format!("request timed out: {e}"))
    } else if e.is_connect() {
        StockboardError::fetch(HttpSource::NAME, format!("connection failed: {e}"))
    } else {
        StockboardError::fetch(HttpSource::NAME, e.to_string())
    }
}

#[cfg(feature = "test-adapters")]
impl dyn HttpGet {
    /// Build an `HttpGet` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn HttpGet>
    where
        F: Send + Sync + 'static + Fn(Url) -> Result<Vec<u8>, StockboardError>,
    {
        struct FnGet<F>(F);
        #[async_trait]
        impl<F> HttpGet for FnGet<F>
        where
            F: Send + Sync + 'static + Fn(Url) -> Result<Vec<u8>, StockboardError>,
        {
            async fn get(&self, url: &Url) -> Result<Vec<u8>, StockboardError> {
                (self.0)(url.clone())
            }
        }
        Arc::new(FnGet(f))
    }
}
