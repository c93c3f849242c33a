use std::sync::Arc;
use std::time::Duration;

use stockboard_core::StockboardError;
use url::Url;

use crate::HttpSource;
use crate::adapter::{HttpGet, RealAdapter};

/// Builder for [`HttpSource`].
#[must_use]
pub struct HttpSourceBuilder {
    url: String,
    cache_bust_param: String,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
    adapter: Option<Arc<dyn HttpGet>>,
}

impl HttpSourceBuilder {
    /// Builder for the document at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cache_bust_param: HttpSource::DEFAULT_CACHE_BUST_PARAM.to_string(),
            user_agent: None,
            timeout: None,
            client: None,
            adapter: None,
        }
    }

    /// Query parameter used to defeat caches on hard reloads.
    pub fn cache_bust_param(mut self, param: impl Into<String>) -> Self {
        self.cache_bust_param = param.into();
        self
    }

    /// `User-Agent` header sent with every request.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Transport-level timeout. The board applies its own fetch timeout on
    /// top of this.
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use an existing `reqwest::Client`; `user_agent` and `timeout` are then
    /// ignored.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Replace the HTTP transport entirely.
    pub fn adapter(mut self, adapter: Arc<dyn HttpGet>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Validate and build the source.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the URL does not parse or is not http(s), or
    /// the cache-bust parameter is empty, and `Other` when the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<HttpSource, StockboardError> {
        let url = Url::parse(&self.url)
            .map_err(|e| StockboardError::InvalidArg(format!("invalid url {:?}: {e}", self.url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(StockboardError::InvalidArg(format!(
                "unsupported url scheme {:?}",
                url.scheme()
            )));
        }
        if self.cache_bust_param.trim().is_empty() {
            return Err(StockboardError::InvalidArg(
                "cache-bust parameter must not be empty".into(),
            ));
        }

        let get: Arc<dyn HttpGet> = match (self.adapter, self.client) {
            (Some(adapter), _) => adapter,
            (None, Some(client)) => Arc::new(RealAdapter::new(client)),
            (None, None) => {
                let mut builder = reqwest::Client::builder();
                if let Some(ua) = self.user_agent {
                    builder = builder.user_agent(ua);
                }
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                let client = builder
                    .build()
                    .map_err(|e| StockboardError::Other(format!("http client: {e}")))?;
                Arc::new(RealAdapter::new(client))
            }
        };

        Ok(HttpSource {
            url,
            cache_bust_param: self.cache_bust_param,
            get,
        })
    }
}
