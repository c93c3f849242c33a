//! stockboard-http
//!
//! `DataSource` that retrieves the snapshot document over HTTP. Every request
//! is sent with `Cache-Control: no-cache` and `Pragma: no-cache`; a hard
//! reload also appends a cache-busting query parameter so that intermediaries
//! ignoring those headers still miss.
#![warn(missing_docs)]

/// GET abstraction and the production adapter backed by `reqwest`.
pub mod adapter;
mod builder;

use std::sync::Arc;

use adapter::HttpGet;
use async_trait::async_trait;
use stockboard_core::source::decode_document;
use stockboard_core::{DataSource, Document, FetchMode, StockboardError};
use url::Url;

pub use builder::HttpSourceBuilder;

/// Data source reading the whole document from a single URL.
pub struct HttpSource {
    url: Url,
    cache_bust_param: String,
    get: Arc<dyn HttpGet>,
}

impl HttpSource {
    /// Source name used in logs and errors.
    pub const NAME: &'static str = "stockboard-http";

    /// Query parameter appended on hard reloads unless overridden.
    pub const DEFAULT_CACHE_BUST_PARAM: &'static str = "_";

    /// Start configuring a source for `url`.
    #[must_use]
    pub fn builder(url: impl Into<String>) -> HttpSourceBuilder {
        HttpSourceBuilder::new(url)
    }

    /// Document URL without any cache buster.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// URL requested for `mode`.
    #[must_use]
    pub fn target(&self, mode: FetchMode) -> Url {
        match mode {
            FetchMode::Fresh => self.url.clone(),
            FetchMode::HardReload => cache_bust(
                &self.url,
                &self.cache_bust_param,
                chrono::Utc::now().timestamp_millis(),
            ),
        }
    }

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("status 404") || m.contains("status 410")
    }

    fn normalize_error(e: StockboardError) -> StockboardError {
        match e {
            StockboardError::Fetch { source_name: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    StockboardError::not_found(msg)
                } else {
                    StockboardError::fetch(Self::NAME, msg)
                }
            }
            StockboardError::Other(msg) => StockboardError::fetch(Self::NAME, msg),
            other => other,
        }
    }
}

/// `url` with `param=nonce` appended to its query.
#[must_use]
pub fn cache_bust(url: &Url, param: &str, nonce: i64) -> Url {
    let mut out = url.clone();
    out.query_pairs_mut().append_pair(param, &nonce.to_string());
    out
}

#[async_trait]
impl DataSource for HttpSource {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "HTTP"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "stockboard_http::fetch",
            skip(self),
            fields(url = %self.url),
        )
    )]
    async fn fetch(&self, mode: FetchMode) -> Result<Document, StockboardError> {
        let target = self.target(mode);
        let body = self
            .get
            .get(&target)
            .await
            .map_err(Self::normalize_error)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(bytes = body.len(), "document body received");
        decode_document(&body)
    }
}
