use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::time::Duration;

use stockboard_core::render::RowFormatter;
use stockboard_core::{
    BoardConfig, BrandKey, Clock, DataSource, Document, FetchMode, Fingerprint, Grouping, KeyChord,
    LocalClock, PresentationSink, Resolution, Selection, StockboardError,
};
use tokio::sync::Mutex;

/// Everything a render cycle reads or commits, guarded by one lock.
pub(crate) struct BoardState {
    /// Last successfully fetched document.
    pub(crate) document: Document,
    /// Fingerprint of `document`; `None` until the first successful fetch.
    pub(crate) fingerprint: Option<Fingerprint>,
    pub(crate) selection: Selection,
    pub(crate) last_resolution: Option<Resolution>,
    /// Set by user-driven cycles; the next completed cycle renders even when
    /// the document is unchanged.
    pub(crate) render_pending: bool,
    pub(crate) sink: Box<dyn PresentationSink>,
}

/// Controller that owns the board state and drives fetch/resolve/render cycles.
///
/// All methods take `&self`; share a board across tasks with `Arc<Board>`.
pub struct Board {
    pub(crate) source: Arc<dyn DataSource>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) cfg: BoardConfig,
    pub(crate) formatter: RowFormatter,
    pub(crate) state: Mutex<BoardState>,
    /// Last issued request number.
    pub(crate) seq: AtomicU64,
}

/// Builder for constructing a [`Board`] with custom configuration.
pub struct BoardBuilder {
    source: Option<Arc<dyn DataSource>>,
    sink: Option<Box<dyn PresentationSink>>,
    clock: Arc<dyn Clock>,
    cfg: BoardConfig,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    /// Create a new builder with default configuration and the local clock.
    ///
    /// A data source and a presentation sink must be supplied before
    /// [`build`](Self::build).
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            sink: None,
            clock: Arc::new(LocalClock),
            cfg: BoardConfig::default(),
        }
    }

    /// Set the data source the board fetches from.
    #[must_use]
    pub fn source(mut self, source: Arc<dyn DataSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the presentation sink the board renders into.
    #[must_use]
    pub fn sink<S>(mut self, sink: S) -> Self
    where
        S: PresentationSink + 'static,
    {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Replace the clock used to seed "today".
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: BoardConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Brand sections in display order.
    #[must_use]
    pub fn brands<I>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = BrandKey>,
    {
        self.cfg.brands = brands.into_iter().collect();
        self
    }

    /// Digit grouping used for prices.
    #[must_use]
    pub const fn grouping(mut self, grouping: Grouping) -> Self {
        self.cfg.grouping = grouping;
        self
    }

    /// Stock text that marks a row as in stock.
    #[must_use]
    pub fn in_stock_label(mut self, label: impl Into<String>) -> Self {
        self.cfg.in_stock_label = label.into();
        self
    }

    /// Upper bound for a single fetch.
    #[must_use]
    pub const fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.fetch_timeout = timeout;
        self
    }

    /// Interval between background refreshes.
    #[must_use]
    pub const fn refresh_interval(mut self, interval: Duration) -> Self {
        self.cfg.refresh.interval = interval;
        self
    }

    /// Random jitter, in percent of the interval, added to each background tick.
    #[must_use]
    pub const fn refresh_jitter(mut self, percent: u8) -> Self {
        self.cfg.refresh.jitter_percent = percent;
        self
    }

    /// Key combination that triggers a manual refresh.
    #[must_use]
    pub const fn manual_refresh_chord(mut self, chord: KeyChord) -> Self {
        self.cfg.manual_refresh = chord;
        self
    }

    /// Build the board. The initial selection is the latest snapshot of today.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the source or sink is missing, the brand list
    /// is empty, or an interval, timeout or jitter setting is out of range.
    pub fn build(self) -> Result<Board, StockboardError> {
        let Some(source) = self.source else {
            return Err(StockboardError::InvalidArg(
                "no data source set; add one via source(...)".to_string(),
            ));
        };
        let Some(sink) = self.sink else {
            return Err(StockboardError::InvalidArg(
                "no presentation sink set; add one via sink(...)".to_string(),
            ));
        };
        if self.cfg.brands.is_empty() {
            return Err(StockboardError::InvalidArg(
                "brand list must not be empty".to_string(),
            ));
        }
        if self.cfg.refresh.interval.is_zero() {
            return Err(StockboardError::InvalidArg(
                "refresh interval must be positive".to_string(),
            ));
        }
        if self.cfg.fetch_timeout.is_zero() {
            return Err(StockboardError::InvalidArg(
                "fetch timeout must be positive".to_string(),
            ));
        }
        if self.cfg.refresh.jitter_percent > 100 {
            return Err(StockboardError::InvalidArg(format!(
                "jitter percent must be in [0, 100], got {}",
                self.cfg.refresh.jitter_percent
            )));
        }

        let selection = Selection::latest(self.clock.today_iso());
        Ok(Board {
            source,
            formatter: RowFormatter::from_config(&self.cfg),
            clock: self.clock,
            cfg: self.cfg,
            state: Mutex::new(BoardState {
                document: Document::new(),
                fingerprint: None,
                selection,
                last_resolution: None,
                render_pending: false,
                sink,
            }),
            seq: AtomicU64::new(0),
        })
    }
}

impl Board {
    /// Start building a new `Board`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use stockboard::Board;
    /// use stockboard_mock::{MockSource, RecordingSink};
    ///
    /// let board = Board::builder()
    ///     .source(Arc::new(MockSource::new()))
    ///     .sink(RecordingSink::new())
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> BoardBuilder {
        BoardBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.cfg
    }

    /// Current selection, including any date correction already applied.
    pub async fn selection(&self) -> Selection {
        self.state.lock().await.selection.clone()
    }

    /// Copy of the last committed document.
    pub async fn document(&self) -> Document {
        self.state.lock().await.document.clone()
    }

    /// Fingerprint of the last committed document.
    pub async fn fingerprint(&self) -> Option<Fingerprint> {
        self.state.lock().await.fingerprint
    }

    /// Resolution produced by the last render.
    pub async fn last_resolution(&self) -> Option<Resolution> {
        self.state.lock().await.last_resolution.clone()
    }

    /// Fetch from the source, bounded by the configured timeout.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "stockboard::core::fetch_with_timeout",
            skip(self),
            fields(
                source = self.source.name(),
                timeout_ms = u64::try_from(self.cfg.fetch_timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn fetch_with_timeout(
        &self,
        mode: FetchMode,
    ) -> Result<Document, StockboardError> {
        let timeout = self.cfg.fetch_timeout;
        (tokio::time::timeout(timeout, self.source.fetch(mode)).await).unwrap_or_else(|_| {
            Err(StockboardError::timeout(
                self.source.name(),
                u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ))
        })
    }
}
