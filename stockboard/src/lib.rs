//! Stockboard keeps a price board in sync with a snapshot document.
//!
//! Overview
//! - Fetches the whole snapshot document (date → time → brand → items) from a
//!   pluggable `DataSource`.
//! - Resolves the user's (date, time) selection to the snapshot actually shown,
//!   falling back to the latest earlier date when the requested one has no data.
//! - Renders the result through a `PresentationSink`: time options, status line,
//!   one section per brand, and a not-found indicator.
//! - Refreshes in the background on a fixed interval, when the view becomes
//!   visible again, and on an explicit key command.
//!
//! Key behaviors and trade-offs
//! - Change detection: periodic and visibility refreshes re-render only when the
//!   document fingerprint changed. A manual refresh always re-renders.
//! - Ordering: every fetch takes a number from a monotonic request sequence and
//!   a result that is no longer the latest issued is discarded, so a slow fetch
//!   can never overwrite a newer one.
//! - Failures: a failed fetch never touches the committed document. User-driven
//!   cycles still render against the last good document.
//!
//! Examples
//! Building a board and wiring background refresh:
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockboard::{Board, spawn_refresh_loop};
//!
//! let board = Arc::new(
//!     Board::builder()
//!         .source(Arc::new(HttpSource::builder(url).build()?))
//!         .sink(MyTerminalSink::default())
//!         .refresh_interval(std::time::Duration::from_secs(60))
//!         .build()?,
//! );
//! board.start().await?;
//! let refresh = spawn_refresh_loop(Arc::clone(&board));
//! // ... forward input events ...
//! board.select_date("2024-01-01").await?;
//! refresh.manual_refresh();
//! refresh.stop().await;
//! ```
//!
//! See `demos/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod cycle;
/// Background refresh: state machine and tokio driver.
pub mod scheduler;

pub use core::{Board, BoardBuilder};
pub use cycle::{CycleOutcome, Trigger};
pub use scheduler::controller::{RefreshHandle, spawn_refresh_loop};

// Re-export core types for convenience
pub use stockboard_core::{
    BoardConfig, BrandKey, Clock, Correction, DataSource, Document, EffectiveTime, FetchMode,
    FixedClock, Fingerprint, Grouping, Item, KeyChord, KeyPress, LocalClock, Payload,
    PresentationSink, RefreshConfig, Resolution, RowRecord, Selection, StatusLine, StockClass,
    StockboardError,
};
pub use stockboard_core::clock::parse_iso_date;
