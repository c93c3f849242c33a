//! stockboard-core
//!
//! Core logic shared across the stockboard workspace.
//!
//! - `time_label`: parsing and ordering of `H:MM AM|PM` snapshot labels.
//! - `index`: read-only queries over a fetched `Document`.
//! - `resolve`: picks the effective (date, time, payload) for a selection.
//! - `fingerprint`: content digests used to detect that the source changed.
//! - `render`: row formatting and the `PresentationSink` contract.
//! - `source`: the `DataSource` trait implemented by fetch backends.
//!
//! Async runtime (Tokio)
//! ---------------------
//! `task::TaskHandle` wraps `tokio::task::JoinHandle<()>` and uses
//! `tokio::sync::oneshot::Sender<()>` for cooperative shutdown, so background
//! refresh requires a Tokio 1.x runtime. Everything else in this crate is
//! synchronous.
#![warn(missing_docs)]

/// Source of the local calendar day.
pub mod clock;
/// Change detection over whole documents.
pub mod fingerprint;
/// Read-only snapshot queries.
pub mod index;
/// Presentation contract and row formatting.
pub mod render;
/// Resolution of a selection to the snapshot that is displayed.
pub mod resolve;
/// Data-source trait and document decoding.
pub mod source;
/// Handles for background tasks.
pub mod task;
/// Time label normalization and ordering.
pub mod time_label;
pub mod types;

pub use clock::{Clock, FixedClock, LocalClock};
pub use fingerprint::{Fingerprint, has_changed};
pub use index::SnapshotIndex;
pub use render::{PresentationSink, RowFormatter, RowRecord, StatusLine, StockClass};
pub use resolve::resolve;
pub use source::{DataSource, FetchMode};
pub use types::*;
