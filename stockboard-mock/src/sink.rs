use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use stockboard_core::{BrandKey, PresentationSink, RowRecord, StatusLine};

/// One call received by a [`RecordingSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkCall {
    /// `populate_times(date, times)`.
    PopulateTimes {
        /// Date the options belong to.
        date: String,
        /// Options, latest first.
        times: Vec<String>,
    },
    /// `show_status(status)`.
    Status(StatusLine),
    /// `render_section(brand, rows)`.
    Section {
        /// Section key.
        brand: BrandKey,
        /// Rows; empty hides the section.
        rows: Vec<RowRecord>,
    },
    /// `set_not_found(flag)`.
    NotFound(bool),
}

/// Presentation sink that records every call.
///
/// Clones share the same log, so a test can keep one clone while the board
/// owns another.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
}

impl RecordingSink {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Vec<SinkCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, call: SinkCall) {
        self.log().push(call);
    }

    /// Every call so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<SinkCall> {
        self.log().clone()
    }

    /// Number of completed renders (one status line per render).
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.log()
            .iter()
            .filter(|c| matches!(c, SinkCall::Status(_)))
            .count()
    }

    /// The most recent status line.
    #[must_use]
    pub fn last_status(&self) -> Option<StatusLine> {
        self.log().iter().rev().find_map(|c| match c {
            SinkCall::Status(s) => Some(s.clone()),
            _ => None,
        })
    }

    /// The most recent time options as `(date, times)`.
    #[must_use]
    pub fn last_times(&self) -> Option<(String, Vec<String>)> {
        self.log().iter().rev().find_map(|c| match c {
            SinkCall::PopulateTimes { date, times } => Some((date.clone(), times.clone())),
            _ => None,
        })
    }

    /// The most recent rows rendered for `brand`.
    #[must_use]
    pub fn section(&self, brand: &str) -> Option<Vec<RowRecord>> {
        self.log().iter().rev().find_map(|c| match c {
            SinkCall::Section { brand: b, rows } if b.as_str() == brand => Some(rows.clone()),
            _ => None,
        })
    }

    /// The most recent not-found indicator state.
    #[must_use]
    pub fn not_found(&self) -> Option<bool> {
        self.log().iter().rev().find_map(|c| match c {
            SinkCall::NotFound(flag) => Some(*flag),
            _ => None,
        })
    }

    /// Forget every recorded call.
    pub fn clear(&self) {
        self.log().clear();
    }
}

impl PresentationSink for RecordingSink {
    fn populate_times(&mut self, date: &str, times: &[String]) {
        self.push(SinkCall::PopulateTimes {
            date: date.to_string(),
            times: times.to_vec(),
        });
    }

    fn show_status(&mut self, status: &StatusLine) {
        self.push(SinkCall::Status(status.clone()));
    }

    fn render_section(&mut self, brand: &BrandKey, rows: &[RowRecord]) {
        self.push(SinkCall::Section {
            brand: brand.clone(),
            rows: rows.to_vec(),
        });
    }

    fn set_not_found(&mut self, not_found: bool) {
        self.push(SinkCall::NotFound(not_found));
    }
}
