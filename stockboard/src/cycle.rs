use std::sync::atomic::Ordering;

use stockboard_core::clock::parse_iso_date;
use stockboard_core::index::SnapshotIndex;
use stockboard_core::render::render_resolution;
use stockboard_core::{
    Document, FetchMode, Fingerprint, KeyPress, Resolution, StockboardError, has_changed, resolve,
};

use crate::core::{Board, BoardState};

/// What started a refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Fixed-interval background tick.
    Periodic,
    /// The view became visible again.
    VisibilityRegained,
    /// Explicit user command (key chord).
    Manual,
}

impl Trigger {
    /// Whether the cycle renders even when the document is unchanged.
    #[must_use]
    pub const fn forces_render(self) -> bool {
        matches!(self, Self::Manual)
    }

    /// Short label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Periodic => "periodic",
            Self::VisibilityRegained => "visibility",
            Self::Manual => "manual",
        }
    }
}

/// Result of one fetch/resolve/render cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The view was rendered from a freshly fetched document.
    Rendered {
        /// What was rendered.
        resolution: Resolution,
        /// Whether the fetched document differed from the committed one.
        changed: bool,
    },
    /// The fetch failed; the view was rendered from the last good document.
    RenderedStale {
        /// What was rendered.
        resolution: Resolution,
        /// Why the fetch failed.
        error: StockboardError,
    },
    /// The fetched document was identical; nothing was rendered.
    Unchanged,
    /// A newer fetch was issued while this one was in flight; its result was
    /// discarded.
    Superseded,
}

impl CycleOutcome {
    /// The rendered resolution, if this cycle rendered.
    #[must_use]
    pub const fn resolution(&self) -> Option<&Resolution> {
        match self {
            Self::Rendered { resolution, .. } | Self::RenderedStale { resolution, .. } => {
                Some(resolution)
            }
            Self::Unchanged | Self::Superseded => None,
        }
    }
}

impl Board {
    /// Initial load: select the latest snapshot of today and render it.
    ///
    /// # Errors
    /// Only internal errors; fetch failures render against an empty document.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "stockboard::start", skip(self)))]
    pub async fn start(&self) -> Result<CycleOutcome, StockboardError> {
        let today = self.clock.today_iso();
        self.run_cycle("start", FetchMode::Fresh, |state| {
            state.selection.requested_date = today;
            state.selection.requested_time.clear();
            state.render_pending = true;
        })
        .await
    }

    /// Select a date (ISO `YYYY-MM-DD`); the time selection resets to latest.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `date` is not an ISO date. No fetch happens.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "stockboard::select_date", skip(self)))]
    pub async fn select_date(&self, date: &str) -> Result<CycleOutcome, StockboardError> {
        parse_iso_date(date)?;
        let date = date.to_string();
        self.run_cycle("select_date", FetchMode::Fresh, move |state| {
            state.selection.requested_date = date;
            state.selection.requested_time.clear();
            populate_times(state);
            state.render_pending = true;
        })
        .await
    }

    /// Select a time label on the current date; an empty label means latest.
    ///
    /// # Errors
    /// Only internal errors; fetch failures render against the last good document.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "stockboard::select_time", skip(self)))]
    pub async fn select_time(&self, time: &str) -> Result<CycleOutcome, StockboardError> {
        let time = time.trim().to_string();
        self.run_cycle("select_time", FetchMode::Fresh, move |state| {
            state.selection.requested_time = time;
            state.render_pending = true;
        })
        .await
    }

    /// Re-seed today's date, clear the time and reload bypassing every cache.
    ///
    /// # Errors
    /// Only internal errors; fetch failures render against the last good document.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "stockboard::reset_to_today", skip(self)))]
    pub async fn reset_to_today(&self) -> Result<CycleOutcome, StockboardError> {
        let today = self.clock.today_iso();
        self.run_cycle("reset", FetchMode::HardReload, move |state| {
            state.selection.requested_date = today;
            state.selection.requested_time.clear();
            populate_times(state);
            state.render_pending = true;
        })
        .await
    }

    /// Re-fetch in response to a background or user trigger.
    ///
    /// Periodic and visibility refreshes render only when the document
    /// changed; a manual refresh always renders.
    ///
    /// # Errors
    /// Returns the fetch error when a change-detected refresh fails. The
    /// committed document is left untouched.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "stockboard::refresh", skip(self), fields(trigger = trigger.as_str()))
    )]
    pub async fn refresh(&self, trigger: Trigger) -> Result<CycleOutcome, StockboardError> {
        let force = trigger.forces_render();
        self.run_cycle(trigger.as_str(), FetchMode::Fresh, move |state| {
            if force {
                state.render_pending = true;
            }
        })
        .await
    }

    /// Whether `press` is the configured manual refresh chord.
    #[must_use]
    pub fn is_refresh_chord(&self, press: &KeyPress) -> bool {
        self.cfg.manual_refresh.matches(press)
    }

    async fn run_cycle<F>(
        &self,
        _label: &'static str,
        mode: FetchMode,
        prepare: F,
    ) -> Result<CycleOutcome, StockboardError>
    where
        F: FnOnce(&mut BoardState) + Send,
    {
        {
            let mut state = self.state.lock().await;
            prepare(&mut *state);
        }

        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let fetched = self.fetch_with_timeout(mode).await;

        let mut state = self.state.lock().await;
        let latest = self.seq.load(Ordering::SeqCst);
        if seq != latest {
            #[cfg(feature = "tracing")]
            tracing::warn!(cycle = _label, seq, latest, "discarding superseded fetch result");
            return Ok(CycleOutcome::Superseded);
        }

        match fetched {
            Ok(doc) => {
                let fp = Fingerprint::of(&doc);
                let changed = has_changed(state.fingerprint.as_ref(), &fp);
                if changed {
                    #[cfg(feature = "tracing")]
                    tracing::info!(cycle = _label, fingerprint = %fp, dates = doc.len(), "committing new document");
                    commit(&mut state, doc, fp);
                }
                if !changed && !state.render_pending {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(cycle = _label, "document unchanged; skipping render");
                    return Ok(CycleOutcome::Unchanged);
                }
                let resolution = self.render(&mut state);
                Ok(CycleOutcome::Rendered {
                    resolution,
                    changed,
                })
            }
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(cycle = _label, source = self.source.name(), error = %error, "fetch failed; keeping last good document");
                if !state.render_pending {
                    return Err(error);
                }
                let resolution = self.render(&mut state);
                Ok(CycleOutcome::RenderedStale { resolution, error })
            }
        }
    }

    /// Resolve the current selection, apply any correction and drive the sink.
    fn render(&self, state: &mut BoardState) -> Resolution {
        let resolution = resolve(&state.selection, &state.document);
        if let Some(correction) = &resolution.correction {
            #[cfg(feature = "tracing")]
            tracing::info!(
                requested = %state.selection.requested_date,
                fallback = %correction.date,
                "requested date has no data; falling back"
            );
            state.selection.apply(correction);
        }
        populate_times(state);
        render_resolution(
            state.sink.as_mut(),
            &self.cfg.brands,
            &self.formatter,
            &resolution,
        );
        state.last_resolution = Some(resolution.clone());
        state.render_pending = false;
        resolution
    }
}

fn commit(state: &mut BoardState, doc: Document, fp: Fingerprint) {
    state.document = doc;
    state.fingerprint = Some(fp);
}

/// Emit the time options of the selected date from the committed document.
fn populate_times(state: &mut BoardState) {
    let date = state.selection.requested_date.clone();
    let times = SnapshotIndex::new(&state.document).times_for_date(&date);
    state.sink.populate_times(&date, &times);
}
