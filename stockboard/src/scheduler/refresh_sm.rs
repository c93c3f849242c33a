use crate::cycle::{CycleOutcome, Trigger};
use stockboard_core::StockboardError;

/// Refresh machine phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a trigger.
    Idle,
    /// At least one fetch is in flight.
    Fetching,
    /// Shut down; every event is ignored.
    Terminated,
}

/// How a fetch started by the machine ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A new document was committed.
    Changed,
    /// Same document as before.
    Unchanged,
    /// Discarded in favor of a newer fetch.
    Superseded,
    /// The fetch failed; the committed document was kept.
    Failed,
}

impl FetchOutcome {
    /// Classify the result of a board refresh.
    #[must_use]
    pub fn from_cycle(result: &Result<CycleOutcome, StockboardError>) -> Self {
        match result {
            Ok(CycleOutcome::Rendered { changed: true, .. }) => Self::Changed,
            Ok(CycleOutcome::Rendered { changed: false, .. } | CycleOutcome::Unchanged) => {
                Self::Unchanged
            }
            Ok(CycleOutcome::Superseded) => Self::Superseded,
            Ok(CycleOutcome::RenderedStale { .. }) | Err(_) => Self::Failed,
        }
    }
}

/// Input to the refresh machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The interval timer fired.
    Tick,
    /// The view became visible again.
    VisibilityRegained,
    /// The manual refresh command was issued.
    ManualRefresh,
    /// A fetch started by [`Action::StartFetch`] finished.
    FetchCompleted {
        /// Trigger of the finished fetch.
        trigger: Trigger,
        /// How it ended.
        outcome: FetchOutcome,
    },
    /// Stop refreshing.
    Shutdown,
}

/// Side effect requested by the refresh machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Run one board refresh cycle.
    StartFetch {
        /// Why the fetch runs.
        trigger: Trigger,
    },
    /// Arm the interval timer.
    ScheduleTick {
        /// Delay before the next tick, before jitter.
        delay_ms: u64,
    },
    /// Exit the driver loop.
    Stop,
}

/// Pure refresh scheduler: `handle` maps an event to the next state and the
/// actions the driver must perform.
///
/// Periodic ticks are coalesced while a fetch is in flight. Visibility and
/// manual triggers always start a fetch; overlapping results are sorted out by
/// the board's request sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshMachine {
    /// Current phase.
    pub phase: Phase,
    /// Interval between periodic ticks.
    pub interval_ms: u64,
    /// Fetches started and not yet completed.
    pub in_flight: u32,
    /// Periodic ticks skipped because a fetch was already running.
    pub coalesced_ticks: u64,
    /// Failed fetches since the last successful one.
    pub consecutive_failures: u32,
}

impl RefreshMachine {
    /// Idle machine ticking every `interval_ms`.
    #[must_use]
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            phase: Phase::Idle,
            interval_ms,
            in_flight: 0,
            coalesced_ticks: 0,
            consecutive_failures: 0,
        }
    }

    /// Apply `event`.
    pub fn handle(self, event: Event) -> (Self, Vec<Action>) {
        match (self.phase, event) {
            (Phase::Terminated, _) => (self, Vec::new()),
            (_, Event::Shutdown) => (
                Self {
                    phase: Phase::Terminated,
                    ..self
                },
                vec![Action::Stop],
            ),
            (Phase::Idle, Event::Tick) => {
                let (next, mut actions) = self.start_fetch(Trigger::Periodic);
                actions.push(Action::ScheduleTick {
                    delay_ms: next.interval_ms,
                });
                (next, actions)
            }
            (Phase::Fetching, Event::Tick) => {
                let delay_ms = self.interval_ms;
                (
                    Self {
                        coalesced_ticks: self.coalesced_ticks + 1,
                        ..self
                    },
                    vec![Action::ScheduleTick { delay_ms }],
                )
            }
            (_, Event::VisibilityRegained) => self.start_fetch(Trigger::VisibilityRegained),
            (_, Event::ManualRefresh) => self.start_fetch(Trigger::Manual),
            (_, Event::FetchCompleted { outcome, .. }) => {
                let in_flight = self.in_flight.saturating_sub(1);
                let consecutive_failures = match outcome {
                    FetchOutcome::Failed => self.consecutive_failures.saturating_add(1),
                    FetchOutcome::Superseded => self.consecutive_failures,
                    FetchOutcome::Changed | FetchOutcome::Unchanged => 0,
                };
                let phase = if in_flight == 0 {
                    Phase::Idle
                } else {
                    Phase::Fetching
                };
                (
                    Self {
                        phase,
                        in_flight,
                        consecutive_failures,
                        ..self
                    },
                    Vec::new(),
                )
            }
        }
    }

    fn start_fetch(self, trigger: Trigger) -> (Self, Vec<Action>) {
        (
            Self {
                phase: Phase::Fetching,
                in_flight: self.in_flight + 1,
                ..self
            },
            vec![Action::StartFetch { trigger }],
        )
    }

    /// Delay to arm the first tick with.
    #[must_use]
    pub const fn current_delay_ms(&self) -> u64 {
        self.interval_ms
    }
}
