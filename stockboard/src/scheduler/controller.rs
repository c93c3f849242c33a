use std::sync::Arc;

use stockboard_core::KeyPress;
use stockboard_core::task::TaskHandle;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tokio::time::{Duration, Instant};

use super::backoff::jitter_wait;
use super::refresh_sm::{Action, Event, FetchOutcome, Phase, RefreshMachine};
use crate::Board;
use crate::cycle::Trigger;

#[derive(Debug, Clone, Copy)]
enum Command {
    Visibility,
    Manual,
}

/// Handle to a running background refresh loop.
///
/// Dropping the handle stops the loop; [`stop`](Self::stop) does the same and
/// waits for it to finish.
#[derive(Debug)]
pub struct RefreshHandle {
    task: TaskHandle,
    commands: mpsc::UnboundedSender<Command>,
    chord: stockboard_core::KeyChord,
}

impl RefreshHandle {
    /// Report that the view became visible again.
    pub fn visibility_regained(&self) {
        let _ = self.commands.send(Command::Visibility);
    }

    /// Request an immediate, forced refresh.
    pub fn manual_refresh(&self) {
        let _ = self.commands.send(Command::Manual);
    }

    /// Forward a key press; returns `true` when it matched the manual refresh
    /// chord and a refresh was requested.
    pub fn key_pressed(&self, press: KeyPress) -> bool {
        if self.chord.matches(&press) {
            self.manual_refresh();
            true
        } else {
            false
        }
    }

    /// Whether the loop has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the loop and wait for it; in-flight fetches are cancelled.
    pub async fn stop(self) {
        self.task.stop().await;
    }
}

// Far enough ahead to never fire; tokio clamps sleeps the same way.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

fn deadline_after(delay_ms: u64) -> Instant {
    let now = Instant::now();
    now.checked_add(Duration::from_millis(delay_ms))
        .unwrap_or_else(|| now + FAR_FUTURE)
}

#[cfg(feature = "tracing")]
fn log_transition(prev: &RefreshMachine, next: &RefreshMachine) {
    if next.consecutive_failures > prev.consecutive_failures {
        tracing::warn!(
            consecutive_failures = next.consecutive_failures,
            "background refresh failed; keeping schedule"
        );
    } else if prev.consecutive_failures > 0 && next.consecutive_failures == 0 {
        tracing::info!(
            after_failures = prev.consecutive_failures,
            "background refresh recovered"
        );
    }
    if next.coalesced_ticks > prev.coalesced_ticks {
        tracing::debug!(
            coalesced_ticks = next.coalesced_ticks,
            in_flight = next.in_flight,
            "periodic tick coalesced"
        );
    }
}

/// Spawn the background refresh loop for `board`.
///
/// The first periodic tick fires one interval after spawning; call
/// [`Board::start`] for the initial load.
#[must_use]
pub fn spawn_refresh_loop(board: Arc<Board>) -> RefreshHandle {
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<Command>();
    let refresh = board.config().refresh;
    let chord = board.config().manual_refresh;
    let interval_ms = u64::try_from(refresh.interval.as_millis()).unwrap_or(u64::MAX);
    let jitter_percent = u32::from(refresh.jitter_percent);

    let join = tokio::spawn(async move {
        let mut machine = RefreshMachine::new(interval_ms);
        let mut in_flight: JoinSet<(Trigger, FetchOutcome)> = JoinSet::new();
        let timer = tokio::time::sleep_until(deadline_after(jitter_wait(
            machine.current_delay_ms(),
            jitter_percent,
        )));
        tokio::pin!(timer);

        loop {
            let event = tokio::select! {
                _ = &mut stop_rx => Event::Shutdown,
                Some(cmd) = cmd_rx.recv() => match cmd {
                    Command::Visibility => Event::VisibilityRegained,
                    Command::Manual => Event::ManualRefresh,
                },
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => match joined {
                    Ok((trigger, outcome)) => Event::FetchCompleted { trigger, outcome },
                    // A panicking cycle still has to release its in-flight slot
                    Err(_join_err) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(error = %_join_err, "refresh cycle task failed");
                        Event::FetchCompleted { trigger: Trigger::Periodic, outcome: FetchOutcome::Failed }
                    }
                },
                () = &mut timer => Event::Tick,
            };

            let (next, actions) = machine.clone().handle(event);
            #[cfg(feature = "tracing")]
            log_transition(&machine, &next);
            machine = next;

            for action in actions {
                match action {
                    Action::StartFetch { trigger } => {
                        let board = Arc::clone(&board);
                        in_flight.spawn(async move {
                            let result = board.refresh(trigger).await;
                            #[cfg(feature = "tracing")]
                            if let Err(err) = &result {
                                tracing::warn!(trigger = trigger.as_str(), error = %err, "background refresh failed");
                            }
                            (trigger, FetchOutcome::from_cycle(&result))
                        });
                    }
                    Action::ScheduleTick { delay_ms } => {
                        timer
                            .as_mut()
                            .reset(deadline_after(jitter_wait(delay_ms, jitter_percent)));
                    }
                    Action::Stop => {
                        #[cfg(feature = "tracing")]
                        tracing::info!(
                            coalesced_ticks = machine.coalesced_ticks,
                            consecutive_failures = machine.consecutive_failures,
                            "refresh loop stopping"
                        );
                        in_flight.shutdown().await;
                        return;
                    }
                }
            }

            if matches!(machine.phase, Phase::Terminated) {
                return;
            }
        }
    });

    RefreshHandle {
        task: TaskHandle::new(join, stop_tx),
        commands: cmd_tx,
        chord,
    }
}
