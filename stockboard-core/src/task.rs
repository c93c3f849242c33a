use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Owner of a background task that stops on request and aborts on drop.
///
/// Dropping the handle sends the stop signal and aborts the task if it is
/// still running, so a task that ignores the signal cannot outlive its owner.
#[derive(Debug)]
pub struct TaskHandle {
    join: Option<JoinHandle<()>>,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl TaskHandle {
    /// Wrap a spawned task and the sender half of its stop channel.
    #[must_use]
    pub const fn new(join: JoinHandle<()>, stop_tx: oneshot::Sender<()>) -> Self {
        Self {
            join: Some(join),
            stop_tx: Some(stop_tx),
        }
    }

    fn signal_stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            // the receiver is gone once the task has exited
            let _ = tx.send(());
        }
    }

    /// Signal the task to stop and wait for it to finish.
    pub async fn stop(mut self) {
        self.signal_stop();
        if let Some(join) = self.join.take() {
            let _ = join.await;
        }
    }

    /// Whether the task has already completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.signal_stop();
        if let Some(join) = self.join.take()
            && !join.is_finished()
        {
            join.abort();
        }
    }
}
