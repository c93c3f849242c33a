use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use stockboard_core::{DataSource, Document, FetchMode, StockboardError};

/// Instruction for how a fetch should behave.
#[derive(Clone, Debug)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Return the provided value after a delay.
    Delay(Duration, T),
    /// Fail immediately with the provided error.
    Fail(StockboardError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    default_rule: Option<MockBehavior<Document>>,
    queued: VecDeque<MockBehavior<Document>>,
    fetch_log: Vec<FetchMode>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for every fetch that has no queued behavior.
    pub async fn set_behavior(&self, behavior: MockBehavior<Document>) {
        let mut guard = self.state.lock().await;
        guard.default_rule = Some(behavior);
    }

    /// Queue a behavior for exactly one upcoming fetch. Queued behaviors are
    /// consumed in order before the default applies.
    pub async fn push_behavior(&self, behavior: MockBehavior<Document>) {
        let mut guard = self.state.lock().await;
        guard.queued.push_back(behavior);
    }

    /// Number of fetches received so far.
    pub async fn fetch_count(&self) -> usize {
        self.state.lock().await.fetch_log.len()
    }

    /// Modes of all fetches received so far, oldest first.
    pub async fn fetch_modes(&self) -> Vec<FetchMode> {
        self.state.lock().await.fetch_log.clone()
    }

    /// Clear all configured behaviors and the fetch log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.default_rule = None;
        guard.queued.clear();
        guard.fetch_log.clear();
    }
}

/// A data source that defers all behavior to an external controller.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn DataSource>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn DataSource>, controller)
    }
}

#[async_trait]
impl DataSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    async fn fetch(&self, mode: FetchMode) -> Result<Document, StockboardError> {
        // Acquire behavior snapshot without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.fetch_log.push(mode);
            let queued = guard.queued.pop_front();
            queued.or_else(|| guard.default_rule.clone())
        };

        match behavior {
            Some(MockBehavior::Return(doc)) => Ok(doc),
            Some(MockBehavior::Delay(wait, doc)) => {
                tokio::time::sleep(wait).await;
                Ok(doc)
            }
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(StockboardError::not_found("document")),
        }
    }
}
