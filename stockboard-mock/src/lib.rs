use async_trait::async_trait;
use stockboard_core::{DataSource, Document, FetchMode, StockboardError};

mod dynamic;
mod fixtures;
mod sink;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};
pub use fixtures::snapshots::SAMPLE_TODAY;
pub use sink::{RecordingSink, SinkCall};

/// Mock data source for CI-safe demos. Serves a fixed document.
pub struct MockSource {
    doc: Document,
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    /// Serve the multi-day sample fixture.
    #[must_use]
    pub fn new() -> Self {
        Self::with_document(fixtures::snapshots::sample())
    }

    /// Serve `doc`.
    #[must_use]
    pub const fn with_document(doc: Document) -> Self {
        Self { doc }
    }

    /// Serve a named fixture: `sample`, `minimal` or `empty`.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown fixture name.
    pub fn fixture(name: &str) -> Result<Self, StockboardError> {
        fixtures::snapshots::by_name(name)
            .map(Self::with_document)
            .ok_or_else(|| StockboardError::not_found(format!("fixture '{name}'")))
    }

    /// The document every fetch returns.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.doc
    }
}

#[async_trait]
impl DataSource for MockSource {
    fn name(&self) -> &'static str {
        "stockboard-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    async fn fetch(&self, _mode: FetchMode) -> Result<Document, StockboardError> {
        Ok(self.doc.clone())
    }
}

/// Named fixture documents.
pub mod fixture {
    pub use crate::fixtures::snapshots::{minimal, sample};
}
