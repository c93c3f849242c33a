#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use stockboard::{Board, Clock, DataSource, FixedClock};
use stockboard_core::clock::parse_iso_date;
use stockboard_mock::{
    DynamicMockController, DynamicMockSource, MockBehavior, MockSource, RecordingSink,
    SAMPLE_TODAY,
};

pub fn clock(today: &str) -> Arc<dyn Clock> {
    Arc::new(FixedClock(parse_iso_date(today).expect("valid fixture date")))
}

pub fn board_with_source(source: Arc<dyn DataSource>, today: &str) -> (Board, RecordingSink) {
    let sink = RecordingSink::new();
    let board = Board::builder()
        .source(source)
        .sink(sink.clone())
        .clock(clock(today))
        .fetch_timeout(Duration::from_secs(5))
        .build()
        .expect("board builds");
    (board, sink)
}

/// Board over the static sample fixture, "today" pinned to the sample date.
pub fn sample_board() -> (Board, RecordingSink) {
    board_with_source(Arc::new(MockSource::new()), SAMPLE_TODAY)
}

/// Board over a dynamic mock that serves the sample fixture by default.
pub async fn dynamic_board() -> (Board, RecordingSink, DynamicMockController) {
    let (source, controller) = DynamicMockSource::new_with_controller("dyn");
    controller
        .set_behavior(MockBehavior::Return(stockboard_mock::fixture::sample()))
        .await;
    let (board, sink) = board_with_source(source, SAMPLE_TODAY);
    (board, sink, controller)
}

/// Yield until the mock has seen `n` fetches.
pub async fn wait_for_fetches(controller: &DynamicMockController, n: usize) {
    while controller.fetch_count().await < n {
        tokio::task::yield_now().await;
    }
}
