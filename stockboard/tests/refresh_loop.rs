mod helpers;

use std::sync::Arc;
use std::time::Duration;

use stockboard::{Board, KeyPress, spawn_refresh_loop};
use stockboard_mock::{
    DynamicMockSource, MockBehavior, MockSource, RecordingSink, SAMPLE_TODAY, fixture,
};

use helpers::{board_with_source, clock, dynamic_board, wait_for_fetches};

#[tokio::test(start_paused = true)]
async fn identical_refetch_does_not_render() {
    let (board, sink) = board_with_source(Arc::new(MockSource::new()), SAMPLE_TODAY);
    let board = Arc::new(board);
    board.start().await.unwrap();
    assert_eq!(sink.render_count(), 1);

    let handle = spawn_refresh_loop(Arc::clone(&board));
    tokio::time::sleep(Duration::from_secs(60 * 5 + 1)).await;
    assert_eq!(sink.render_count(), 1);

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn periodic_refresh_renders_changed_document() {
    let (board, sink, controller) = dynamic_board().await;
    let board = Arc::new(board);
    board.start().await.unwrap();

    controller
        .set_behavior(MockBehavior::Return(fixture::minimal()))
        .await;
    let handle = spawn_refresh_loop(Arc::clone(&board));

    tokio::time::sleep(Duration::from_secs(59)).await;
    assert_eq!(controller.fetch_count().await, 1);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(controller.fetch_count().await, 2);
    assert_eq!(sink.render_count(), 2);
    assert_eq!(board.document().await, fixture::minimal());
    // today has no data in the new document; falls back to its only date
    assert_eq!(sink.not_found(), Some(false));
    assert_eq!(board.selection().await.requested_date, "2024-01-01");

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(controller.fetch_count().await, 4);
    assert_eq!(sink.render_count(), 2);

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn ticks_are_coalesced_while_fetch_in_flight() {
    let (source, controller) = DynamicMockSource::new_with_controller("slow");
    controller.set_behavior(MockBehavior::Hang).await;
    let sink = RecordingSink::new();
    let board = Arc::new(
        Board::builder()
            .source(source)
            .sink(sink.clone())
            .clock(clock(SAMPLE_TODAY))
            .refresh_interval(Duration::from_secs(10))
            .fetch_timeout(Duration::from_secs(35))
            .build()
            .unwrap(),
    );

    let handle = spawn_refresh_loop(Arc::clone(&board));
    // tick at 10s fetches, 20s to 40s are coalesced, the fetch times out at 45s
    tokio::time::sleep(Duration::from_secs(44)).await;
    assert_eq!(controller.fetch_count().await, 1);

    // tick at 50s starts the next fetch
    tokio::time::sleep(Duration::from_secs(7)).await;
    assert_eq!(controller.fetch_count().await, 2);
    assert_eq!(sink.render_count(), 0);
    assert!(board.fingerprint().await.is_none());

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn visibility_and_key_chord_trigger_immediately() {
    let (board, sink, controller) = dynamic_board().await;
    let board = Arc::new(board);
    board.start().await.unwrap();
    let handle = spawn_refresh_loop(Arc::clone(&board));

    handle.visibility_regained();
    wait_for_fetches(&controller, 2).await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    // unchanged document: no render
    assert_eq!(sink.render_count(), 1);

    assert!(!handle.key_pressed(KeyPress::plain('r')));
    assert!(handle.key_pressed(KeyPress {
        key: 'r',
        ctrl: true,
        shift: true,
        alt: false,
    }));
    wait_for_fetches(&controller, 3).await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    // manual refresh renders even when unchanged
    assert_eq!(sink.render_count(), 2);

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn stop_ends_the_loop() {
    let (board, _sink, controller) = dynamic_board().await;
    let board = Arc::new(board);
    let handle = spawn_refresh_loop(Arc::clone(&board));
    assert!(!handle.is_finished());
    handle.stop().await;

    tokio::time::sleep(Duration::from_secs(600)).await;
    assert_eq!(controller.fetch_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_stops_refreshing() {
    let (board, _sink, controller) = dynamic_board().await;
    let board = Arc::new(board);
    drop(spawn_refresh_loop(Arc::clone(&board)));

    tokio::time::sleep(Duration::from_secs(600)).await;
    assert_eq!(controller.fetch_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn huge_interval_never_ticks_but_still_serves_commands() {
    let (source, controller) = DynamicMockSource::new_with_controller("idle");
    controller
        .set_behavior(MockBehavior::Return(fixture::sample()))
        .await;
    let board = Arc::new(
        Board::builder()
            .source(source)
            .sink(RecordingSink::new())
            .clock(clock(SAMPLE_TODAY))
            .refresh_interval(Duration::MAX)
            .refresh_jitter(50)
            .build()
            .unwrap(),
    );

    let handle = spawn_refresh_loop(Arc::clone(&board));
    tokio::time::sleep(Duration::from_secs(3_600)).await;
    assert_eq!(controller.fetch_count().await, 0);
    assert!(!handle.is_finished());

    handle.visibility_regained();
    wait_for_fetches(&controller, 1).await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(board.fingerprint().await.is_some());

    handle.stop().await;
}
