use std::sync::Arc;
use std::time::Duration;

use stockboard::{
    Board, Clock, DataSource, FixedClock, LocalClock, StockboardError, parse_iso_date,
};
use stockboard_http::HttpSource;

use crate::terminal::TerminalSink;

/// Source used when `STOCKBOARD_SOURCE_URL` is unset.
pub const DEFAULT_SOURCE_URL: &str = "http://localhost:8000/data.json";

fn use_mock() -> bool {
    std::env::var("STOCKBOARD_DEMOS_USE_MOCK").is_ok()
}

/// Return a data source for demos.
///
/// # Errors
/// Returns `InvalidArg` if `STOCKBOARD_SOURCE_URL` is not a usable URL.
pub fn get_source() -> Result<Arc<dyn DataSource>, StockboardError> {
    if use_mock() {
        println!("--- (Using Mock Source for CI) ---");
        return Ok(Arc::new(stockboard_mock::MockSource::new()));
    }
    let url =
        std::env::var("STOCKBOARD_SOURCE_URL").unwrap_or_else(|_| DEFAULT_SOURCE_URL.to_string());
    let source = HttpSource::builder(url)
        .user_agent(concat!("stockboard-demos/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(10))
        .build()?;
    Ok(Arc::new(source))
}

/// "Today" for demos; pinned to the fixture date when mocking.
///
/// # Errors
/// Returns `InvalidArg` if the fixture date does not parse.
pub fn get_clock() -> Result<Arc<dyn Clock>, StockboardError> {
    if use_mock() {
        let today = parse_iso_date(stockboard_mock::SAMPLE_TODAY)?;
        Ok(Arc::new(FixedClock(today)))
    } else {
        Ok(Arc::new(LocalClock))
    }
}

/// Board over the demo source, printing to stdout.
///
/// # Errors
/// Propagates source and board validation errors.
pub fn get_board() -> Result<Board, StockboardError> {
    Board::builder()
        .source(get_source()?)
        .clock(get_clock()?)
        .sink(TerminalSink::default())
        .build()
}
