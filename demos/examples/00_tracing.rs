use stockboard::Trigger;
use stockboard_demos::common::get_board;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,stockboard=trace,stockboard_http=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let board = get_board()?;

    // Initial load, then one refresh of each kind
    board.start().await?;
    for trigger in [Trigger::Periodic, Trigger::VisibilityRegained, Trigger::Manual] {
        let outcome = board.refresh(trigger).await?;
        tracing::info!(trigger = trigger.as_str(), ?outcome, "refresh finished");
    }

    Ok(())
}
