use stockboard_demos::common::get_board;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build a board (mock source in CI when STOCKBOARD_DEMOS_USE_MOCK is set).
    let board = get_board()?;

    // 2. Load the document and render the latest snapshot of today.
    let outcome = board.start().await?;

    // 3. Show what was resolved.
    if let Some(resolution) = outcome.resolution() {
        println!();
        println!(
            "resolved {} at {}",
            resolution.effective_date, resolution.effective_time
        );
    }
    println!("fingerprint: {:?}", board.fingerprint().await);

    Ok(())
}
