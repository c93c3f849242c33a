use stockboard_demos::common::get_board;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let board = get_board()?;
    board.start().await?;

    // A day without snapshots falls back to the latest earlier day.
    let outcome = board.select_date("2024-05-11").await?;
    if let Some(correction) = outcome.resolution().and_then(|r| r.correction.as_ref()) {
        println!("\nselection corrected to {}", correction.date);
    }

    // An explicit time is shown verbatim.
    board.select_date("2024-05-09").await?;
    board.select_time("9:00 AM").await?;

    // Back to "latest" for the selected day.
    board.select_time("").await?;

    // Before any data: the not-found state.
    board.select_date("2020-01-01").await?;

    // Reset bypasses caches and returns to today.
    board.reset_to_today().await?;
    println!("\nselection: {:?}", board.selection().await);

    Ok(())
}
