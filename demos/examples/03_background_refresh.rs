use std::sync::Arc;
use std::time::Duration;

use stockboard::{KeyPress, spawn_refresh_loop};
use stockboard_demos::common::get_board;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let board = Arc::new(get_board()?);
    board.start().await?;

    let refresh = spawn_refresh_loop(Arc::clone(&board));

    // Returning to the view refetches, but only re-renders on change.
    refresh.visibility_regained();
    tokio::time::sleep(Duration::from_millis(200)).await;

    // Ctrl+Shift+R forces a re-render.
    let chord = KeyPress {
        key: 'R',
        ctrl: true,
        shift: true,
        alt: false,
    };
    if refresh.key_pressed(chord) {
        println!("\nmanual refresh requested");
    }
    tokio::time::sleep(Duration::from_millis(200)).await;

    refresh.stop().await;
    println!("refresh loop stopped");
    Ok(())
}
