//! Terminal client for the officeverse chat channel.
//!
//! Registers as a player, sends typed lines as global chat (or `/w <id> <text>`
//! as a whisper) and prints everything the server pushes.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin officeverse-client -- --player-id 1
//! cargo run --bin officeverse-client -- -i 2 -u ws://127.0.0.1:8080/chat
//! ```

use clap::Parser;
use officeverse_server::domain::PlayerId;
use officeverse_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "officeverse-client")]
#[command(about = "Terminal chat client for the officeverse chat channel", long_about = None)]
struct Args {
    /// Player ID to register with
    #[arg(short = 'i', long)]
    player_id: i64,

    /// WebSocket URL of the chat channel
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/chat")]
    url: String,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = officeverse_client::run_client(args.url, PlayerId::new(args.player_id)).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
