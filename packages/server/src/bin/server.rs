//! officeverse real-time server: chat and movement channels over WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin officeverse-server
//! cargo run --bin officeverse-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{num::NonZeroUsize, sync::Arc};

use clap::Parser;
use officeverse_server::{
    config::{DEFAULT_ALLOWED_ORIGINS, DEFAULT_QUEUE_CAPACITY, ServerConfig},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryIdentityRepository,
    },
    ui::Server,
    usecase::{ChatRouter, MovementRouter},
};
use officeverse_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "officeverse-server")]
#[command(about = "Real-time chat and movement server for the officeverse virtual office", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Outbound messages buffered per connection (at least 1)
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: NonZeroUsize,

    /// Browser origin allowed to open a WebSocket (repeatable)
    #[arg(long = "allowed-origin")]
    allowed_origins: Vec<String>,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        let allowed_origins = if args.allowed_origins.is_empty() {
            DEFAULT_ALLOWED_ORIGINS.map(String::from).to_vec()
        } else {
            args.allowed_origins
        };
        Self {
            host: args.host,
            port: args.port,
            outbound_queue_capacity: args.queue_capacity,
            allowed_origins,
        }
    }
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::from(Args::parse());

    // Each channel owns its own registry and identity binding
    let chat = Arc::new(ChatRouter::new(
        Arc::new(WebSocketMessagePusher::default()),
        Arc::new(InMemoryIdentityRepository::new()),
    ));
    let movement = Arc::new(MovementRouter::new(
        Arc::new(WebSocketMessagePusher::default()),
        Arc::new(InMemoryIdentityRepository::new()),
    ));

    let server = Server::new(config, chat, movement);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arguments() {
        // テスト項目: 引数なしではデフォルト設定になる
        // given (前提条件):
        let argv = ["officeverse-server"];

        // when (操作):
        let config = ServerConfig::from(Args::try_parse_from(argv).unwrap());

        // then (期待する結果):
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_zero_queue_capacity_is_rejected() {
        // テスト項目: 送信キューの容量 0 は起動時に拒否される
        // given (前提条件):
        let argv = ["officeverse-server", "--queue-capacity", "0"];

        // when (操作):
        let result = Args::try_parse_from(argv);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_queue_capacity_and_origins() {
        // テスト項目: 容量と Origin の指定が設定に反映される
        // given (前提条件):
        let argv = [
            "officeverse-server",
            "--queue-capacity",
            "1",
            "--allowed-origin",
            "https://office.example",
        ];

        // when (操作):
        let config = ServerConfig::from(Args::try_parse_from(argv).unwrap());

        // then (期待する結果):
        assert_eq!(config.outbound_queue_capacity.get(), 1);
        assert_eq!(config.allowed_origins, vec!["https://office.example".to_string()]);
    }
}
