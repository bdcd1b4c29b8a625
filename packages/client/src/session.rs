//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use officeverse_server::domain::{ChatFrame, PlayerId};
use officeverse_shared::time::now_millis;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{command::Command, error::ClientError, formatter::MessageFormatter};

use super::ui::{prompt, redisplay_prompt};

/// Run one connection to the chat channel until the user quits or the connection drops
pub async fn run_client_session(url: &str, player_id: PlayerId) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await.map_err(|e| match e {
        tungstenite::Error::Http(response) => {
            ClientError::HandshakeRejected(response.status().as_u16())
        }
        e => ClientError::ConnectionError(e.to_string()),
    })?;

    tracing::info!("Connected to chat server!");

    let (mut write, mut read) = ws_stream.split();

    let register = ChatFrame::Register { player_id }.to_string();
    write
        .send(Message::Text(register.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    println!(
        "\nYou are player {}. Type a message to talk to everyone, \
         or /w <playerId> <message> to whisper. Press Ctrl+C to exit.\n",
        player_id
    );

    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted =
                        MessageFormatter::format_incoming(text.as_str(), player_id, now_millis());
                    print!("{}", formatted);
                    redisplay_prompt(player_id);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionError(
                        "Server closed the connection".to_string(),
                    ));
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
                _ => {}
            }
        }
        Err(ClientError::ConnectionError("Connection lost".to_string()))
    });

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // rustyline blocks, so it gets its own thread
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt(player_id)) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    println!("{}", e);
                    redisplay_prompt(player_id);
                    continue;
                }
            };

            let frame = command.into_frame(player_id).to_string();
            if let Err(e) = write.send(Message::Text(frame.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                return Err(ClientError::ConnectionError(e.to_string()));
            }
        }

        // Input closed by the user
        write.close().await.ok();
        Ok(())
    });

    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            read_result.unwrap_or_else(|e| Err(ClientError::ConnectionError(e.to_string())))
        }
        write_result = &mut write_task => {
            read_task.abort();
            write_result.unwrap_or_else(|e| Err(ClientError::ConnectionError(e.to_string())))
        }
    }
}
