//! WebSocket connection handlers.
//!
//! Both channels share one connection lifecycle: register an outbound queue,
//! run a reader and a writer task, and close exactly once when either ends.

use std::{num::NonZeroUsize, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header::ORIGIN},
    response::{IntoResponse, Response},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use tokio::sync::{mpsc, oneshot};

use crate::{domain::ConnectionId, ui::state::AppState, usecase::ChannelHandler};

pub async fn chat_handler(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let channel: Arc<dyn ChannelHandler> = state.chat.clone();
    upgrade(ws, &headers, &state, channel)
}

pub async fn movement_handler(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let channel: Arc<dyn ChannelHandler> = state.movement.clone();
    upgrade(ws, &headers, &state, channel)
}

fn upgrade(
    ws: WebSocketUpgrade,
    headers: &HeaderMap,
    state: &AppState,
    channel: Arc<dyn ChannelHandler>,
) -> Response {
    let origin = headers.get(ORIGIN).and_then(|value| value.to_str().ok());
    if !state.config.is_origin_allowed(origin) {
        tracing::warn!(
            "[{}] rejected handshake from origin {:?}",
            channel.hub().name(),
            origin
        );
        return StatusCode::FORBIDDEN.into_response();
    }

    let capacity = state.config.outbound_queue_capacity;
    ws.on_upgrade(move |socket| handle_socket(socket, channel, capacity))
}

/// Spawns a task that drains the connection's outbound queue into the WebSocket.
///
/// The task ends when the socket rejects a write or every sender of the queue
/// has been dropped.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Dispatches inbound frames until the peer goes away or `stop` fires.
///
/// `stop` is only observed between frames, so a frame that started dispatching
/// always finishes.
async fn receive_loop<S>(
    mut receiver: S,
    mut stop: oneshot::Receiver<()>,
    channel: Arc<dyn ChannelHandler>,
    connection_id: ConnectionId,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    loop {
        let msg = tokio::select! {
            _ = &mut stop => break,
            msg = receiver.next() => msg,
        };
        let msg = match msg {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::debug!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!("Received from '{}': {}", connection_id, text.as_str());
                channel.on_text(&connection_id, text.as_str()).await;
            }
            Message::Close(_) => {
                tracing::debug!("Connection '{}' requested close", connection_id);
                break;
            }
            // Ping/pong is answered by the transport, binary frames are not part of the protocol
            _ => {}
        }
    }
}

async fn handle_socket(
    socket: WebSocket,
    channel: Arc<dyn ChannelHandler>,
    queue_capacity: NonZeroUsize,
) {
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::channel(queue_capacity.get());
    channel.on_open(connection_id, tx).await;

    let (sender, receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    let (stop_tx, stop_rx) = oneshot::channel();
    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        stop_rx,
        channel.clone(),
        connection_id,
    ));

    // on_close must not race a reader that is still dispatching
    let reader_finished = tokio::select! {
        _ = &mut recv_task => true,
        _ = &mut send_task => false,
    };
    if reader_finished {
        send_task.abort();
        let _ = send_task.await;
    } else {
        let _ = stop_tx.send(());
        let _ = recv_task.await;
    }

    channel.on_close(&connection_id).await;
}
