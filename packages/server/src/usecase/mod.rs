//! UseCase layer: the channel engine and the behaviour of each channel.
//!
//! `ChannelHub` is the reusable session-registry-and-broadcast engine; the chat
//! and movement channels each own one instance and implement
//! [`ChannelHandler`] on top of it.

pub mod channel;
pub mod chat;
pub mod error;
pub mod hub;
pub mod movement;
pub mod presence;

pub use channel::ChannelHandler;
pub use chat::ChatRouter;
pub use error::DirectSendError;
pub use hub::ChannelHub;
pub use movement::MovementRouter;
pub use presence::PresenceAnnouncer;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use officeverse_shared::time::FixedClock;
    use tokio::sync::mpsc;

    use super::ChannelHub;
    use crate::{
        domain::ConnectionId,
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryIdentityRepository,
        },
    };

    pub fn create_test_hub(name: &'static str) -> Arc<ChannelHub> {
        Arc::new(ChannelHub::new(
            name,
            Arc::new(WebSocketMessagePusher::new(Arc::new(FixedClock::new(1000)))),
            Arc::new(InMemoryIdentityRepository::new()),
        ))
    }

    /// Open a connection on `hub` and hand back its outbound queue.
    pub async fn open_connection(
        hub: &ChannelHub,
    ) -> (ConnectionId, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(32);
        let conn = ConnectionId::generate();
        hub.open(conn, tx).await;
        (conn, rx)
    }

    /// Everything queued for a connection so far.
    pub fn drain(rx: &mut mpsc::Receiver<String>) -> Vec<String> {
        let mut messages = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            messages.push(msg);
        }
        messages
    }
}
