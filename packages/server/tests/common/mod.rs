//! Helpers shared by the integration tests: an in-process server on an
//! ephemeral port and a thin WebSocket test client.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use officeverse_server::{
    config::ServerConfig,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryIdentityRepository,
    },
    ui::Server,
    usecase::{ChatRouter, MovementRouter},
};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{
        client::IntoClientRequest,
        http::{HeaderValue, header::ORIGIN},
        protocol::Message,
    },
};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Server running inside the test runtime
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let chat = Arc::new(ChatRouter::new(
            Arc::new(WebSocketMessagePusher::default()),
            Arc::new(InMemoryIdentityRepository::new()),
        ));
        let movement = Arc::new(MovementRouter::new(
            Arc::new(WebSocketMessagePusher::default()),
            Arc::new(InMemoryIdentityRepository::new()),
        ));
        let app = Server::new(ServerConfig::default(), chat, movement).router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        Self { addr, handle }
    }

    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{}", self.addr, path)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// WebSocket connection driven by a test
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn connect(url: &str) -> Self {
        let (stream, _) = connect_async(url).await.expect("Failed to connect");
        Self { stream }
    }

    pub async fn connect_with_origin(
        url: &str,
        origin: &'static str,
    ) -> Result<Self, tokio_tungstenite::tungstenite::Error> {
        let mut request = url.into_client_request()?;
        request
            .headers_mut()
            .insert(ORIGIN, HeaderValue::from_static(origin));
        let (stream, _) = connect_async(request).await?;
        Ok(Self { stream })
    }

    /// Connect to `/chat` and register, consuming the join notice and roster
    pub async fn register(server: &TestServer, player_id: i64) -> Self {
        let mut client = Self::connect(&server.ws_url("/chat")).await;
        client.send(&format!("REGISTER:{player_id}")).await;
        client
            .recv_until("own roster", |msg| msg.starts_with("PLAYER_LIST:"))
            .await;
        client
    }

    pub async fn send(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send");
    }

    /// Next text frame, failing the test after a timeout
    pub async fn recv(&mut self) -> String {
        loop {
            let next = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for a message")
                .expect("Connection closed")
                .expect("WebSocket error");
            if let Message::Text(text) = next {
                return text.as_str().to_string();
            }
        }
    }

    /// Skip frames until one matches, returning everything read
    pub async fn recv_until(&mut self, what: &str, matches: impl Fn(&str) -> bool) -> Vec<String> {
        let mut seen = Vec::new();
        loop {
            let msg = self.recv().await;
            let done = matches(&msg);
            seen.push(msg);
            if done {
                return seen;
            }
            assert!(seen.len() < 64, "never received {what}: {seen:?}");
        }
    }

    pub async fn close(mut self) {
        self.stream.close(None).await.ok();
    }
}
