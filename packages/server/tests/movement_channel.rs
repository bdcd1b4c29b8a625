//! End-to-end tests of the `/movement` channel over real WebSocket connections.

mod common;

use common::{TestClient, TestServer};

/// Connect to `/movement` and publish an initial position, waiting for its echo
async fn join(server: &TestServer, position: &str, echo: &str) -> TestClient {
    let mut client = TestClient::connect(&server.ws_url("/movement")).await;
    client.send(position).await;
    client.recv_until("own position", |m| m == echo).await;
    client
}

#[tokio::test]
async fn test_position_is_broadcast_to_everyone() {
    // テスト項目: 位置更新は送信者を含む全員に届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = join(&server, "1:0:0", "Broadcast:1:0:0:Unknown:0xffffff").await;
    let mut bob = join(&server, "2:0:0", "Broadcast:2:0:0:Unknown:0xffffff").await;
    alice
        .recv_until("bob's position", |m| m == "Broadcast:2:0:0:Unknown:0xffffff")
        .await;

    // when (操作):
    alice.send("1:10:20:Alice:0x00ff00").await;

    // then (期待する結果):
    assert_eq!(alice.recv().await, "Broadcast:1:10:20:Alice:0x00ff00");
    assert_eq!(bob.recv().await, "Broadcast:1:10:20:Alice:0x00ff00");
}

#[tokio::test]
async fn test_invalid_frames_reply_to_sender_only() {
    // テスト項目: 不正な位置更新は送信者にだけエラーが返り、他の参加者には届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = join(&server, "1:0:0", "Broadcast:1:0:0:Unknown:0xffffff").await;
    let mut bob = join(&server, "2:0:0", "Broadcast:2:0:0:Unknown:0xffffff").await;

    // when (操作):
    bob.send("abc:10:20").await;
    bob.send("2:10").await;
    bob.send("2:1:2:3:4:5").await;
    bob.send("2:3:4").await;

    // then (期待する結果):
    assert_eq!(bob.recv().await, "Invalid numbers");
    assert_eq!(
        bob.recv().await,
        "Invalid format. Use playerId:x:y[:name][:skin]"
    );
    assert_eq!(
        bob.recv().await,
        "Invalid format. Use playerId:x:y[:name][:skin]"
    );
    assert_eq!(bob.recv().await, "Broadcast:2:3:4:Unknown:0xffffff");
    let seen = alice
        .recv_until("bob's valid update", |m| m == "Broadcast:2:3:4:Unknown:0xffffff")
        .await;
    assert!(seen.iter().all(|m| m.starts_with("Broadcast:")), "{seen:?}");
}

#[tokio::test]
async fn test_player_left_on_disconnect() {
    // テスト項目: 位置を送ったことのある接続が切れると PlayerLeft が届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = join(&server, "1:0:0", "Broadcast:1:0:0:Unknown:0xffffff").await;
    let bob = join(&server, "2:0:0", "Broadcast:2:0:0:Unknown:0xffffff").await;
    alice
        .recv_until("bob's position", |m| m == "Broadcast:2:0:0:Unknown:0xffffff")
        .await;

    // when (操作):
    bob.close().await;

    // then (期待する結果):
    assert_eq!(alice.recv().await, "PlayerLeft:2");
}
