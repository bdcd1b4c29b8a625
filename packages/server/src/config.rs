//! Server configuration.

use std::num::NonZeroUsize;

/// Browser origins accepted on the WebSocket handshake unless configured otherwise.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
/// Outbound messages buffered per connection before deliveries start failing.
pub const DEFAULT_QUEUE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub outbound_queue_capacity: NonZeroUsize,
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// A request without an `Origin` header is not a browser and is always accepted.
    pub fn is_origin_allowed(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.allowed_origins.iter().any(|allowed| allowed == origin),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            outbound_queue_capacity: DEFAULT_QUEUE_CAPACITY,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.map(String::from).to_vec(),
        }
    }
}
