//! In-memory repositories (single-process scope).

pub mod identity;
pub mod player;
pub mod room;

pub use identity::InMemoryIdentityRepository;
pub use player::InMemoryPlayerDirectory;
pub use room::InMemoryRoomDirectory;
