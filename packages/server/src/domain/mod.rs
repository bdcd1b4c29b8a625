//! Domain layer: value objects, entities, wire frames and the ports the
//! usecase layer depends on.
//!
//! Nothing in this module performs I/O. Infrastructure implements the traits
//! declared here (dependency inversion).

pub mod entity;
pub mod error;
pub mod frame;
pub mod identity;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{PlayerProfile, Room};
pub use error::{MessagePushError, RoomDirectoryError};
pub use frame::{ChatEvent, ChatFrame, MalformedFrame, MovementEvent, MovementFrame};
pub use identity::{BindOutcome, IdentityBinding};
pub use message_pusher::{ConnectionInfo, MessagePusher, PusherChannel};
pub use repository::{IdentityRepository, PlayerDirectory, RoomDirectory};
pub use value_object::{ConnectionId, PlayerId, RoomId, Timestamp};
