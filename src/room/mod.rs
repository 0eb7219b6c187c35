//! Room layer: one tokio actor per table, plus its config, message
//! types, outbound events, and the registry that owns the handles.

pub mod config;
pub mod controller;
pub mod events;
pub mod messages;
pub mod registry;

/// Opaque room identifier.
pub type RoomId = uuid::Uuid;

pub use config::RoomConfig;
pub use controller::{GameController, RoomHandle};
pub use events::{EventSink, LogEventSink, Recipient, RoomEvent};
pub use messages::{RoomError, RoomMessage, RoomResult};
pub use registry::RoomRegistry;
