//! Registry of live rooms.
//!
//! The registry is an explicit value the embedding server owns and
//! threads where needed; there is no process-wide room table.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::bot::AiDecisionProvider;

use super::config::RoomConfig;
use super::controller::{GameController, RoomHandle};
use super::events::EventSink;
use super::messages::{RoomError, RoomResult};
use super::RoomId;

pub struct RoomRegistry {
    sink: Arc<dyn EventSink>,
    provider: Arc<dyn AiDecisionProvider>,
    rooms: RwLock<HashMap<RoomId, RoomHandle>>,
}

impl RoomRegistry {
    #[must_use]
    pub fn new(sink: Arc<dyn EventSink>, provider: Arc<dyn AiDecisionProvider>) -> Self {
        Self {
            sink,
            provider,
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Validate the config, spawn a controller task, and register its
    /// handle.
    pub async fn spawn_room(&self, config: RoomConfig) -> Result<RoomId, String> {
        config.validate()?;

        let room_id: RoomId = Uuid::new_v4();
        let (actor, handle) = GameController::new(
            room_id,
            config,
            Arc::clone(&self.sink),
            Arc::clone(&self.provider),
        );
        tokio::spawn(actor.run());

        let mut rooms = self.rooms.write().await;
        rooms.insert(room_id, handle);
        log::info!("spawned room {room_id}");
        Ok(room_id)
    }

    pub async fn get(&self, room_id: RoomId) -> Option<RoomHandle> {
        let rooms = self.rooms.read().await;
        rooms.get(&room_id).cloned()
    }

    /// Close a room and drop its handle. Idempotent: closing an unknown
    /// room is an error, closing an already-stopped one is not.
    pub async fn close_room(&self, room_id: RoomId) -> RoomResult {
        let handle = {
            let mut rooms = self.rooms.write().await;
            rooms.remove(&room_id)
        };
        match handle {
            Some(handle) => {
                // The actor may already be gone; either way it is closed.
                let _ = handle.close().await;
                log::info!("closed room {room_id}");
                Ok(())
            }
            None => Err(RoomError::UnknownRoom),
        }
    }

    pub async fn active_room_count(&self) -> usize {
        let rooms = self.rooms.read().await;
        rooms.len()
    }
}
