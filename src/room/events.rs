//! Outbound room events and the sink contract.
//!
//! The controller pushes events out through an [`EventSink`] and never
//! waits on delivery. The transport (websockets, in-process channels,
//! tests) lives behind the trait.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::game::{GameStateView, HandResult, PlayerAction, PlayerId};

use super::RoomId;

/// Who an event is addressed to. `Room` events are safe for every
/// connected client; `Player` events may carry that player's hole cards.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Recipient {
    Room,
    Player(PlayerId),
}

/// Events emitted by a room controller.
///
/// Every state-bearing event carries a sanitized view: hole cards are
/// present only in views addressed to their owner, or for unfolded
/// players once a true showdown has happened.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum RoomEvent {
    /// A new hand was dealt.
    HandStarted { view: GameStateView },

    /// A player acted (or the room acted for them on timeout).
    ActionTaken {
        player_id: PlayerId,
        action: PlayerAction,
        /// True when the room applied the action on the turn clock.
        timed_out: bool,
    },

    /// The shared state changed (street dealt, player joined or left).
    StateUpdated { view: GameStateView },

    /// It is the recipient's turn; they have `time_budget` to act.
    YourTurn { time_budget: Duration },

    /// The hand finished and the pot was paid out.
    HandEnded { result: HandResult },
}

/// One-way delivery of room events to the outside world.
///
/// Implementations must not block the caller; the controller emits from
/// its single-threaded loop. Delivery failures are the sink's problem.
pub trait EventSink: Send + Sync {
    fn emit(&self, room: RoomId, recipient: Recipient, event: RoomEvent);
}

/// Sink that logs every event. Useful as a development default.
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&self, room: RoomId, recipient: Recipient, event: RoomEvent) {
        log::debug!("room {room}: -> {recipient:?}: {event:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_a_tag() {
        let event = RoomEvent::YourTurn {
            time_budget: Duration::from_secs(30),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "your_turn");
    }
}
