//! Room actor message types.
//!
//! External requests carry a `oneshot` responder; internal timer and
//! bot messages carry the turn generation they were armed for, so the
//! controller can discard them when the turn has moved on.

use thiserror::Error;
use tokio::sync::oneshot;

use crate::game::{Chips, GameError, GameStateView, PlayerAction, PlayerId};

/// Why a room request was refused.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RoomError {
    #[error("room is full")]
    RoomFull,

    #[error("player is already seated")]
    AlreadySeated,

    #[error("player is not seated")]
    NotSeated,

    #[error("room is closed")]
    Closed,

    #[error("no such room")]
    UnknownRoom,

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Result of a room request.
pub type RoomResult = Result<(), RoomError>;

/// Messages accepted by a room controller.
#[derive(Debug)]
pub enum RoomMessage {
    /// Seat a player (or bot). Mid-hand joins are queued until the next
    /// hand turnover.
    Join {
        player_id: PlayerId,
        buy_in: Chips,
        is_bot: bool,
        response: oneshot::Sender<RoomResult>,
    },

    /// Remove a player. Mid-hand their seat folds immediately and the
    /// removal completes at turnover.
    Leave {
        player_id: PlayerId,
        response: oneshot::Sender<RoomResult>,
    },

    /// Sit the player out starting with the next hand. The current hand
    /// is unaffected.
    Stand {
        player_id: PlayerId,
        response: oneshot::Sender<RoomResult>,
    },

    /// Return a standing (or timeout-flagged) player to play. Cancels a
    /// pending stand before it takes effect at turnover.
    Rejoin {
        player_id: PlayerId,
        response: oneshot::Sender<RoomResult>,
    },

    /// A betting decision from a seated player.
    TakeAction {
        player_id: PlayerId,
        action: PlayerAction,
        response: oneshot::Sender<RoomResult>,
    },

    /// Snapshot the room for one viewer. `None` while no hand has been
    /// dealt yet.
    GetView {
        viewer: Option<PlayerId>,
        response: oneshot::Sender<Option<GameStateView>>,
    },

    /// Close the room. Terminal: the mailbox drains and the actor exits.
    Close { response: oneshot::Sender<RoomResult> },

    /// Internal: the turn clock fired for this generation.
    TurnTimeout { generation: u64 },

    /// Internal: an external bot decision (or its safe-default
    /// replacement) arrived for this generation.
    BotDecision {
        generation: u64,
        player_id: PlayerId,
        action: Option<PlayerAction>,
    },

    /// Internal: run-out pacing timer, deal the next street.
    DealNextStreet { generation: u64 },

    /// Internal: inter-hand delay elapsed, start the next hand.
    BeginHand { generation: u64 },
}
