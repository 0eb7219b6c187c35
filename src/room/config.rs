//! Room configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::game::{Blinds, Chips};

/// Static configuration for one room. Fixed at spawn time; the
/// controller never mutates it.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RoomConfig {
    /// Display name for logs.
    pub name: String,

    /// Small blind amount.
    pub small_blind: Chips,

    /// Big blind amount.
    pub big_blind: Chips,

    /// Stack granted to bots when they are refilled between hands.
    pub starting_stack: Chips,

    /// Maximum seats at the table.
    pub max_players: usize,

    /// Turn clock: how long a player has to act before the room acts
    /// for them.
    pub action_timeout: Duration,

    /// Pause between the end of one hand and the deal of the next.
    pub inter_hand_delay: Duration,

    /// Pacing between community card reveals during an all-in run-out.
    pub board_reveal_delay: Duration,

    /// Deadline for an external bot decision before the safe default
    /// is applied.
    pub bot_decision_timeout: Duration,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            name: "Default Room".to_string(),
            small_blind: 5,
            big_blind: 10,
            starting_stack: 1_000,
            max_players: crate::game::constants::MAX_PLAYERS,
            action_timeout: Duration::from_secs(30),
            inter_hand_delay: Duration::from_secs(3),
            board_reveal_delay: Duration::from_secs(1),
            bot_decision_timeout: Duration::from_secs(5),
        }
    }
}

impl RoomConfig {
    /// Validate configuration before spawning a room.
    pub fn validate(&self) -> Result<(), String> {
        if self.big_blind <= self.small_blind {
            return Err("Big blind must be greater than small blind".to_string());
        }

        if self.starting_stack < self.big_blind {
            return Err("Starting stack must cover at least the big blind".to_string());
        }

        if self.max_players < 2 || self.max_players > crate::game::constants::MAX_PLAYERS {
            return Err(format!(
                "Max players must be between 2 and {}",
                crate::game::constants::MAX_PLAYERS
            ));
        }

        if self.action_timeout.is_zero() {
            return Err("Action timeout must be non-zero".to_string());
        }

        Ok(())
    }

    #[must_use]
    pub fn blinds(&self) -> Blinds {
        Blinds {
            small: self.small_blind,
            big: self.big_blind,
        }
    }
}
