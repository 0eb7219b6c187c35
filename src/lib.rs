//! # Live Hold'em
//!
//! A live multi-seat Texas Hold'em hand engine.
//!
//! The crate is split into a synchronous game core and an async room
//! layer:
//!
//! - [`game`]: deck, hand evaluation, side pots, betting validation, and
//!   the hand lifecycle. Pure functions over an owned [`game::GameState`],
//!   testable without any runtime.
//! - [`room`]: one tokio actor per room. The actor owns the game state,
//!   serializes every mutation through its mailbox, and runs the turn
//!   clock: action timeouts, bot decision deadlines, inter-hand delays,
//!   and board run-out pacing.
//! - [`bot`]: the [`bot::AiDecisionProvider`] contract for plugging in an
//!   external decision engine, with safe-default coercion of whatever it
//!   returns.
//!
//! Membership, chat, persistence and bot strategy live outside this
//! crate; they integrate through [`room::EventSink`] and
//! [`bot::AiDecisionProvider`].
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use live_holdem::bot::NullDecisionProvider;
//! use live_holdem::room::{LogEventSink, RoomConfig, RoomRegistry};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let registry = RoomRegistry::new(Arc::new(LogEventSink), Arc::new(NullDecisionProvider));
//! let room_id = registry.spawn_room(RoomConfig::default()).await.unwrap();
//! let handle = registry.get(room_id).await.unwrap();
//! handle.join("alice", 1_000, false).await?;
//! # Ok(())
//! # }
//! ```

/// Core game logic and entities.
pub mod game;
pub use game::{
    Blinds, Card, Chips, Deck, GameError, GamePhase, GameState, GameStateView, HandResult,
    PlayerAction, PlayerId,
};

/// Per-room actor, events, config, and registry.
pub mod room;
pub use room::{EventSink, Recipient, RoomConfig, RoomEvent, RoomHandle, RoomId, RoomRegistry};

/// AI decision provider contract.
pub mod bot;
pub use bot::{AiDecisionProvider, DecisionContext};
