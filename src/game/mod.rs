//! Core hand engine: entities, evaluation, pots, betting, and the hand
//! lifecycle. Everything in this module is synchronous and deterministic
//! (apart from the shuffle); the async room layer drives it.

pub mod betting;
pub mod constants;
pub mod entities;
pub mod errors;
pub mod evaluation;
pub mod hand;
pub mod pot;

pub use betting::{amount_to_call, apply_action, validate_action};
pub use entities::{
    Blinds, Card, Chips, Deck, GamePhase, GameState, GameStateView, HandResult, HandWinner,
    Player, PlayerAction, PlayerId, PlayerView, Rank, RANK_ACE, SeatIndex, SidePot, Suit,
};
pub use errors::GameError;
pub use evaluation::{evaluate, HandCategory, HandEvaluation};
pub use hand::HandFlow;
pub use pot::compute_side_pots;
