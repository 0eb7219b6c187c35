//! Error taxonomy for the game core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::Chips;

/// Errors that can occur while validating or applying game operations.
///
/// Validation errors leave state untouched and are surfaced to the acting
/// client only. Deck exhaustion is fatal to the hand and makes the
/// controller force an immediate finish rather than leaving the room stuck.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("not your turn")]
    OutOfTurn,
    #[error("player is not in this hand")]
    NotInHand,
    #[error("player has already folded")]
    AlreadyFolded,
    #[error("player is all-in and cannot act")]
    AlreadyAllIn,
    #[error("cannot check, ${to_call} to call")]
    CannotCheck { to_call: Chips },
    #[error("nothing to call")]
    NothingToCall,
    #[error("${to_call} to call exceeds stack of ${stack}, go all-in instead")]
    CannotCoverCall { to_call: Chips, stack: Chips },
    #[error("raise must be to at least ${min_raise}")]
    RaiseBelowMinimum { min_raise: Chips },
    #[error("raise to ${target} exceeds stack of ${stack}")]
    RaiseExceedsStack { target: Chips, stack: Chips },
    #[error("no chips left to bet")]
    EmptyStack,
    #[error("deck exhausted: requested {requested}, {remaining} remaining")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("no hand in progress")]
    NoHandInProgress,
}
