//! Betting engine: validate and apply a single player action against the
//! hand snapshot.
//!
//! Validation fails closed: an action is rejected unless it is that
//! player's turn, the player can still act, and the action-specific
//! legality holds. Application mutates the controller-owned state in
//! place; because every mutation is validated first there is nothing to
//! roll back.

use super::entities::{Chips, GameState, PlayerAction, PlayerId};
use super::errors::GameError;

/// Chips the player still owes to match the table's current bet.
#[must_use]
pub fn amount_to_call(state: &GameState, id: &PlayerId) -> Chips {
    state
        .player(id)
        .map_or(0, |p| state.current_bet.saturating_sub(p.round_bet))
}

/// Check a single action for legality without touching state.
pub fn validate_action(
    state: &GameState,
    id: &PlayerId,
    action: &PlayerAction,
) -> Result<(), GameError> {
    let seat = state.seat_of(id).ok_or(GameError::NotInHand)?;
    if state.to_act != Some(seat) {
        return Err(GameError::OutOfTurn);
    }
    let player = &state.players[seat];
    if !player.active {
        return Err(GameError::NotInHand);
    }
    if player.folded {
        return Err(GameError::AlreadyFolded);
    }
    if player.all_in {
        return Err(GameError::AlreadyAllIn);
    }

    let to_call = state.current_bet - player.round_bet;
    match action {
        PlayerAction::Fold => Ok(()),
        PlayerAction::Check => {
            if to_call > 0 {
                return Err(GameError::CannotCheck { to_call });
            }
            Ok(())
        }
        PlayerAction::Call => {
            if to_call == 0 {
                return Err(GameError::NothingToCall);
            }
            // A call must be covered in full; a short stack's legal
            // move is all-in, not call.
            if player.chips < to_call {
                return Err(GameError::CannotCoverCall {
                    to_call,
                    stack: player.chips,
                });
            }
            Ok(())
        }
        PlayerAction::Raise { to } => {
            if *to < state.min_raise {
                return Err(GameError::RaiseBelowMinimum {
                    min_raise: state.min_raise,
                });
            }
            if player.chips + player.round_bet < *to {
                return Err(GameError::RaiseExceedsStack {
                    target: *to,
                    stack: player.chips,
                });
            }
            Ok(())
        }
        PlayerAction::AllIn => {
            if player.chips == 0 {
                return Err(GameError::EmptyStack);
            }
            Ok(())
        }
    }
}

/// Validate and apply one action.
///
/// A raise, or an all-in that pushes past the current bet, re-opens the
/// round: the acted set collapses to just the actor and everyone else
/// must act again. Any other action only records the actor as acted.
pub fn apply_action(
    state: &mut GameState,
    id: &PlayerId,
    action: &PlayerAction,
) -> Result<(), GameError> {
    validate_action(state, id, action)?;

    // Seat is known valid after validation.
    let seat = state.seat_of(id).ok_or(GameError::NotInHand)?;
    let big_blind = state.blinds.big;
    let current_bet = state.current_bet;
    let player = &mut state.players[seat];

    let mut reopened = false;
    match action {
        PlayerAction::Fold => {
            player.folded = true;
        }
        PlayerAction::Check => {}
        PlayerAction::Call => {
            let owed = current_bet - player.round_bet;
            let paid = owed.min(player.chips);
            player.chips -= paid;
            player.round_bet += paid;
            player.total_bet += paid;
            if player.chips == 0 {
                player.all_in = true;
            }
            state.pot += paid;
        }
        PlayerAction::Raise { to } => {
            let delta = *to - player.round_bet;
            player.chips -= delta;
            player.round_bet = *to;
            player.total_bet += delta;
            if player.chips == 0 {
                player.all_in = true;
            }
            state.pot += delta;
            // The next raise must add at least this raise's increment.
            let increment = *to - current_bet;
            state.current_bet = *to;
            state.min_raise = *to + increment;
            reopened = true;
        }
        PlayerAction::AllIn => {
            let pushed = player.chips;
            player.chips = 0;
            player.round_bet += pushed;
            player.total_bet += pushed;
            player.all_in = true;
            state.pot += pushed;
            let new_bet = state.players[seat].round_bet;
            if new_bet > current_bet {
                // A bet-exceeding all-in re-opens raising; the next
                // minimum step is the larger of the big blind and the
                // increment just made.
                let increment = new_bet - current_bet;
                state.current_bet = new_bet;
                state.min_raise = new_bet + increment.max(big_blind);
                reopened = true;
            }
        }
    }

    if reopened {
        state.acted_this_round.clear();
    }
    state.acted_this_round.insert(id.clone());
    state.last_action = Some((id.clone(), *action));

    debug_assert!(state.pot_is_conserved());
    Ok(())
}
