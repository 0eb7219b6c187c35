//! Hand lifecycle: blind posting, dealing, turn order, betting-round
//! completion, street advancement, and settlement.
//!
//! Everything here is synchronous and pure over `GameState` + `Deck`;
//! the room controller layers timing, timeouts and bot calls on top.

use std::collections::HashMap;

use super::constants::FLOP_SIZE;
use super::entities::{
    Chips, GamePhase, GameState, HandResult, HandWinner, PlayerId, SeatIndex,
};
use super::errors::GameError;
use super::evaluation::{self, HandEvaluation};
use super::pot;

/// What the controller should do after an action has been applied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HandFlow {
    /// Betting continues with the player at this seat.
    Continue(SeatIndex),
    /// The betting round is complete; deal the next street or run out.
    AdvanceRound,
    /// At most one player is left unfolded; finish immediately.
    Finish,
}

fn next_seat(state: &GameState, from: SeatIndex) -> SeatIndex {
    (from + 1) % state.players.len()
}

/// Next seat after `from` whose player can still act. `None` when no
/// such player exists; never selects a folded, inactive, or all-in seat.
#[must_use]
pub fn next_to_act(state: &GameState, from: SeatIndex) -> Option<SeatIndex> {
    let n = state.players.len();
    let mut seat = from;
    for _ in 0..n {
        seat = next_seat(state, seat);
        if state.players[seat].can_act() {
            return Some(seat);
        }
    }
    None
}

/// Post the blinds, capped at each payer's stack (a short blind is
/// forced all-in). Heads-up, the dealer posts the small blind. Leaves
/// the table bet at the full big blind even when the payer was short.
pub fn post_blinds(state: &mut GameState) {
    let dealer = state.dealer_idx;
    state.players[dealer].is_dealer = true;

    let (sb_seat, bb_seat) = if state.players.len() == 2 {
        (dealer, next_seat(state, dealer))
    } else {
        let sb = next_seat(state, dealer);
        (sb, next_seat(state, sb))
    };

    let small = state.blinds.small;
    let big = state.blinds.big;
    post_forced_bet(state, sb_seat, small);
    post_forced_bet(state, bb_seat, big);
    state.players[sb_seat].is_small_blind = true;
    state.players[bb_seat].is_big_blind = true;

    state.current_bet = big;
    state.min_raise = big * 2;
}

fn post_forced_bet(state: &mut GameState, seat: SeatIndex, amount: Chips) {
    let player = &mut state.players[seat];
    let posted = amount.min(player.chips);
    player.chips -= posted;
    player.round_bet += posted;
    player.total_bet += posted;
    if player.chips == 0 {
        player.all_in = true;
    }
    state.pot += posted;
}

/// Deal two hole cards to every active player.
pub fn deal_hole_cards(
    state: &mut GameState,
    deck: &mut super::entities::Deck,
) -> Result<(), GameError> {
    for seat in 0..state.players.len() {
        if state.players[seat].active {
            let cards = deck.deal(super::constants::HOLE_CARDS)?;
            state.players[seat].hole_cards = cards;
        }
    }
    Ok(())
}

/// Seat that opens the betting for the current phase: preflop the player
/// after the big blind, on later streets the player after the dealer.
#[must_use]
pub fn first_to_act(state: &GameState) -> Option<SeatIndex> {
    let anchor = if state.phase == GamePhase::Preflop {
        state
            .players
            .iter()
            .position(|p| p.is_big_blind)
            .unwrap_or(state.dealer_idx)
    } else {
        state.dealer_idx
    };
    next_to_act(state, anchor)
}

/// A betting round is complete once every player who can still act has
/// matched the table bet and has acted at least once since the last
/// raise. Blinds do not count as having acted: the big blind keeps the
/// option to raise.
#[must_use]
pub fn betting_round_complete(state: &GameState) -> bool {
    state.players.iter().filter(|p| p.can_act()).all(|p| {
        p.round_bet == state.current_bet && state.acted_this_round.contains(&p.id)
    })
}

/// Decide what follows the action just applied at `state.to_act`.
#[must_use]
pub fn flow_after_action(state: &GameState) -> HandFlow {
    if state.in_hand_count() <= 1 {
        return HandFlow::Finish;
    }
    if betting_round_complete(state) {
        return HandFlow::AdvanceRound;
    }
    let from = state.to_act.unwrap_or(state.dealer_idx);
    match next_to_act(state, from) {
        Some(seat) => HandFlow::Continue(seat),
        None => HandFlow::AdvanceRound,
    }
}

/// True when the board should be auto-run to completion: at least two
/// players are still contesting the pot, but at most one of them can
/// act and nothing is left unmatched.
#[must_use]
pub fn needs_runout(state: &GameState) -> bool {
    if state.in_hand_count() < 2 {
        return false;
    }
    let actors: Vec<_> = state.players.iter().filter(|p| p.can_act()).collect();
    actors.len() <= 1 && actors.iter().all(|p| p.round_bet == state.current_bet)
}

/// Advance to the next street: burn and deal the phase's community
/// cards, reset per-round bet counters (total bets are untouched), clear
/// the acted set, and hand the action to the first seat after the
/// dealer. Advancing past the river moves to showdown without dealing.
pub fn advance_round(
    state: &mut GameState,
    deck: &mut super::entities::Deck,
) -> Result<(), GameError> {
    let next = state.phase.next_street().ok_or(GameError::NoHandInProgress)?;

    match next {
        GamePhase::Flop => {
            deck.burn()?;
            let mut cards = deck.deal(FLOP_SIZE)?;
            state.community.append(&mut cards);
        }
        GamePhase::Turn | GamePhase::River => {
            deck.burn()?;
            let mut cards = deck.deal(1)?;
            state.community.append(&mut cards);
        }
        _ => {}
    }

    state.phase = next;
    for p in &mut state.players {
        p.round_bet = 0;
    }
    state.current_bet = 0;
    state.min_raise = state.blinds.big;
    state.acted_this_round.clear();
    state.to_act = if next == GamePhase::Showdown {
        None
    } else {
        first_to_act(state)
    };
    Ok(())
}

/// Settle the hand: partition the pot, evaluate every unfolded hand,
/// award each tier to its eligible winner(s), and credit stacks.
///
/// Split tiers divide evenly, rounding down; the remainder goes to the
/// first eligible winner in seat order after the dealer. A hand won by
/// everyone else folding awards the whole pot with the name
/// "Last Standing" and reveals nothing.
pub fn settle(state: &mut GameState) -> HandResult {
    state.side_pots = pot::compute_side_pots(&state.players);
    let showdown = state.in_hand_count() >= 2;

    // Best hand per contender. An incomplete board (forced finish)
    // leaves everyone unranked and tiers split evenly.
    let evals: HashMap<PlayerId, Option<HandEvaluation>> = state
        .in_hand()
        .map(|p| {
            let mut cards = p.hole_cards.clone();
            cards.extend_from_slice(&state.community);
            (p.id.clone(), evaluation::evaluate(&cards))
        })
        .collect();

    let mut awards: HashMap<PlayerId, Chips> = HashMap::new();
    for side_pot in &state.side_pots {
        let best = side_pot
            .eligible
            .iter()
            .map(|id| evals.get(id).and_then(|e| e.as_ref()).map_or(0, |e| e.strength))
            .max()
            .unwrap_or(0);
        // Tier winners, reordered to start at the seat after the dealer
        // so the odd chip lands deterministically.
        let mut tier_winners: Vec<&PlayerId> = side_pot
            .eligible
            .iter()
            .filter(|id| {
                evals
                    .get(*id)
                    .and_then(|e| e.as_ref())
                    .map_or(0, |e| e.strength)
                    == best
            })
            .collect();
        tier_winners.sort_by_key(|id| {
            let seat = state.seat_of(id).unwrap_or(0);
            let n = state.players.len();
            (seat + n - state.dealer_idx - 1) % n
        });

        if tier_winners.is_empty() {
            continue;
        }
        let share = side_pot.amount / tier_winners.len() as Chips;
        let remainder = side_pot.amount % tier_winners.len() as Chips;
        for (i, id) in tier_winners.iter().enumerate() {
            let mut amount = share;
            if i == 0 {
                amount += remainder;
            }
            *awards.entry((*id).clone()).or_default() += amount;
        }
    }

    let mut winners: Vec<HandWinner> = Vec::with_capacity(awards.len());
    for p in &state.players {
        let Some(&amount) = awards.get(&p.id) else {
            continue;
        };
        let (hand_name, best_five) = if !showdown {
            ("Last Standing".to_string(), None)
        } else {
            match evals.get(&p.id).and_then(|e| e.as_ref()) {
                Some(eval) => (eval.name(), Some(eval.best_five.clone())),
                None => ("Incomplete Board".to_string(), None),
            }
        };
        winners.push(HandWinner {
            player_id: p.id.clone(),
            amount,
            hand_name,
            best_five,
        });
    }

    for winner in &winners {
        if let Some(p) = state.player_mut(&winner.player_id) {
            p.chips += winner.amount;
        }
        log::info!("{} wins ${} with {}", winner.player_id, winner.amount, winner.hand_name);
    }

    state.phase = GamePhase::Showdown;
    state.to_act = None;
    state.winners = Some(winners.clone());

    HandResult {
        winners,
        side_pots: state.side_pots.clone(),
        showdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::betting::apply_action;
    use crate::game::entities::{Blinds, Card, Deck, Player, PlayerAction, PlayerId, Suit};

    fn id(s: &str) -> PlayerId {
        PlayerId::new(s)
    }

    fn fresh_hand(stacks: &[(&str, Chips)], dealer: usize) -> GameState {
        let players = stacks
            .iter()
            .enumerate()
            .map(|(seat, &(name, chips))| Player::new(id(name), chips, seat, false))
            .collect();
        GameState::new_hand(players, dealer, Blinds { small: 5, big: 10 })
    }

    #[test]
    fn heads_up_blinds_and_first_to_act() {
        // Dealer posts the small blind heads-up and opens the action.
        let mut state = fresh_hand(&[("alice", 1000), ("bob", 1000)], 0);
        post_blinds(&mut state);

        assert_eq!(state.players[0].round_bet, 5);
        assert_eq!(state.players[1].round_bet, 10);
        assert!(state.players[0].is_small_blind);
        assert!(state.players[1].is_big_blind);
        assert_eq!(state.pot, 15);
        assert!(state.pot_is_conserved());
        assert_eq!(state.current_bet, 10);
        assert_eq!(state.min_raise, 20);
        assert_eq!(first_to_act(&state), Some(0));
    }

    #[test]
    fn three_handed_blind_seats_follow_the_dealer() {
        let mut state = fresh_hand(&[("a", 100), ("b", 100), ("c", 100)], 0);
        post_blinds(&mut state);
        assert!(state.players[1].is_small_blind);
        assert!(state.players[2].is_big_blind);
        // First to act preflop is the seat after the big blind: the dealer.
        assert_eq!(first_to_act(&state), Some(0));
    }

    #[test]
    fn short_blind_is_forced_all_in() {
        let mut state = fresh_hand(&[("alice", 100), ("bob", 4)], 0);
        post_blinds(&mut state);
        let bob = &state.players[1];
        assert_eq!(bob.round_bet, 4);
        assert!(bob.all_in);
        // The table bet stays at the full big blind.
        assert_eq!(state.current_bet, 10);
    }

    #[test]
    fn heads_up_call_then_check_completes_the_round() {
        // Spec scenario: 1000/1000 stacks, blinds 5/10. Dealer calls,
        // big blind checks, betting round must be judged complete and
        // the flop dealt.
        let mut state = fresh_hand(&[("alice", 1000), ("bob", 1000)], 0);
        let mut deck = Deck::shuffled();
        post_blinds(&mut state);
        deal_hole_cards(&mut state, &mut deck).unwrap();
        state.to_act = first_to_act(&state);
        assert_eq!(state.to_act, Some(0));

        apply_action(&mut state, &id("alice"), &PlayerAction::Call).unwrap();
        assert_eq!(state.players[0].round_bet, 10);
        // Big blind still has the option: round is not complete.
        assert!(!betting_round_complete(&state));
        assert_eq!(flow_after_action(&state), HandFlow::Continue(1));

        state.to_act = Some(1);
        apply_action(&mut state, &id("bob"), &PlayerAction::Check).unwrap();
        assert!(betting_round_complete(&state));
        assert_eq!(flow_after_action(&state), HandFlow::AdvanceRound);

        advance_round(&mut state, &mut deck).unwrap();
        assert_eq!(state.phase, GamePhase::Flop);
        assert_eq!(state.community.len(), 3);
        assert_eq!(state.current_bet, 0);
        assert_eq!(state.players[0].round_bet, 0);
        // Totals survive the street change.
        assert_eq!(state.players[0].total_bet, 10);
        assert!(state.acted_this_round.is_empty());
        // Postflop heads-up, the non-dealer acts first.
        assert_eq!(state.to_act, Some(1));
    }

    #[test]
    fn raise_reopens_the_round_for_callers() {
        let mut state = fresh_hand(&[("a", 500), ("b", 500), ("c", 500)], 0);
        post_blinds(&mut state);
        state.to_act = first_to_act(&state);

        apply_action(&mut state, &id("a"), &PlayerAction::Call).unwrap();
        state.to_act = Some(1);
        apply_action(&mut state, &id("b"), &PlayerAction::Call).unwrap();
        state.to_act = Some(2);
        // Big blind raises: both callers must act again.
        apply_action(&mut state, &id("c"), &PlayerAction::Raise { to: 30 }).unwrap();
        assert!(!betting_round_complete(&state));
        assert_eq!(flow_after_action(&state), HandFlow::Continue(0));
    }

    #[test]
    fn turn_advancement_skips_folded_and_all_in_seats() {
        let mut state = fresh_hand(&[("a", 100), ("b", 100), ("c", 100), ("d", 100)], 0);
        state.players[1].folded = true;
        state.players[2].all_in = true;
        assert_eq!(next_to_act(&state, 0), Some(3));
        // From the last actable seat it wraps around past the dead seats.
        assert_eq!(next_to_act(&state, 3), Some(0));

        state.players[0].folded = true;
        state.players[3].all_in = true;
        assert_eq!(next_to_act(&state, 0), None);
    }

    #[test]
    fn runout_detection() {
        let mut state = fresh_hand(&[("a", 100), ("b", 100), ("c", 100)], 0);
        assert!(!needs_runout(&state));

        state.players[0].all_in = true;
        state.players[1].all_in = true;
        assert!(needs_runout(&state));

        // One player left unfolded: finish, not run out.
        state.players[0].folded = true;
        state.players[1].folded = true;
        assert!(!needs_runout(&state));
    }

    #[test]
    fn runout_waits_for_unmatched_bets() {
        let mut state = fresh_hand(&[("a", 100), ("b", 100), ("c", 100)], 0);
        state.players[0].all_in = true;
        state.players[0].round_bet = 80;
        state.current_bet = 80;
        // b can still act and has not matched the shove.
        state.players[2].folded = true;
        assert!(!needs_runout(&state));
        state.players[1].round_bet = 80;
        assert!(needs_runout(&state));
    }

    #[test]
    fn advancing_past_the_river_reaches_showdown() {
        let mut state = fresh_hand(&[("a", 100), ("b", 100)], 0);
        let mut deck = Deck::shuffled();
        advance_round(&mut state, &mut deck).unwrap(); // flop
        advance_round(&mut state, &mut deck).unwrap(); // turn
        advance_round(&mut state, &mut deck).unwrap(); // river
        assert_eq!(state.community.len(), 5);
        advance_round(&mut state, &mut deck).unwrap(); // showdown
        assert_eq!(state.phase, GamePhase::Showdown);
        assert_eq!(state.to_act, None);
        assert!(advance_round(&mut state, &mut deck).is_err());
    }

    #[test]
    fn advance_fails_cleanly_on_an_exhausted_deck() {
        let mut state = fresh_hand(&[("a", 100), ("b", 100)], 0);
        let mut deck = Deck::shuffled();
        deck.deal(50).unwrap();
        let err = advance_round(&mut state, &mut deck).unwrap_err();
        assert!(matches!(err, GameError::DeckExhausted { .. }));
    }

    #[test]
    fn fold_out_awards_last_standing_without_reveal() {
        let mut state = fresh_hand(&[("alice", 100), ("bob", 100), ("carol", 100)], 0);
        post_blinds(&mut state);
        for p in &mut state.players {
            p.hole_cards = vec![Card::new(2, Suit::Clubs), Card::new(3, Suit::Hearts)];
        }
        state.players[0].folded = true;
        state.players[1].folded = true;

        let result = settle(&mut state);
        assert!(!result.showdown);
        assert_eq!(result.winners.len(), 1);
        let winner = &result.winners[0];
        assert_eq!(winner.player_id, id("carol"));
        assert_eq!(winner.amount, 15);
        assert_eq!(winner.hand_name, "Last Standing");
        assert!(winner.best_five.is_none());
        // Blinds moved to the winner's stack.
        assert_eq!(state.players[2].chips, 105);
    }

    #[test]
    fn fold_out_against_a_short_all_in_awards_the_entire_pot() {
        // The short small blind is forced all-in for 3; the big blind
        // posts 10 and folds along with the dealer. All 13 chips on the
        // table go to the all-in player, the unmatched 7 included.
        let mut state = fresh_hand(&[("alice", 100), ("bob", 3), ("carol", 100)], 0);
        post_blinds(&mut state);
        assert!(state.players[1].all_in);
        state.players[0].folded = true;
        state.players[2].folded = true;

        let result = settle(&mut state);
        assert!(!result.showdown);
        assert_eq!(result.winners.len(), 1);
        assert_eq!(result.winners[0].player_id, id("bob"));
        assert_eq!(result.winners[0].amount, 13);
        assert_eq!(result.winners[0].hand_name, "Last Standing");
        let total: Chips = state.players.iter().map(|p| p.chips).sum();
        assert_eq!(total, 203);
    }

    #[test]
    fn showdown_awards_each_tier_to_its_best_eligible_hand() {
        let mut state = fresh_hand(&[("alice", 0), ("bob", 0), ("carol", 0)], 0);
        // Alice is all-in short with the best hand; bob and carol
        // contest the excess tier, bob ahead of carol.
        state.players[0].total_bet = 50;
        state.players[0].all_in = true;
        state.players[1].total_bet = 100;
        state.players[1].all_in = true;
        state.players[2].total_bet = 100;
        state.players[2].all_in = true;
        state.pot = 250;
        state.community = vec![
            Card::new(14, Suit::Spades),
            Card::new(9, Suit::Hearts),
            Card::new(6, Suit::Clubs),
            Card::new(3, Suit::Diamonds),
            Card::new(2, Suit::Hearts),
        ];
        state.phase = GamePhase::River;
        state.players[0].hole_cards = vec![Card::new(14, Suit::Hearts), Card::new(14, Suit::Clubs)];
        state.players[1].hole_cards = vec![Card::new(9, Suit::Spades), Card::new(4, Suit::Clubs)];
        state.players[2].hole_cards = vec![Card::new(6, Suit::Spades), Card::new(4, Suit::Diamonds)];

        let result = settle(&mut state);
        assert!(result.showdown);
        // Main pot (150) to alice's trip aces, side pot (100) to bob's
        // pair of nines.
        assert_eq!(state.players[0].chips, 150);
        assert_eq!(state.players[1].chips, 100);
        assert_eq!(state.players[2].chips, 0);
        let alice = result.winners.iter().find(|w| w.player_id == id("alice")).unwrap();
        assert_eq!(alice.hand_name, "Three of a Kind");
        assert!(alice.best_five.is_some());
        let paid: Chips = result.winners.iter().map(|w| w.amount).sum();
        assert_eq!(paid, 250);
    }

    #[test]
    fn split_pot_remainder_lands_after_the_dealer() {
        let mut state = fresh_hand(&[("alice", 0), ("bob", 0), ("carol", 0)], 1);
        for p in &mut state.players {
            p.total_bet = 67;
        }
        state.pot = 201;
        state.community = vec![
            Card::new(14, Suit::Spades),
            Card::new(13, Suit::Hearts),
            Card::new(12, Suit::Clubs),
            Card::new(11, Suit::Diamonds),
            Card::new(10, Suit::Hearts),
        ];
        state.phase = GamePhase::River;
        // Carol folded after committing; alice and bob both play the
        // board, splitting her dead chips with one odd chip left over.
        state.players[0].hole_cards = vec![Card::new(2, Suit::Spades), Card::new(3, Suit::Spades)];
        state.players[1].hole_cards = vec![Card::new(2, Suit::Hearts), Card::new(4, Suit::Hearts)];
        state.players[2].hole_cards = vec![Card::new(5, Suit::Clubs), Card::new(4, Suit::Clubs)];
        state.players[2].folded = true;

        let result = settle(&mut state);
        let paid: Chips = result.winners.iter().map(|w| w.amount).sum();
        assert_eq!(paid, 201);
        // Dealer is seat 1, so alice (seat 0) is first in order after
        // the button and takes the remainder chip.
        assert_eq!(state.players[0].chips, 101);
        assert_eq!(state.players[1].chips, 100);
        assert_eq!(state.players[2].chips, 0);
    }
}
