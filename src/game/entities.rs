use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fmt::{self},
};

use super::constants;
use super::errors::GameError;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Clubs => "♣",
            Self::Diamonds => "♦",
            Self::Hearts => "♥",
            Self::Spades => "♠",
        };
        write!(f, "{repr}")
    }
}

/// Card rank, 2..=14 with the ace high (14). The evaluator handles the
/// ace-low wheel straight internally.
pub type Rank = u8;

pub const RANK_ACE: Rank = 14;

/// An immutable card value.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.rank {
            14 => write!(f, "A{}", self.suit),
            13 => write!(f, "K{}", self.suit),
            12 => write!(f, "Q{}", self.suit),
            11 => write!(f, "J{}", self.suit),
            r => write!(f, "{r}{}", self.suit),
        }
    }
}

/// An ordered sequence of the 52 unique cards, uniformly permuted at
/// creation. A fresh deck is built for every hand; dealing past the end
/// is an error, never a silent short deal.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// Build a full deck and shuffle it uniformly.
    #[must_use]
    pub fn shuffled() -> Self {
        let mut cards = Vec::with_capacity(constants::DECK_SIZE);
        for suit in Suit::ALL {
            for rank in 2..=RANK_ACE {
                cards.push(Card::new(rank, suit));
            }
        }
        cards.shuffle(&mut rand::rng());
        Self { cards, next: 0 }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }

    /// Remove and return the next `n` cards.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if self.remaining() < n {
            return Err(GameError::DeckExhausted {
                requested: n,
                remaining: self.remaining(),
            });
        }
        let dealt = self.cards[self.next..self.next + n].to_vec();
        self.next += n;
        Ok(dealt)
    }

    /// Discard exactly one card with no externally observable value.
    pub fn burn(&mut self) -> Result<(), GameError> {
        if self.remaining() == 0 {
            return Err(GameError::DeckExhausted {
                requested: 1,
                remaining: 0,
            });
        }
        self.next += 1;
        Ok(())
    }
}

/// Type alias for whole chips. All bets and stacks are whole chips;
/// a room's chip pool never approaches the u32 ceiling in practice.
pub type Chips = u32;

/// Seat position at the table.
pub type SeatIndex = usize;

/// Identity of a player as assigned by the room's external membership
/// layer. Opaque to the game core.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Blinds {
    pub small: Chips,
    pub big: Chips,
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}/{}", self.small, self.big)
    }
}

/// A single betting decision. `Raise` carries the explicit total the
/// player's round bet is raised to, not the increment.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "action")]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    Raise { to: Chips },
    AllIn,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Fold => write!(f, "folds"),
            Self::Check => write!(f, "checks"),
            Self::Call => write!(f, "calls"),
            Self::Raise { to } => write!(f, "raises to ${to}"),
            Self::AllIn => write!(f, "goes all-in"),
        }
    }
}

/// Per-hand projection of a seated player. Rebuilt from the room roster
/// at the start of every hand: chips carry over, transient flags reset.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub chips: Chips,
    /// Empty before the deal, exactly two afterwards.
    pub hole_cards: Vec<Card>,
    /// Chips committed in the current betting round.
    pub round_bet: Chips,
    /// Chips committed across the whole hand.
    pub total_bet: Chips,
    /// Dealt into this hand. Cleared when the player leaves mid-hand.
    pub active: bool,
    pub folded: bool,
    pub all_in: bool,
    pub is_bot: bool,
    pub seat_idx: SeatIndex,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, chips: Chips, seat_idx: SeatIndex, is_bot: bool) -> Self {
        Self {
            id,
            chips,
            hole_cards: Vec::with_capacity(constants::HOLE_CARDS),
            round_bet: 0,
            total_bet: 0,
            active: true,
            folded: false,
            all_in: false,
            is_bot,
            seat_idx,
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
        }
    }

    /// Still able to act: dealt in, not folded, chips behind.
    #[must_use]
    pub fn can_act(&self) -> bool {
        self.active && !self.folded && !self.all_in
    }

    /// Still contesting the pot.
    #[must_use]
    pub fn in_hand(&self) -> bool {
        self.active && !self.folded
    }
}

/// Phase of the hand state machine. `Waiting` covers the gap between
/// hands; betting happens in the four street phases.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl GamePhase {
    /// The street that follows this one, if betting continues.
    #[must_use]
    pub fn next_street(self) -> Option<GamePhase> {
        match self {
            Self::Preflop => Some(Self::Flop),
            Self::Flop => Some(Self::Turn),
            Self::Turn => Some(Self::River),
            Self::River => Some(Self::Showdown),
            Self::Waiting | Self::Showdown => None,
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Waiting => "waiting",
            Self::Preflop => "preflop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Showdown => "showdown",
        };
        write!(f, "{repr}")
    }
}

/// One tier of the pot. Eligibility shrinks as the all-in level rises;
/// the tier amounts always sum to the hand's pot.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SidePot {
    pub amount: Chips,
    /// Eligible winners in seat order.
    pub eligible: Vec<PlayerId>,
}

/// One player's share of the settled pot.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HandWinner {
    pub player_id: PlayerId,
    pub amount: Chips,
    /// Display name of the winning hand ("Full House", "Last Standing"...).
    pub hand_name: String,
    /// The winning five cards, absent when the hand ended by folds.
    pub best_five: Option<Vec<Card>>,
}

/// Outcome of a finished hand.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HandResult {
    pub winners: Vec<HandWinner>,
    pub side_pots: Vec<SidePot>,
    /// True showdown: unfolded hole cards are revealed to everyone.
    /// False when everyone but one player folded.
    pub showdown: bool,
}

/// The hand's full mutable snapshot. One exists per hand, owned by the
/// room's controller, destroyed and rebuilt at the next deal.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub players: Vec<Player>,
    pub community: Vec<Card>,
    pub pot: Chips,
    pub side_pots: Vec<SidePot>,
    /// Seat index of the player to act, if betting is open.
    pub to_act: Option<SeatIndex>,
    pub dealer_idx: SeatIndex,
    pub blinds: Blinds,
    /// Highest round bet that must be matched to stay in.
    pub current_bet: Chips,
    /// Minimum total a raise must reach to be legal.
    pub min_raise: Chips,
    /// Players who have acted since the last bet increase. A raise (or a
    /// bet-exceeding all-in) resets this to just the raiser.
    pub acted_this_round: HashSet<PlayerId>,
    pub last_action: Option<(PlayerId, PlayerAction)>,
    pub winners: Option<Vec<HandWinner>>,
}

impl GameState {
    /// Start a fresh hand snapshot in the preflop phase. Blinds and hole
    /// cards are posted/dealt by the hand lifecycle functions.
    #[must_use]
    pub fn new_hand(players: Vec<Player>, dealer_idx: SeatIndex, blinds: Blinds) -> Self {
        Self {
            phase: GamePhase::Preflop,
            players,
            community: Vec::with_capacity(constants::BOARD_SIZE),
            pot: 0,
            side_pots: Vec::new(),
            to_act: None,
            dealer_idx,
            blinds,
            current_bet: 0,
            min_raise: blinds.big,
            acted_this_round: HashSet::new(),
            last_action: None,
            winners: None,
        }
    }

    #[must_use]
    pub fn seat_of(&self, id: &PlayerId) -> Option<SeatIndex> {
        self.players.iter().position(|p| &p.id == id)
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.to_act.and_then(|idx| self.players.get(idx))
    }

    /// Players still contesting the pot.
    pub fn in_hand(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.in_hand())
    }

    #[must_use]
    pub fn in_hand_count(&self) -> usize {
        self.in_hand().count()
    }

    /// Players who can still make a betting decision.
    #[must_use]
    pub fn can_act_count(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    /// Pot conservation: the pot must equal the sum of everything
    /// committed by this hand's players at every settled point.
    #[must_use]
    pub fn pot_is_conserved(&self) -> bool {
        self.pot == self.players.iter().map(|p| p.total_bet).sum::<Chips>()
    }
}

/// Per-viewer sanitized copy of a player for broadcast.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub chips: Chips,
    /// Present only for the viewer's own seat, or for unfolded players
    /// at a true showdown.
    pub hole_cards: Option<Vec<Card>>,
    pub round_bet: Chips,
    pub total_bet: Chips,
    pub folded: bool,
    pub all_in: bool,
    pub is_bot: bool,
    pub seat_idx: SeatIndex,
    pub is_dealer: bool,
}

/// Broadcast snapshot of the hand with hole cards hidden per recipient.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GameStateView {
    pub phase: GamePhase,
    pub players: Vec<PlayerView>,
    pub community: Vec<Card>,
    pub pot: Chips,
    pub side_pots: Vec<SidePot>,
    pub to_act: Option<SeatIndex>,
    pub dealer_idx: SeatIndex,
    pub blinds: Blinds,
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub last_action: Option<(PlayerId, PlayerAction)>,
}

impl GameStateView {
    /// Build a snapshot for one recipient. A `viewer` of `None` is a
    /// room-scoped view with every hole card hidden (unless revealed by
    /// `showdown`).
    #[must_use]
    pub fn sanitized(state: &GameState, viewer: Option<&PlayerId>, showdown: bool) -> Self {
        let players = state
            .players
            .iter()
            .map(|p| {
                let own = viewer.is_some_and(|v| v == &p.id);
                let revealed = showdown && p.in_hand();
                let hole_cards = if (own || revealed) && !p.hole_cards.is_empty() {
                    Some(p.hole_cards.clone())
                } else {
                    None
                };
                PlayerView {
                    id: p.id.clone(),
                    chips: p.chips,
                    hole_cards,
                    round_bet: p.round_bet,
                    total_bet: p.total_bet,
                    folded: p.folded,
                    all_in: p.all_in,
                    is_bot: p.is_bot,
                    seat_idx: p.seat_idx,
                    is_dealer: p.is_dealer,
                }
            })
            .collect();
        Self {
            phase: state.phase,
            players,
            community: state.community.clone(),
            pot: state.pot,
            side_pots: state.side_pots.clone(),
            to_act: state.to_act,
            dealer_idx: state.dealer_idx,
            blinds: state.blinds,
            current_bet: state.current_bet,
            min_raise: state.min_raise,
            last_action: state.last_action.clone(),
        }
    }
}
