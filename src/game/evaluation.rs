//! Hand evaluation: score any 5 to 7 cards into a canonical, totally
//! ordered strength value.
//!
//! Every 5-card subset of the hole-plus-board set is scored (at most
//! C(7,5) = 21 subsets) and the maximum retained. The strength scalar
//! packs the category into the high bits and the five tiebreak ranks
//! into 4-bit groups below it, so two evaluations compare with plain
//! integer comparison and ties come out exactly equal.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entities::{Card, Rank, RANK_ACE};

#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::HighCard => "High Card",
            Self::OnePair => "Pair",
            Self::TwoPair => "Two Pair",
            Self::ThreeOfAKind => "Three of a Kind",
            Self::Straight => "Straight",
            Self::Flush => "Flush",
            Self::FullHouse => "Full House",
            Self::FourOfAKind => "Four of a Kind",
            Self::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The best five cards found for a player, with their comparable strength.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HandEvaluation {
    pub category: HandCategory,
    /// Totally ordered scalar: category in bits 20.., tiebreak ranks in
    /// descending 4-bit groups below.
    pub strength: u32,
    /// The winning subset, sorted by descending rank.
    pub best_five: Vec<Card>,
}

impl HandEvaluation {
    /// Display name, with the ace-high straight flush called out.
    #[must_use]
    pub fn name(&self) -> String {
        if self.category == HandCategory::StraightFlush
            && self.best_five.first().is_some_and(|c| c.rank == RANK_ACE)
            && self.best_five.last().is_some_and(|c| c.rank == 10)
        {
            return "Royal Flush".to_string();
        }
        self.category.name().to_string()
    }
}

impl Ord for HandEvaluation {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.strength.cmp(&other.strength)
    }
}

impl PartialOrd for HandEvaluation {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Evaluate the best 5-card hand from 5 to 7 cards (hole cards plus the
/// revealed board). Returns `None` with fewer than 5 cards: pre-flop and
/// partial boards defer ranking, they are never compared for a result.
#[must_use]
pub fn evaluate(cards: &[Card]) -> Option<HandEvaluation> {
    if cards.len() < 5 {
        return None;
    }

    let n = cards.len();
    let mut best: Option<HandEvaluation> = None;
    for i in 0..(n - 4) {
        for j in (i + 1)..(n - 3) {
            for k in (j + 1)..(n - 2) {
                for l in (k + 1)..(n - 1) {
                    for m in (l + 1)..n {
                        let five = [cards[i], cards[j], cards[k], cards[l], cards[m]];
                        let candidate = score_five(five);
                        if best
                            .as_ref()
                            .is_none_or(|b| candidate.strength > b.strength)
                        {
                            best = Some(candidate);
                        }
                    }
                }
            }
        }
    }
    best
}

/// Score exactly five cards.
fn score_five(mut five: [Card; 5]) -> HandEvaluation {
    five.sort_unstable_by(|a, b| b.rank.cmp(&a.rank));
    let ranks: [Rank; 5] = [
        five[0].rank,
        five[1].rank,
        five[2].rank,
        five[3].rank,
        five[4].rank,
    ];

    let is_flush = five.iter().all(|c| c.suit == five[0].suit);
    let straight_high = straight_high(&ranks);

    let (category, tiebreak) = if let Some(high) = straight_high {
        if is_flush {
            (HandCategory::StraightFlush, [high, 0, 0, 0, 0])
        } else {
            (HandCategory::Straight, [high, 0, 0, 0, 0])
        }
    } else {
        // Rank multiplicities, highest count first, then highest rank.
        let mut groups: Vec<(usize, Rank)> = Vec::with_capacity(5);
        for &r in &ranks {
            match groups.iter_mut().find(|(_, gr)| *gr == r) {
                Some((count, _)) => *count += 1,
                None => groups.push((1, r)),
            }
        }
        groups.sort_unstable_by(|a, b| b.cmp(a));

        match groups.as_slice() {
            [(4, quad), (1, kicker)] => {
                (HandCategory::FourOfAKind, [*quad, *kicker, 0, 0, 0])
            }
            [(3, trips), (2, pair)] => (HandCategory::FullHouse, [*trips, *pair, 0, 0, 0]),
            [(3, trips), (1, k1), (1, k2)] => {
                (HandCategory::ThreeOfAKind, [*trips, *k1, *k2, 0, 0])
            }
            [(2, hi), (2, lo), (1, kicker)] => {
                (HandCategory::TwoPair, [*hi, *lo, *kicker, 0, 0])
            }
            [(2, pair), (1, k1), (1, k2), (1, k3)] => {
                (HandCategory::OnePair, [*pair, *k1, *k2, *k3, 0])
            }
            _ if is_flush => (HandCategory::Flush, ranks),
            _ => (HandCategory::HighCard, ranks),
        }
    };

    // For the wheel, present the five as 5-4-3-2-A.
    if straight_high == Some(5) {
        five.rotate_left(1);
    }

    HandEvaluation {
        category,
        strength: pack_strength(category, tiebreak),
        best_five: five.to_vec(),
    }
}

/// High card of a straight made from five descending ranks, if any.
/// The wheel (A-5-4-3-2) counts as a 5-high straight, not ace-high.
fn straight_high(ranks: &[Rank; 5]) -> Option<Rank> {
    let distinct = ranks.windows(2).all(|w| w[0] != w[1]);
    if !distinct {
        return None;
    }
    if ranks[0] - ranks[4] == 4 {
        return Some(ranks[0]);
    }
    if *ranks == [RANK_ACE, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

fn pack_strength(category: HandCategory, tiebreak: [Rank; 5]) -> u32 {
    let mut strength = (category as u32) << 20;
    for (i, &r) in tiebreak.iter().enumerate() {
        strength |= u32::from(r) << (16 - 4 * i);
    }
    strength
}
