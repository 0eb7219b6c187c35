//! Side-pot partitioning.
//!
//! Given the final per-player committed amounts, the pot is split into
//! eligibility tiers: one tier per distinct all-in commitment level
//! (ascending), plus a final tier for anything wagered above the top
//! all-in level. Folded players' chips stay inside the tiers they were
//! committed to, but folded players are never eligible to win.

use std::collections::BTreeSet;

use super::entities::{Chips, Player, SidePot};

/// Partition the hand's pot into side pots.
///
/// `players` is every player dealt into the hand, folded ones included;
/// eligibility is restricted to those still contesting the pot. The tier
/// amounts always sum to the total committed by all players, and the
/// eligibility sets shrink (never grow) as the level rises. Chips
/// committed above the deepest contender's level (a fold or departure
/// after a large bet) merge into the tier below them, so every tier has
/// at least one eligible winner while the hand is contested.
#[must_use]
pub fn compute_side_pots(players: &[Player]) -> Vec<SidePot> {
    // Ascending distinct all-in commitment levels among contenders.
    let mut levels: BTreeSet<Chips> = players
        .iter()
        .filter(|p| p.in_hand() && p.all_in && p.total_bet > 0)
        .map(|p| p.total_bet)
        .collect();

    // Whatever was wagered beyond the deepest all-in forms a final tier
    // open to the players who contributed it. With no all-ins this is
    // the only tier.
    if let Some(top) = players.iter().map(|p| p.total_bet).max()
        && top > 0
    {
        levels.insert(top);
    }

    let mut pots: Vec<SidePot> = Vec::with_capacity(levels.len());
    let mut prev: Chips = 0;
    for level in levels {
        // Everyone chips in the slice of their commitment that falls
        // between the previous level and this one, folded or not.
        let amount: Chips = players
            .iter()
            .map(|p| p.total_bet.min(level) - p.total_bet.min(prev))
            .sum();
        let eligible: Vec<_> = players
            .iter()
            .filter(|p| p.in_hand() && p.total_bet >= level)
            .map(|p| p.id.clone())
            .collect();
        prev = level;
        if amount == 0 {
            continue;
        }
        if eligible.is_empty() {
            // Chips committed above every contender's level: folded or
            // departed money nobody left can match. They fall to the
            // winners of the tier below; with no tier below, the pot
            // opens to everyone still in hand.
            match pots.last_mut() {
                Some(below) => below.amount += amount,
                None => pots.push(SidePot {
                    amount,
                    eligible: players
                        .iter()
                        .filter(|p| p.in_hand())
                        .map(|p| p.id.clone())
                        .collect(),
                }),
            }
        } else {
            pots.push(SidePot { amount, eligible });
        }
    }
    pots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::{Player, PlayerId};

    fn contender(id: &str, seat: usize, total_bet: Chips, all_in: bool) -> Player {
        let mut p = Player::new(PlayerId::new(id), 1000, seat, false);
        p.total_bet = total_bet;
        p.all_in = all_in;
        p
    }

    fn folder(id: &str, seat: usize, total_bet: Chips) -> Player {
        let mut p = contender(id, seat, total_bet, false);
        p.folded = true;
        p
    }

    fn ids(pot: &SidePot) -> Vec<&str> {
        pot.eligible.iter().map(PlayerId::as_str).collect()
    }

    #[test]
    fn no_all_in_is_a_single_tier() {
        let players = vec![
            contender("alice", 0, 100, false),
            contender("bob", 1, 100, false),
            contender("carol", 2, 100, false),
        ];
        let pots = compute_side_pots(&players);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 300);
        assert_eq!(ids(&pots[0]), ["alice", "bob", "carol"]);
    }

    #[test]
    fn short_all_in_splits_two_tiers() {
        // Three players: one all-in for 150, the other two continued to
        // 300 each. Tier one is 150x3 for everyone; the excess belongs
        // only to the two still able to act.
        let players = vec![
            contender("alice", 0, 150, true),
            contender("bob", 1, 300, false),
            contender("carol", 2, 300, false),
        ];
        let pots = compute_side_pots(&players);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 450);
        assert_eq!(ids(&pots[0]), ["alice", "bob", "carol"]);
        assert_eq!(pots[1].amount, 300);
        assert_eq!(ids(&pots[1]), ["bob", "carol"]);
    }

    #[test]
    fn stacked_all_ins_form_ascending_tiers() {
        let players = vec![
            contender("alice", 0, 25, true),
            contender("bob", 1, 75, true),
            contender("carol", 2, 150, true),
            contender("dave", 3, 150, false),
        ];
        let pots = compute_side_pots(&players);
        assert_eq!(pots.len(), 3);
        assert_eq!(pots[0].amount, 100); // 25 x 4
        assert_eq!(pots[1].amount, 150); // 50 x 3
        assert_eq!(pots[2].amount, 150); // 75 x 2
        assert_eq!(ids(&pots[0]), ["alice", "bob", "carol", "dave"]);
        assert_eq!(ids(&pots[1]), ["bob", "carol", "dave"]);
        assert_eq!(ids(&pots[2]), ["carol", "dave"]);
    }

    #[test]
    fn tied_all_in_levels_share_one_tier() {
        let players = vec![
            contender("alice", 0, 80, true),
            contender("bob", 1, 80, true),
            contender("carol", 2, 200, false),
        ];
        let pots = compute_side_pots(&players);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 240);
        assert_eq!(ids(&pots[0]), ["alice", "bob", "carol"]);
        assert_eq!(pots[1].amount, 120);
        assert_eq!(ids(&pots[1]), ["carol"]);
    }

    #[test]
    fn folded_chips_stay_in_the_tiers() {
        // Dave folded after committing 60; his chips pad the tiers but
        // he is never eligible.
        let players = vec![
            contender("alice", 0, 100, true),
            contender("bob", 1, 200, false),
            folder("dave", 2, 60),
        ];
        let pots = compute_side_pots(&players);
        let total: Chips = pots.iter().map(|p| p.amount).sum();
        assert_eq!(total, 360);
        assert_eq!(pots[0].amount, 260); // 100 + 100 + 60
        assert_eq!(ids(&pots[0]), ["alice", "bob"]);
        assert_eq!(pots[1].amount, 100);
        assert_eq!(ids(&pots[1]), ["bob"]);
        assert!(pots.iter().all(|p| !p.eligible.contains(&PlayerId::new("dave"))));
    }

    #[test]
    fn single_remaining_player_collapses_to_one_tier() {
        let players = vec![
            contender("alice", 0, 90, false),
            folder("bob", 1, 40),
            folder("carol", 2, 90),
        ];
        let pots = compute_side_pots(&players);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 220);
        assert_eq!(ids(&pots[0]), ["alice"]);
    }

    #[test]
    fn folder_deeper_than_all_in_pads_the_excess_tier() {
        // A fold above the all-in level leaves chips in the upper tier
        // for the sole remaining deep player.
        let players = vec![
            contender("alice", 0, 50, true),
            contender("bob", 1, 120, false),
            folder("carol", 2, 120),
        ];
        let pots = compute_side_pots(&players);
        assert_eq!(pots[0].amount, 150);
        assert_eq!(pots[1].amount, 140);
        assert_eq!(ids(&pots[1]), ["bob"]);
    }

    #[test]
    fn folded_excess_above_every_contender_merges_down() {
        // Big blind posts 10 and folds against a short all-in of 3; the
        // unmatched 7 still belongs to the all-in player's tier.
        let players = vec![
            contender("alice", 0, 3, true),
            folder("bob", 1, 10),
            folder("carol", 2, 0),
        ];
        let pots = compute_side_pots(&players);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 13);
        assert_eq!(ids(&pots[0]), ["alice"]);
    }

    #[test]
    fn departed_deep_stack_cannot_strand_a_tier() {
        let players = vec![
            contender("alice", 0, 5, true),
            contender("bob", 1, 5, true),
            folder("carol", 2, 20),
        ];
        let pots = compute_side_pots(&players);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 30);
        assert_eq!(ids(&pots[0]), ["alice", "bob"]);
    }

    #[test]
    fn eligibility_never_grows_with_level() {
        let players = vec![
            contender("a", 0, 10, true),
            contender("b", 1, 40, true),
            contender("c", 2, 90, true),
            contender("d", 3, 90, false),
            folder("e", 4, 25),
        ];
        let pots = compute_side_pots(&players);
        for pair in pots.windows(2) {
            assert!(pair[1].eligible.len() <= pair[0].eligible.len());
            assert!(pair[1]
                .eligible
                .iter()
                .all(|id| pair[0].eligible.contains(id)));
        }
        let total: Chips = pots.iter().map(|p| p.amount).sum();
        assert_eq!(total, 255);
    }
}
