//! Property-based tests for hand evaluation.

use std::collections::BTreeSet;

use live_holdem::game::{evaluate, Card, Suit};
use proptest::prelude::*;

fn card_strategy() -> impl Strategy<Value = Card> {
    (2u8..=14, 0usize..=3).prop_map(|(rank, suit_idx)| Card::new(rank, Suit::ALL[suit_idx]))
}

fn unique_cards_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card_strategy(), min..=max).prop_filter("cards must be unique", |cards| {
        let set: BTreeSet<_> = cards.iter().collect();
        set.len() == cards.len()
    })
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(cards in unique_cards_strategy(7, 7)) {
        let a = evaluate(&cards);
        let b = evaluate(&cards);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn fewer_than_five_cards_is_none(cards in unique_cards_strategy(2, 4)) {
        prop_assert!(evaluate(&cards).is_none());
    }

    #[test]
    fn card_order_does_not_matter(cards in unique_cards_strategy(5, 7)) {
        let forward = evaluate(&cards).unwrap();
        let mut reversed = cards.clone();
        reversed.reverse();
        let backward = evaluate(&reversed).unwrap();
        prop_assert_eq!(forward.strength, backward.strength);
        prop_assert_eq!(forward.category, backward.category);
    }

    #[test]
    fn best_five_comes_from_the_input(cards in unique_cards_strategy(5, 7)) {
        let eval = evaluate(&cards).unwrap();
        prop_assert_eq!(eval.best_five.len(), 5);
        let unique: BTreeSet<_> = eval.best_five.iter().collect();
        prop_assert_eq!(unique.len(), 5);
        for card in &eval.best_five {
            prop_assert!(cards.contains(card));
        }
    }

    #[test]
    fn extra_cards_never_weaken_a_hand(cards in unique_cards_strategy(7, 7)) {
        // Evaluating a superset can only find an equal or better five.
        let five = evaluate(&cards[..5]).unwrap();
        let seven = evaluate(&cards).unwrap();
        prop_assert!(seven.strength >= five.strength);
    }

    #[test]
    fn category_orders_the_strength_scalar(
        a in unique_cards_strategy(5, 7),
        b in unique_cards_strategy(5, 7),
    ) {
        let a = evaluate(&a).unwrap();
        let b = evaluate(&b).unwrap();
        // The packed scalar must agree with the category ranking.
        if a.category > b.category {
            prop_assert!(a.strength > b.strength);
        } else if a.category < b.category {
            prop_assert!(a.strength < b.strength);
        }
    }
}
