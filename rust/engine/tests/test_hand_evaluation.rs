use std::cmp::Ordering;

use holdem_engine::cards::{full_deck, parse_cards, Card};
use holdem_engine::hand::{compare_hands, evaluate5, evaluate_best, Category, Combinations};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

#[test]
fn detects_every_category() {
    let cases = [
        ("As Kd 9h 6c 3s", Category::HighCard),
        ("As Ad 9h 6c 3s", Category::OnePair),
        ("As Ad 9h 9c 3s", Category::TwoPair),
        ("As Ad Ah 9c 3s", Category::ThreeOfAKind),
        ("6s 7d 8h 9c Ts", Category::Straight),
        ("2s 7s 9s Js Ks", Category::Flush),
        ("As Ad Ah 9c 9s", Category::FullHouse),
        ("As Ad Ah Ac 3s", Category::FourOfAKind),
        ("5h 6h 7h 8h 9h", Category::StraightFlush),
        ("Th Jh Qh Kh Ah", Category::RoyalFlush),
    ];
    for (hand, expected) in cases {
        let c = cards(hand);
        let best = evaluate_best(&c).unwrap();
        assert_eq!(best.category, expected, "{hand}");
    }
}

#[test]
fn seven_card_best_picks_royal_over_board_noise() {
    let c = cards("Ah Kh Qh Jh Th 2c 3d");
    let best = evaluate_best(&c).unwrap();
    assert_eq!(best.category, Category::RoyalFlush);
    assert_eq!(best.score, 80_012_000);
    assert!(best.best_cards.iter().all(|c| c.suit_index() == 1));
}

#[test]
fn wheel_ranks_below_six_high_straight() {
    let wheel = evaluate_best(&cards("As 2d 3h 4c 5s")).unwrap();
    let six = evaluate_best(&cards("2d 3h 4c 5s 6h")).unwrap();
    assert_eq!(wheel.score, 40_003_000);
    assert_eq!(compare_hands(&six, &wheel), Ordering::Greater);
}

#[test]
fn kickers_break_ties_and_equal_scores_split() {
    let a = evaluate_best(&cards("As Ad Kh 9c 3s")).unwrap();
    let b = evaluate_best(&cards("Ah Ac Qh 9d 3d")).unwrap();
    assert_eq!(compare_hands(&a, &b), Ordering::Greater);
    let c = evaluate_best(&cards("Ah Ac Kd 9d 3d")).unwrap();
    assert_eq!(compare_hands(&a, &c), Ordering::Equal);
}

#[test]
fn best_of_seven_matches_brute_force() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut deck = full_deck();
    for _ in 0..300 {
        deck.shuffle(&mut rng);
        let seven = &deck[..7];
        let best = evaluate_best(seven).unwrap();
        let mut max = 0;
        for idx in Combinations::<5>::new(7) {
            let five = idx.map(|i| seven[i]);
            let (_, score) = evaluate5(&five);
            assert!(best.score >= score);
            max = max.max(score);
        }
        assert_eq!(best.score, max);
        assert_eq!(evaluate5(&best.best_cards).1, best.score);
    }
}

#[test]
fn ordering_is_consistent_with_category_then_score() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut deck = full_deck();
    let mut evals = Vec::new();
    for _ in 0..200 {
        deck.shuffle(&mut rng);
        evals.push(evaluate_best(&deck[..7]).unwrap());
    }
    for a in &evals {
        for b in &evals {
            assert_eq!(compare_hands(a, b), compare_hands(b, a).reverse());
            let tier = |e: &holdem_engine::hand::HandEvaluation| e.category.index().min(8);
            if tier(a) > tier(b) {
                assert_eq!(compare_hands(a, b), Ordering::Greater);
            }
        }
    }
}
