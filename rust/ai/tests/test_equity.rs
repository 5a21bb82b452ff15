use holdem_ai::equity::{estimate_equity, estimate_equity_vs_ranges, Spot};
use holdem_ai::range::{type_index, RangeState, RangeTracker, NUM_HAND_TYPES};
use holdem_engine::cards::parse_cards;
use holdem_engine::game::{Game, TableConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn spot(hero: &str, board: &str, opponents: &[usize]) -> Spot {
    let h = parse_cards(hero).unwrap();
    Spot {
        hero: [h[0], h[1]],
        board: parse_cards(board).unwrap(),
        opponents: opponents.to_vec(),
    }
}

#[test]
fn made_royal_flush_always_wins() {
    let s = spot("Ah Kh", "Qh Jh Th 2c 3d", &[1, 2, 3]);
    for trials in [1, 99, 100, 101, 800] {
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(trials));
        assert_eq!(estimate_equity(&s, trials, &mut rng), 1.0);
        let tracker = RangeTracker::new(4);
        assert_eq!(estimate_equity_vs_ranges(&s, &tracker, trials, &mut rng), 1.0);
    }
}

#[test]
fn aces_heads_up_preflop() {
    let s = spot("As Ah", "", &[1]);
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let eq = estimate_equity(&s, 4000, &mut rng);
    // Exact value is about 0.852.
    assert!((0.82..0.88).contains(&eq), "{eq}");
}

#[test]
fn more_opponents_lower_equity() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let one = estimate_equity(&spot("Qs Jd", "", &[1]), 3000, &mut rng);
    let five = estimate_equity(&spot("Qs Jd", "", &[1, 2, 3, 4, 5]), 3000, &mut rng);
    assert!(five < one, "{five} >= {one}");
}

#[test]
fn tight_range_crushes_kings() {
    let mut weights = [0.0; NUM_HAND_TYPES];
    weights[type_index(12, 12, false)] = 1.0;
    let mut tracker = RangeTracker::new(2);
    *tracker.state_mut(1).unwrap() = RangeState::from_weights(weights);

    let s = spot("Ks Kh", "", &[1]);
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let vs_aces = estimate_equity_vs_ranges(&s, &tracker, 2000, &mut rng);
    let vs_random = estimate_equity(&s, 2000, &mut rng);
    // KK vs AA is about 0.18, vs a random hand about 0.82.
    assert!(vs_aces < 0.3, "{vs_aces}");
    assert!(vs_random > 0.7, "{vs_random}");
}

#[test]
fn collapsed_range_falls_back_to_random_cards() {
    let mut tracker = RangeTracker::new(2);
    *tracker.state_mut(1).unwrap() = RangeState::from_weights([0.0; NUM_HAND_TYPES]);
    let s = spot("7c 2d", "", &[1]);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let eq = estimate_equity_vs_ranges(&s, &tracker, 2000, &mut rng);
    // 72o vs a random hand is about 0.35.
    assert!((0.25..0.45).contains(&eq), "{eq}");
}

#[test]
fn spot_from_game_lists_live_opponents() {
    let game = Game::with_seed(TableConfig::with_players(4), 6).unwrap();
    let s = Spot::from_game(&game, 0).unwrap();
    assert_eq!(s.hero, game.hand(0).unwrap());
    assert!(s.board.is_empty());
    assert_eq!(s.opponents, vec![1, 2, 3]);
}
