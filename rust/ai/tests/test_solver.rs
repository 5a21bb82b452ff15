use holdem_ai::config::EquityConfig;
use holdem_ai::range::RangeTracker;
use holdem_ai::solver::{analyze, Advice};
use holdem_engine::action::Action;
use holdem_engine::game::{Game, TableConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const HERO: usize = 0;

fn passive(game: &Game) -> Action {
    match game.call_amount() {
        0 => Action::Check,
        amount => Action::Call { amount },
    }
}

fn config() -> EquityConfig {
    EquityConfig {
        ai_trials: 50,
        solver_trials: 200,
    }
}

#[test]
fn ranges_switch_on_after_an_observed_opponent_action() {
    let mut game = Game::with_seed(TableConfig::with_players(3), 21).unwrap();
    let mut tracker = RangeTracker::new(3);
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    let first = analyze(&game, HERO, &tracker, &config(), &mut rng).unwrap();
    assert!(!first.range_conditioned);
    assert_eq!(first.num_opponents, 2);
    assert!((0.0..=1.0).contains(&first.equity));
    // Preflop: no outs.
    assert_eq!(first.outs.count, 0);
    let json = serde_json::to_value(&first).unwrap();
    assert!(json["recommendation"]["tone"].is_string());
    assert_eq!(json["num_opponents"], 2);

    // Play passively until an opponent has acted.
    while !tracker.has_range(1) && !tracker.has_range(2) {
        let seat = game.to_act().unwrap();
        let action = passive(&game);
        game.apply_action(seat, action).unwrap();
        tracker.observe(&game, Some(HERO));
    }
    let second = analyze(&game, HERO, &tracker, &config(), &mut rng).unwrap();
    assert!(second.range_conditioned);
}

#[test]
fn call_amount_only_counts_on_the_heros_turn() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let tracker = RangeTracker::new(3);
    for seed in 0..32 {
        let game = Game::with_seed(TableConfig::with_players(3), seed).unwrap();
        let analysis = analyze(&game, HERO, &tracker, &config(), &mut rng).unwrap();
        let facing = game.is_player_turn(HERO) && game.call_amount() > 0;
        assert_eq!(analysis.recommendation.pot_odds > 0.0, facing, "seed {seed}");
        if !facing {
            assert!(matches!(
                analysis.recommendation.advice,
                Advice::Bet | Advice::Check
            ));
        }
    }
}

#[test]
fn folded_hero_gets_no_analysis() {
    let tracker = RangeTracker::new(3);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut game = None;
    for seed in 0..64 {
        let g = Game::with_seed(TableConfig::with_players(3), seed).unwrap();
        if g.is_player_turn(HERO) {
            game = Some(g);
            break;
        }
    }
    let mut game = game.expect("some seed gives the hero the first action");
    game.apply_action(HERO, Action::Fold).unwrap();
    assert!(analyze(&game, HERO, &tracker, &config(), &mut rng).is_none());
    // A seat that does not exist has nothing to analyze either.
    assert!(analyze(&game, 7, &tracker, &config(), &mut rng).is_none());
}
