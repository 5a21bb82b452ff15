use holdem_engine::action::{Action, Street};
use holdem_engine::game::{Game, TableConfig};
use holdem_engine::rules::MAX_RAISES;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn total_chips(g: &Game) -> u32 {
    g.chips().iter().sum()
}

/// Plays random legal actions, checking conservation after every step.
fn play_random_hand(g: &mut Game, rng: &mut ChaCha8Rng) {
    let start: u32 = g.chips_start().iter().sum();
    let mut paid_out = false;
    while !g.is_game_over() {
        let seat = g.to_act().unwrap();
        let menu = g.legal_actions();
        assert_eq!(menu[0], Action::Fold);
        assert_eq!(
            menu.iter().any(|a| *a == Action::Check),
            g.call_amount() == 0
        );
        if g.raise_count() >= MAX_RAISES {
            assert!(!menu.iter().any(Action::is_aggressive));
        }
        let choice = *menu.choose(rng).unwrap();
        g.apply_action(seat, choice).unwrap();
        if g.is_game_over() {
            paid_out = true;
        } else {
            assert_eq!(total_chips(g) + g.pot(), start);
        }
    }
    assert!(paid_out);
    assert_eq!(total_chips(g), start);
}

#[test]
fn chips_are_conserved_across_many_hands() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for players in 2..=9 {
        let cfg = TableConfig {
            player_seat: None,
            ..TableConfig::with_players(players)
        };
        let mut g = Game::with_seed(cfg, players as u64).unwrap();
        let session_total = total_chips(&g);
        for _ in 0..40 {
            if g.is_session_over() {
                break;
            }
            play_random_hand(&mut g, &mut rng);
            assert_eq!(total_chips(&g), session_total);
            g.new_hand();
        }
    }
}

#[test]
fn eliminated_seats_stay_folded() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let cfg = TableConfig {
        player_seat: None,
        starting_chips: 60,
        ..TableConfig::with_players(5)
    };
    let mut g = Game::with_seed(cfg, 3).unwrap();
    for _ in 0..1000 {
        if g.is_session_over() {
            break;
        }
        for s in 0..g.num_players() {
            if g.eliminated()[s] {
                assert!(g.folded()[s]);
                assert!(g.hand(s).is_none());
            }
        }
        play_random_hand(&mut g, &mut rng);
        g.new_hand();
    }
    assert!(g.is_tour_win());
    assert_eq!(g.alive_seats().len(), 1);
}

#[test]
fn heads_up_fold_pays_blinds_to_the_big_blind() {
    let mut game = None;
    for seed in 0..64 {
        let g = Game::with_seed(TableConfig::with_players(2), seed).unwrap();
        if g.dealer_seat() == 1 {
            game = Some(g);
            break;
        }
    }
    let mut g = game.expect("some seed puts the button on seat 1");
    assert_eq!(g.hand(0).map(|h| h.len()), Some(2));
    assert_eq!(g.pot(), 45);
    assert!(g.is_player_turn(1));
    g.apply_action(1, Action::Fold).unwrap();
    assert!(g.is_game_over());
    assert_eq!(g.winner(), Some(0));
    assert_eq!(g.chips()[0], 1515);
    assert_eq!(g.chips()[1], 1485);
    assert_eq!(g.winning_hand().unwrap().category_name(), "Fold Win");
}

#[test]
fn abandoning_a_live_hand_refunds_contributions() {
    let mut g = Game::with_seed(TableConfig::with_players(4), 31).unwrap();
    let start = total_chips(&g) + g.pot();
    // Blinds plus a raise and a call are in the pot when the hand is cut short.
    let seat = g.to_act().unwrap();
    let raise = *g.legal_actions().iter().find(|a| a.is_aggressive()).unwrap();
    g.apply_action(seat, raise).unwrap();
    let seat = g.to_act().unwrap();
    let call = g.call_amount();
    g.apply_action(seat, Action::Call { amount: call }).unwrap();
    assert!(!g.is_game_over());
    assert!(g.pot() > 45);

    g.new_hand();
    assert_eq!(g.hands_played(), 2);
    assert_eq!(total_chips(&g) + g.pot(), start);
    assert_eq!(g.chips_start().iter().sum::<u32>(), start);
    assert_eq!(g.pot(), 45, "only the new blinds");
}

#[test]
fn checked_down_hand_reaches_showdown() {
    let cfg = TableConfig::with_players(3);
    let mut g = Game::with_seed(cfg, 9).unwrap();
    while !g.is_game_over() {
        let seat = g.to_act().unwrap();
        let call = g.call_amount();
        let action = if call == 0 {
            Action::Check
        } else {
            Action::Call { amount: call }
        };
        g.apply_action(seat, action).unwrap();
    }
    assert_eq!(g.street(), Street::Showdown);
    assert_eq!(g.board().len(), 5);
    assert_eq!(g.deck().burned().len(), 3);
    assert_eq!(g.eval_results().len(), 3);
    assert_eq!(g.pot(), 90);
    let best = g.eval_results().values().map(|e| e.score).max().unwrap();
    for &w in g.winners() {
        assert_eq!(g.eval_results()[&w].score, best);
    }
    assert_eq!(g.chips().iter().sum::<u32>(), 4500);
}

#[test]
fn bet_level_scales_stakes() {
    let cfg = TableConfig {
        bet_level: 2,
        ..TableConfig::with_players(4)
    };
    let g = Game::with_seed(cfg, 5).unwrap();
    assert_eq!(g.pot(), 180);
    assert_eq!(g.bet_size(), 120);
    assert_eq!(g.bets()[g.bb_seat()], 120);
}

#[test]
fn human_bust_ends_the_session() {
    let cfg = TableConfig {
        starting_chips: 30,
        ..TableConfig::with_players(2)
    };
    let mut g = Game::with_seed(cfg, 0).unwrap();
    for _ in 0..50 {
        if g.is_session_over() {
            break;
        }
        let seat = g.to_act().unwrap();
        // Seat 0 always folds; seat 1 checks or calls.
        let action = if seat == 0 {
            Action::Fold
        } else if g.call_amount() == 0 {
            Action::Check
        } else {
            Action::Call { amount: 0 }
        };
        g.apply_action(seat, action).unwrap();
        if g.is_game_over() {
            g.new_hand();
        }
    }
    assert!(g.is_bust());
    assert!(!g.is_tour_win());
}
