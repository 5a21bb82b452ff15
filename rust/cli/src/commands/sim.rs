//! Simulation command handler.
//!
//! Seats every player with the baseline AI and plays a session hand by hand.
//! A range tracker observes every action, so `--ranges` can show what the
//! table has inferred about each seat by the end of the hand.
//!
//! # Examples
//!
//! ```no_run
//! use holdem_cli::commands::sim::handle_sim_command;
//! use std::io;
//!
//! let mut out = io::stdout();
//! let mut err = io::stderr();
//!
//! // Five hands at a 4-handed table, seed 42, with hand histories
//! handle_sim_command(Some(4), 5, Some(42), true, false, &mut out, &mut err).unwrap();
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use holdem_ai::baseline::BaselineAI;
use holdem_ai::range::RangeTracker;
use holdem_ai::AIOpponent;
use holdem_engine::game::{Game, WinningHand};
use holdem_engine::history::{format_pokerstars, HandRecord};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use tracing::info;

/// Handle the sim command.
///
/// # Arguments
///
/// * `players` - Table size; defaults to the configured player count
/// * `hands` - Hands to play; the session may end sooner on a tournament win
/// * `seed` - Base RNG seed; the table and the AI draw from separate streams
/// * `history` - Print PokerStars-style text for each hand
/// * `ranges` - Print each surviving seat's inferred range after each hand
pub fn handle_sim_command(
    players: Option<u32>,
    hands: u32,
    seed: Option<u64>,
    history: bool,
    ranges: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = config::load_with_sources()?.config;
    let players = players.map_or(cfg.players, |p| p as usize);
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut game = Game::with_seed(cfg.table(players), base_seed)?;
    let ai = BaselineAI::with_trials(cfg.ai_trials);
    let mut ai_rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(1));
    let mut tracker = RangeTracker::new(players);
    let names: Vec<String> = (1..=players).map(|i| format!("{} {i}", ai.name())).collect();

    writeln!(out, "Seed: {base_seed}")?;
    let mut played = 0;
    while played < hands {
        tracker.reset_all(players);
        while !game.is_game_over() {
            let Some(seat) = game.to_act() else {
                break;
            };
            let action = ai.get_action(&game, seat, &mut ai_rng);
            game.apply_action(seat, action)?;
            tracker.observe(&game, None);
        }
        played += 1;

        let winners = game
            .winners()
            .iter()
            .map(|w| format!("Seat {}", w + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let how = match game.winning_hand() {
            Some(WinningHand::Showdown(eval)) => format!(
                "{} {}",
                eval.category_name(),
                ui::bracket_cards(&eval.best_cards)
            ),
            Some(hand) => hand.category_name().to_string(),
            None => String::new(),
        };
        writeln!(
            out,
            "Hand {played}: {winners} won ${} with {how}",
            game.pot()
        )?;
        if history {
            if let Some(record) = HandRecord::from_game(&game) {
                writeln!(out, "{}", format_pokerstars(&record, played as usize, &names))?;
            }
        }
        if ranges {
            for seat in game.alive_seats() {
                if !tracker.has_range(seat) {
                    continue;
                }
                writeln!(
                    out,
                    "  Seat {} range ({}%): {}",
                    seat + 1,
                    tracker.range_percent(seat),
                    tracker.notation(seat)
                )?;
            }
        }

        if played == hands {
            break;
        }
        game.new_hand();
        if game.is_session_over() {
            break;
        }
    }

    if played < hands {
        ui::display_warning(
            err,
            &format!("session ended after {played} of {hands} hands"),
        )?;
    }
    info!(played, seed = base_seed, "simulation finished");
    writeln!(out, "Final chips:")?;
    for (seat, chips) in game.chips().iter().enumerate() {
        writeln!(out, "  Seat {}: {chips}", seat + 1)?;
    }
    Ok(())
}
