//! Equity command handler.
//!
//! Estimates the hero's showdown equity against N opponents holding random
//! cards, and lists outs on the flop and turn.

use super::parse_card_args;
use crate::config;
use crate::error::CliError;
use crate::ui;
use holdem_ai::equity::{calc_outs, estimate_equity, Spot};
use holdem_engine::cards::format_cards;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::Write;

/// Handle the equity command.
///
/// # Arguments
///
/// * `hero` - Two hole cards, e.g. `"As Ks"`
/// * `board` - 0, 3, 4 or 5 board cards
/// * `opponents` - Number of opponents with unknown cards
/// * `trials` - Trial count; defaults to the configured solver trials
/// * `seed` - RNG seed; defaults to the configured seed, else random
pub fn handle_equity_command(
    hero: &str,
    board: Option<&str>,
    opponents: u32,
    trials: Option<u32>,
    seed: Option<u64>,
    out: &mut dyn Write,
    _err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load_with_sources()?.config;
    let hole = parse_card_args(&[hero])?;
    if hole.len() != 2 {
        return Err(CliError::InvalidInput("hero needs exactly two cards".into()));
    }
    // Parsing hero and board together rejects cards shared between them.
    let mut cards = parse_card_args(&[hero, board.unwrap_or("")])?;
    cards.drain(..2);
    if !matches!(cards.len(), 0 | 3 | 4 | 5) {
        let msg = format!("board must have 0, 3, 4 or 5 cards, got {}", cards.len());
        return Err(CliError::InvalidInput(msg));
    }
    let trials = trials.unwrap_or(cfg.solver_trials);
    if trials == 0 {
        return Err(CliError::InvalidInput("trials must be >= 1".into()));
    }

    let spot = Spot {
        hero: [hole[0], hole[1]],
        board: cards,
        opponents: (1..=opponents as usize).collect(),
    };
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let equity = estimate_equity(&spot, trials, &mut rng);

    writeln!(out, "Hero: {}", format_cards(&spot.hero))?;
    writeln!(out, "Board: {}", ui::bracket_cards(&spot.board))?;
    writeln!(out, "Opponents: {opponents}")?;
    writeln!(out, "Trials: {trials} (seed {seed})")?;
    writeln!(out, "Equity: {}", ui::percent(equity))?;
    if (3..=4).contains(&spot.board.len()) {
        let outs = calc_outs(spot.hero, &spot.board);
        writeln!(out, "Outs: {} ({})", outs.count, outs.description)?;
    }
    Ok(())
}
