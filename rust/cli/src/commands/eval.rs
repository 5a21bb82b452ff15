//! Hand evaluation command handler.

use super::parse_card_args;
use crate::error::CliError;
use holdem_engine::cards::format_cards;
use holdem_engine::hand::evaluate_best;
use std::io::Write;

/// Handle the eval command: rank 5 to 7 cards.
///
/// # Output
///
/// ```text
/// Category: Two Pair
/// Score: 20120511
/// Best five: As Ad 7c 7h Kd
/// ```
pub fn handle_eval_command(
    cards: &[String],
    out: &mut dyn Write,
    _err: &mut dyn Write,
) -> Result<(), CliError> {
    let cards = parse_card_args(cards)?;
    if !(5..=7).contains(&cards.len()) {
        let msg = format!("expected 5 to 7 cards, got {}", cards.len());
        return Err(CliError::InvalidInput(msg));
    }
    let Some(eval) = evaluate_best(&cards) else {
        return Err(CliError::InvalidInput("not enough cards".into()));
    };
    writeln!(out, "Category: {}", eval.category_name())?;
    writeln!(out, "Score: {}", eval.score)?;
    writeln!(out, "Best five: {}", format_cards(&eval.best_cards))?;
    Ok(())
}
