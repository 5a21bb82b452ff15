//! Command handler modules for the holdem CLI.
//!
//! Each command lives in its own file with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in as parameters
//! - Errors propagated via the `CliError` enum

pub mod cfg;
pub mod equity;
pub mod eval;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use equity::handle_equity_command;
pub use eval::handle_eval_command;
pub use sim::handle_sim_command;

use crate::error::CliError;
use holdem_engine::cards::{parse_cards, Card};

/// Parses card arguments that may be split across several words.
pub(crate) fn parse_card_args<S: AsRef<str>>(args: &[S]) -> Result<Vec<Card>, CliError> {
    let joined = args
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    let cards = parse_cards(&joined)?;
    for (i, c) in cards.iter().enumerate() {
        if cards[..i].contains(c) {
            return Err(CliError::InvalidInput(format!("duplicate card {c}")));
        }
    }
    Ok(cards)
}
