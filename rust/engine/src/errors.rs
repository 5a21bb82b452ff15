use thiserror::Error;

use crate::action::ActionKind;

/// Reasons a submitted action or table setup is rejected.
///
/// A rejected [`crate::game::Game::apply_action`] leaves the game untouched, so
/// callers may treat every variant as "ignored, nothing happened".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Hand already complete")]
    HandComplete,
    #[error("No seat is waiting to act")]
    NoSeatToAct,
    #[error("It's not seat {actual}'s turn (expected seat {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("{action:?} is not a legal action for seat {seat}")]
    IllegalAction { seat: usize, action: ActionKind },
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("Deck exhausted: requested {requested} cards, {remaining} remaining")]
    Exhausted { requested: usize, remaining: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCardError {
    #[error("Invalid card notation: '{0}'")]
    Invalid(String),
    #[error("Card index out of range: {0}")]
    OutOfRange(u8),
}
