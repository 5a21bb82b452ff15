//! Error types for the CLI application.
//!
//! Every handler returns `Result<(), CliError>`; [`crate::run`] maps errors
//! to exit code `2`.

use holdem_engine::errors::{GameError, ParseCardError};
use thiserror::Error;

use crate::config::ConfigError;

/// Custom error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error (stdout/stderr writes, config file reads)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid user input or command-line arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid card: {0}")]
    Cards(#[from] ParseCardError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Engine rejected a table setup or action
    #[error("Engine error: {0}")]
    Engine(#[from] GameError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_their_source() {
        let e = CliError::from(ParseCardError::Invalid("Zz".into()));
        assert_eq!(e.to_string(), "Invalid card: Invalid card notation: 'Zz'");
        let e = CliError::from(GameError::InvalidConfig("num_players must be 2..=9".into()));
        assert!(e.to_string().starts_with("Engine error: Invalid table configuration"));
        let e = CliError::InvalidInput("hands must be >= 1".into());
        assert_eq!(e.to_string(), "Invalid input: hands must be >= 1");
    }
}
