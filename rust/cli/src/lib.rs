//! # holdem CLI Library
//!
//! Command-line driver for the Limit Hold'em engine: hand evaluation, equity
//! queries and all-AI table simulation.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Available Subcommands
//!
//! - `eval`: Evaluate 5 to 7 cards
//! - `equity`: Monte Carlo equity and outs for a hole-card pair
//! - `sim`: Play an all-AI session with range tracking
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{Commands, HoldemCli};
use commands::{
    handle_cfg_command, handle_equity_command, handle_eval_command, handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["eval", "equity", "sim", "cfg"];

/// Main entry point for the CLI application.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// let args = vec!["holdem", "eval", "As Ks Qs Js Ts"];
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = holdem_cli::run(args, &mut out, &mut err);
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("Royal Flush"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };
    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Eval { cards } => handle_eval_command(&cards, out, err),
        Commands::Equity {
            hero,
            board,
            opponents,
            trials,
            seed,
        } => handle_equity_command(&hero, board.as_deref(), opponents, trials, seed, out, err),
        Commands::Sim {
            players,
            hands,
            seed,
            history,
            ranges,
        } => handle_sim_command(players, hands, seed, history, ranges, out, err),
    };
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout and succeed.
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err, "\nHoldem CLI");
    let _ = writeln!(err, "Usage: holdem <command> [options]\n");
    let _ = writeln!(err, "Commands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: holdem --help");
    exit_code::ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_capture(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(args.iter().copied(), &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_help_goes_to_stdout() {
        let (code, out, err) = run_capture(&["holdem", "--help"]);
        assert_eq!(code, 0);
        assert!(out.contains("Usage"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_unknown_command_lists_commands() {
        let (code, _, err) = run_capture(&["holdem", "deal"]);
        assert_eq!(code, 2);
        for c in COMMANDS {
            assert!(err.contains(c), "{c} missing from usage");
        }
    }

    #[test]
    fn test_eval_dispatch() {
        let (code, out, _) = run_capture(&["holdem", "eval", "As", "Ad", "7c", "7h", "Kd"]);
        assert_eq!(code, 0);
        assert_eq!(
            out,
            "Category: Two Pair\nScore: 20120511\nBest five: As Ad 7c 7h Kd\n"
        );
    }
}
