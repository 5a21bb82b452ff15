//! Command-line argument types.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "Limit Hold'em evaluator, equity calculator and AI table simulator"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate 5 to 7 cards
    Eval {
        /// Cards such as `As Kd 7c 7h 2s` (one or several arguments)
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Monte Carlo equity and outs for a hole-card pair
    Equity {
        #[arg(long)]
        hero: String,
        #[arg(long)]
        board: Option<String>,
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=8))]
        opponents: u32,
        #[arg(long)]
        trials: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play an all-AI session
    Sim {
        #[arg(long, value_parser = clap::value_parser!(u32).range(2..=9))]
        players: Option<u32>,
        #[arg(long, default_value_t = 10)]
        hands: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Print a PokerStars-style history for every hand
        #[arg(long)]
        history: bool,
        /// Print each seat's inferred range at the end of every hand
        #[arg(long)]
        ranges: bool,
    },
    /// Show resolved configuration with value sources
    Cfg,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_subcommand() {
        let commands = [
            vec!["holdem", "cfg"],
            vec!["holdem", "eval", "As", "Kd", "7c", "7h", "2s"],
            vec!["holdem", "eval", "As Kd 7c 7h 2s"],
            vec!["holdem", "equity", "--hero", "As Ks", "--board", "Qs Js 2d"],
            vec!["holdem", "sim", "--players", "3", "--hands", "2", "--history"],
        ];
        for args in commands {
            assert!(HoldemCli::try_parse_from(&args).is_ok(), "{args:?}");
        }
    }

    #[test]
    fn rejects_out_of_range_tables() {
        assert!(HoldemCli::try_parse_from(["holdem", "sim", "--players", "1"]).is_err());
        assert!(HoldemCli::try_parse_from(["holdem", "sim", "--players", "10"]).is_err());
        assert!(
            HoldemCli::try_parse_from(["holdem", "equity", "--hero", "As Ks", "--opponents", "9"])
                .is_err()
        );
        assert!(HoldemCli::try_parse_from(["holdem", "eval"]).is_err());
    }
}
