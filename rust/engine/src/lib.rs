//! # holdem-engine: Limit Hold'em Table Core
//!
//! A seedable Texas Hold'em engine for fixed-limit play at 2 to 9 seats.
//! Provides card primitives, a 7-card hand evaluator, the betting state
//! machine with multi-way pot settlement, table snapshots for replication,
//! and hand-history records.
//!
//! ## Core Modules
//!
//! - [`cards`] - Integer card encoding (0..52), labels and parsing
//! - [`deck`] - Shuffled deck with burn list
//! - [`hand`] - Five-card scoring and best-of-seven selection
//! - [`action`] - Betting actions, streets and the action log entry
//! - [`rules`] - Limit stakes, legal-action menu, pot split, positions
//! - [`game`] - The per-session state machine
//! - [`snapshot`] - Public/private state split for remote seats
//! - [`history`] - Finished-hand records and PokerStars text export
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate_best, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let best = evaluate_best(&cards).unwrap();
//! assert_eq!(best.category, Category::RoyalFlush);
//! ```
//!
//! ## Playing a Hand
//!
//! ```rust
//! use holdem_engine::action::Action;
//! use holdem_engine::game::{Game, TableConfig};
//!
//! let mut game = Game::with_seed(TableConfig::with_players(6), 42).unwrap();
//! while !game.is_game_over() {
//!     let seat = game.to_act().unwrap();
//!     let choice = if game.call_amount() == 0 { Action::Check } else { Action::Fold };
//!     game.apply_action(seat, choice).unwrap();
//! }
//! assert!(game.winning_hand().is_some());
//! ```

pub mod action;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod hand;
pub mod history;
pub mod rules;
pub mod snapshot;
