//! # holdem-ai: Opponent modeling and decision support for Limit Hold'em
//!
//! Everything that reasons about hidden information sits here, on top of the
//! deterministic rules in `holdem-engine`.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait defining the interface for AI decision-making
//! - [`baseline`] - Chen-formula preflop and Monte Carlo postflop policy
//! - [`equity`] - Parallel Monte Carlo equity and outs
//! - [`range`] - Bayesian range tracker over the 169 starting-hand types
//! - [`solver`] - Advisory analysis and action recommendation
//! - [`create_ai`] - Factory function for creating AI opponents
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::range::RangeTracker;
//! use holdem_ai::{create_ai, AIOpponent};
//! use holdem_engine::game::{Game, TableConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let ai = create_ai("baseline").expect("known AI type");
//! let mut game = Game::with_seed(TableConfig::with_players(3), 42).unwrap();
//! let mut tracker = RangeTracker::new(game.num_players());
//! let mut rng = ChaCha8Rng::seed_from_u64(1);
//!
//! let seat = game.to_act().unwrap();
//! let action = ai.get_action(&game, seat, &mut rng);
//! game.apply_action(seat, action).unwrap();
//! tracker.observe(&game, game.player_seat());
//! ```

use holdem_engine::action::Action;
use holdem_engine::game::Game;
use rand::RngCore;

pub mod baseline;
pub mod chen;
pub mod config;
pub mod equity;
pub mod range;
pub mod solver;

/// Trait defining the interface for AI opponents in poker games.
///
/// # Example Implementation
///
/// ```rust
/// use holdem_ai::AIOpponent;
/// use holdem_engine::action::Action;
/// use holdem_engine::game::Game;
/// use rand::RngCore;
///
/// struct CallingStation;
///
/// impl AIOpponent for CallingStation {
///     fn get_action(&self, game: &Game, _seat: usize, _rng: &mut dyn RngCore) -> Action {
///         match game.call_amount() {
///             0 => Action::Check,
///             amount => Action::Call { amount },
///         }
///     }
///
///     fn name(&self) -> &str {
///         "CallingStation"
///     }
/// }
/// ```
pub trait AIOpponent: Send + Sync {
    /// Determine the next action for `seat`.
    ///
    /// Implementations should return an action whose kind is on
    /// [`Game::legal_actions`]; the engine recomputes the amount.
    fn get_action(&self, game: &Game, seat: usize, rng: &mut dyn RngCore) -> Action;

    /// Return the name/identifier of this AI implementation.
    fn name(&self) -> &str;
}

/// Factory function to create AI opponents by type string.
///
/// # Supported AI Types
///
/// - `"baseline"` - [`baseline::BaselineAI`] with default trial count
///
/// # Example
///
/// ```rust
/// use holdem_ai::create_ai;
///
/// let ai = create_ai("baseline").unwrap();
/// assert_eq!(ai.name(), "BaselineAI");
/// assert!(create_ai("gto").is_none());
/// ```
pub fn create_ai(ai_type: &str) -> Option<Box<dyn AIOpponent>> {
    match ai_type {
        "baseline" => Some(Box::new(baseline::BaselineAI::new())),
        _ => None,
    }
}
