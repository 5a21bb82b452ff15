//! Baseline AI for fixed-limit play.
//!
//! Preflop decisions come from the Chen score plus a positional bonus fed
//! through the raise/call probability tables. Postflop decisions come from a
//! Monte Carlo equity estimate against random holdings, bucketed into four
//! equity bands. Every decision samples a single uniform draw, so identical
//! states can produce different actions.

use crate::chen::{chen_score, position_bonus, preflop_call_prob, preflop_raise_prob};
use crate::config::EquityConfig;
use crate::equity::{estimate_equity, Spot};
use crate::AIOpponent;
use holdem_engine::action::{Action, ActionKind, Street};
use holdem_engine::game::Game;
use rand::{Rng, RngCore};
use tracing::debug;

/// Equity at or above which the AI plays for value.
pub const STRONG: f64 = 0.55;
pub const MEDIUM: f64 = 0.40;
/// Lowest equity that still peels a bet when the price is right.
pub const DRAW: f64 = 0.28;

const FACING_RAISE_DISCOUNT: f64 = 0.55;
const BLUFF_FREQ: f64 = 0.06;

/// Abstract choice before it is matched against the legal menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Bet or raise.
    Aggress,
    /// Check when free, otherwise call.
    Passive,
    Fold,
}

/// Chen/Monte Carlo baseline opponent.
///
/// # Example
///
/// ```rust
/// use holdem_ai::baseline::BaselineAI;
/// use holdem_ai::AIOpponent;
/// use holdem_engine::game::{Game, TableConfig};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let ai = BaselineAI::new();
/// let game = Game::with_seed(TableConfig::with_players(3), 42).unwrap();
/// let seat = game.to_act().unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let action = ai.get_action(&game, seat, &mut rng);
/// assert!(game.legal_actions().iter().any(|a| a.kind() == action.kind()));
/// ```
#[derive(Debug, Clone)]
pub struct BaselineAI {
    trials: u32,
}

impl BaselineAI {
    /// Create a baseline AI using the default per-decision trial count.
    pub fn new() -> Self {
        Self::with_trials(EquityConfig::default().ai_trials)
    }

    pub fn with_trials(trials: u32) -> Self {
        Self { trials }
    }

    pub fn trials(&self) -> u32 {
        self.trials
    }

    /// Preflop choice from hand strength and one uniform draw `r`.
    ///
    /// # Arguments
    ///
    /// * `score` - Chen score of the hole cards
    /// * `bonus` - Positional bonus
    /// * `unopened` - No raise beyond the big blind yet
    /// * `can_aggress` - A bet or raise is on the legal menu
    /// * `r` - Uniform draw in `[0, 1)`
    pub fn preflop_decision(
        score: f64,
        bonus: f64,
        unopened: bool,
        can_aggress: bool,
        r: f64,
    ) -> Decision {
        if unopened {
            let raise_p = preflop_raise_prob(score, bonus);
            if can_aggress && r < raise_p {
                return Decision::Aggress;
            }
            return Decision::Passive;
        }
        let raise_p = preflop_raise_prob(score, bonus) * FACING_RAISE_DISCOUNT;
        let call_p = preflop_call_prob(score, bonus);
        if can_aggress && r < raise_p {
            Decision::Aggress
        } else if r < call_p {
            Decision::Passive
        } else {
            Decision::Fold
        }
    }

    /// Postflop choice from equity, the price of a call, and one uniform draw.
    ///
    /// `pot_odds` is `call / (pot + call)`, or 0 when checking is free.
    pub fn postflop_decision(
        equity: f64,
        pot_odds: f64,
        check_legal: bool,
        can_aggress: bool,
        r: f64,
    ) -> Decision {
        if equity >= STRONG {
            if can_aggress && r < 0.80 {
                return Decision::Aggress;
            }
            return Decision::Passive;
        }
        if equity >= MEDIUM {
            if check_legal {
                if can_aggress && r < 0.35 {
                    return Decision::Aggress;
                }
                return Decision::Passive;
            }
            if equity > pot_odds + 0.05 {
                if can_aggress && r < 0.20 {
                    return Decision::Aggress;
                }
                return Decision::Passive;
            }
            return if equity > pot_odds {
                Decision::Passive
            } else {
                Decision::Fold
            };
        }
        if equity >= DRAW {
            return if check_legal || equity > pot_odds {
                Decision::Passive
            } else {
                Decision::Fold
            };
        }
        if check_legal {
            Decision::Passive
        } else if can_aggress && r < BLUFF_FREQ {
            Decision::Aggress
        } else {
            Decision::Fold
        }
    }
}

impl Default for BaselineAI {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks the concrete legal action for `decision`. A fold is replaced by a
/// check whenever checking is free.
pub fn resolve(decision: Decision, menu: &[Action]) -> Action {
    let find = |kind: ActionKind| menu.iter().copied().find(|a| a.kind() == kind);
    let passive = || {
        find(ActionKind::Check)
            .or_else(|| find(ActionKind::Call))
            .unwrap_or(Action::Fold)
    };
    match decision {
        Decision::Aggress => menu
            .iter()
            .copied()
            .find(Action::is_aggressive)
            .unwrap_or_else(passive),
        Decision::Passive => passive(),
        Decision::Fold => find(ActionKind::Check).unwrap_or(Action::Fold),
    }
}

impl AIOpponent for BaselineAI {
    /// Chooses a legal action for `seat`.
    ///
    /// Out of turn or without hole cards, the AI checks if it can and folds
    /// otherwise.
    fn get_action(&self, game: &Game, seat: usize, rng: &mut dyn RngCore) -> Action {
        let menu = game.legal_actions();
        let hole = match game.hand(seat) {
            Some(h) if game.is_player_turn(seat) => h,
            _ => return resolve(Decision::Fold, &menu),
        };
        let can_aggress = menu.iter().any(Action::is_aggressive);
        let check_legal = menu.iter().any(|a| a.kind() == ActionKind::Check);
        let r: f64 = rng.random();

        let decision = if game.street() == Street::Preflop {
            let score = chen_score(hole[0], hole[1]);
            let bonus = position_bonus(seat, game.dealer_seat(), &game.alive_seats());
            let unopened = game.max_bet() <= game.config().big_blind * game.config().multiplier();
            let d = Self::preflop_decision(score, bonus, unopened, can_aggress, r);
            debug!(seat, score, bonus, unopened, ?d, "preflop decision");
            d
        } else {
            let Some(spot) = Spot::from_game(game, seat) else {
                return resolve(Decision::Fold, &menu);
            };
            let equity = estimate_equity(&spot, self.trials, rng);
            let call = game.call_amount();
            let pot_odds = if call > 0 {
                f64::from(call) / f64::from(game.pot() + call)
            } else {
                0.0
            };
            let d = Self::postflop_decision(equity, pot_odds, check_legal, can_aggress, r);
            debug!(seat, equity, pot_odds, ?d, "postflop decision");
            d
        };
        resolve(decision, &menu)
    }

    fn name(&self) -> &str {
        "BaselineAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::game::TableConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_baseline_ai_creation() {
        let ai = BaselineAI::new();
        assert_eq!(ai.name(), "BaselineAI");
        assert_eq!(ai.trials(), 300);
        assert_eq!(BaselineAI::with_trials(50).trials(), 50);
    }

    #[test]
    fn test_premium_hands_always_open() {
        // Aces score 20; every draw below 1.0 raises.
        for r in [0.0, 0.5, 0.999] {
            assert_eq!(
                BaselineAI::preflop_decision(20.0, 0.0, true, true, r),
                Decision::Aggress
            );
        }
        assert_eq!(
            BaselineAI::preflop_decision(20.0, 0.0, true, false, 0.1),
            Decision::Passive
        );
    }

    #[test]
    fn test_facing_raise_discounts_aggression() {
        // Score 10: open-raise prob 1.0, facing a raise 0.55.
        assert_eq!(
            BaselineAI::preflop_decision(10.0, 0.0, false, true, 0.6),
            Decision::Passive
        );
        assert_eq!(
            BaselineAI::preflop_decision(10.0, 0.0, false, true, 0.5),
            Decision::Aggress
        );
        // Trash folds to a raise on a high draw.
        assert_eq!(
            BaselineAI::preflop_decision(-1.0, 0.0, false, true, 0.9),
            Decision::Fold
        );
    }

    #[test]
    fn test_postflop_bands() {
        assert_eq!(
            BaselineAI::postflop_decision(0.7, 0.0, true, true, 0.5),
            Decision::Aggress
        );
        assert_eq!(
            BaselineAI::postflop_decision(0.45, 0.0, true, true, 0.5),
            Decision::Passive
        );
        // Medium equity facing a bet it cannot profitably call.
        assert_eq!(
            BaselineAI::postflop_decision(0.42, 0.45, false, true, 0.5),
            Decision::Fold
        );
        assert_eq!(
            BaselineAI::postflop_decision(0.3, 0.2, false, true, 0.5),
            Decision::Passive
        );
        assert_eq!(
            BaselineAI::postflop_decision(0.1, 0.2, false, true, 0.05),
            Decision::Aggress
        );
        assert_eq!(
            BaselineAI::postflop_decision(0.1, 0.2, false, false, 0.05),
            Decision::Fold
        );
    }

    #[test]
    fn test_fold_becomes_check_when_free() {
        let menu = [Action::Fold, Action::Check, Action::Bet { amount: 30 }];
        assert_eq!(resolve(Decision::Fold, &menu), Action::Check);
        assert_eq!(resolve(Decision::Aggress, &menu), Action::Bet { amount: 30 });
        let facing = [Action::Fold, Action::Call { amount: 30 }];
        assert_eq!(resolve(Decision::Aggress, &facing), Action::Call { amount: 30 });
        assert_eq!(resolve(Decision::Fold, &facing), Action::Fold);
    }

    #[test]
    fn test_actions_are_always_legal() {
        let ai = BaselineAI::with_trials(60);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let cfg = TableConfig {
            player_seat: None,
            ..TableConfig::with_players(4)
        };
        let mut game = Game::with_seed(cfg, 3).unwrap();
        for _ in 0..5 {
            if game.is_session_over() {
                break;
            }
            while !game.is_game_over() {
                let seat = game.to_act().unwrap();
                let action = ai.get_action(&game, seat, &mut rng);
                assert!(game.legal_actions().iter().any(|a| a.kind() == action.kind()));
                game.apply_action(seat, action).unwrap();
            }
            game.new_hand();
        }
    }

    #[test]
    fn test_out_of_turn_checks_or_folds() {
        let ai = BaselineAI::new();
        let game = Game::with_seed(TableConfig::with_players(3), 1).unwrap();
        let seat = game.to_act().unwrap();
        let other = (seat + 1) % 3;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let action = ai.get_action(&game, other, &mut rng);
        assert!(matches!(action, Action::Fold | Action::Check));
    }
}
