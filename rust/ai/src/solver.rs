//! Advisory analysis for a human seat: equity, outs and a recommended action.

use holdem_engine::game::Game;
use rand::Rng;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::config::EquityConfig;
use crate::equity::{calc_outs, estimate_equity, estimate_equity_vs_ranges, Outs, Spot};
use crate::range::RangeTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Advice {
    Bet,
    Check,
    Raise,
    Call,
    Fold,
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Advice::Bet => "Bet",
            Advice::Check => "Check",
            Advice::Raise => "Raise",
            Advice::Call => "Call",
            Advice::Fold => "Fold",
        };
        f.write_str(s)
    }
}

/// Display emphasis of a recommendation, independent of the action itself:
/// a check with weak equity carries a fold tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Raise,
    Call,
    Fold,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub advice: Advice,
    pub reason: String,
    pub tone: Tone,
    pub pot_odds: f64,
}

fn pct(v: f64) -> String {
    format!("{:.1}%", v * 100.0)
}

/// Maps equity and the price of calling to advice.
///
/// With nothing to call: bet at 50%+, check otherwise. Facing a bet: raise
/// at 55%+, call with at least 8 points over pot odds, thin-call with any
/// non-negative margin, fold below pot odds.
pub fn recommend(equity: f64, pot: u32, call_amount: u32, num_opponents: usize) -> Recommendation {
    let pot_odds = if call_amount > 0 {
        f64::from(call_amount) / f64::from(pot + call_amount)
    } else {
        0.0
    };
    let (advice, tone, reason) = if call_amount == 0 {
        let ways = num_opponents + 1;
        if equity >= 0.50 {
            (
                Advice::Bet,
                Tone::Raise,
                format!("Strong equity {} in {ways}-way pot. Bet for value.", pct(equity)),
            )
        } else if equity >= 0.35 {
            (
                Advice::Check,
                Tone::Call,
                format!("Marginal {}. Check and see a free card.", pct(equity)),
            )
        } else {
            (
                Advice::Check,
                Tone::Fold,
                format!("Weak {} in {ways}-way. Check/fold to bets.", pct(equity)),
            )
        }
    } else {
        let margin = equity - pot_odds;
        if equity >= 0.55 {
            (
                Advice::Raise,
                Tone::Raise,
                format!(
                    "Dominant {} vs {num_opponents} opp. Raise for value.",
                    pct(equity)
                ),
            )
        } else if margin >= 0.08 {
            (
                Advice::Call,
                Tone::Call,
                format!("Equity {} beats pot odds {}. Call.", pct(equity), pct(pot_odds)),
            )
        } else if margin >= 0.0 {
            (
                Advice::Call,
                Tone::Call,
                format!("Thin call: {} ≈ pot odds {}.", pct(equity), pct(pot_odds)),
            )
        } else {
            (
                Advice::Fold,
                Tone::Fold,
                format!("Equity {} < pot odds {}. Fold.", pct(equity), pct(pot_odds)),
            )
        }
    };
    Recommendation {
        advice,
        reason,
        tone,
        pot_odds,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverAnalysis {
    pub equity: f64,
    pub outs: Outs,
    pub recommendation: Recommendation,
    pub num_opponents: usize,
    /// Opponents were sampled from their tracked ranges.
    pub range_conditioned: bool,
}

/// Analyzes the spot for `hero_seat`.
///
/// Returns `None` when the hero holds no cards or has folded. Equity is
/// range-conditioned once any live opponent has acted and been observed.
/// The call amount only counts while the hero is the seat to act.
pub fn analyze<R: Rng + ?Sized>(
    game: &Game,
    hero_seat: usize,
    tracker: &RangeTracker,
    config: &EquityConfig,
    rng: &mut R,
) -> Option<SolverAnalysis> {
    if game.folded().get(hero_seat).copied().unwrap_or(true) {
        return None;
    }
    let spot = Spot::from_game(game, hero_seat)?;
    let num_opponents = spot.opponents.len();
    let range_conditioned = spot.opponents.iter().any(|&s| tracker.has_range(s));
    let equity = if range_conditioned {
        estimate_equity_vs_ranges(&spot, tracker, config.solver_trials, rng)
    } else {
        estimate_equity(&spot, config.solver_trials, rng)
    };
    let outs = calc_outs(spot.hero, &spot.board);
    let call = if game.is_player_turn(hero_seat) {
        game.call_amount()
    } else {
        0
    };
    let recommendation = recommend(equity, game.pot(), call, num_opponents);
    debug!(
        hero_seat,
        equity,
        range_conditioned,
        advice = %recommendation.advice,
        "solver analysis"
    );
    Some(SolverAnalysis {
        equity,
        outs,
        recommendation,
        num_opponents,
        range_conditioned,
    })
}
