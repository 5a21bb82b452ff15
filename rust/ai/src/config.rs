use holdem_engine::action::ActionKind;
use holdem_engine::hand::Category;
use serde::{Deserialize, Serialize};

/// Monte Carlo trial counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityConfig {
    /// Trials per AI postflop decision.
    pub ai_trials: u32,
    /// Trials per solver analysis.
    pub solver_trials: u32,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            ai_trials: 300,
            solver_trials: 800,
        }
    }
}

/// Probability of each action class for one hand-strength tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Likelihood {
    pub aggressive: f64,
    pub fold: f64,
    /// Check or call.
    pub passive: f64,
}

impl Likelihood {
    pub const fn new(aggressive: f64, fold: f64, passive: f64) -> Self {
        Self {
            aggressive,
            fold,
            passive,
        }
    }

    pub fn pick(&self, kind: ActionKind) -> f64 {
        match kind {
            ActionKind::Bet | ActionKind::Raise => self.aggressive,
            ActionKind::Fold => self.fold,
            ActionKind::Check | ActionKind::Call => self.passive,
        }
    }
}

/// Postflop action likelihoods by made-hand tier, used by the range
/// tracker. A hand-tuned policy: stronger tiers must stay more aggressive
/// and less willing to fold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LikelihoodTable {
    /// Full house or better.
    pub monster: Likelihood,
    /// Straight or flush.
    pub strong: Likelihood,
    pub trips: Likelihood,
    pub two_pair: Likelihood,
    pub one_pair: Likelihood,
    pub high_card: Likelihood,
    /// Used when every concrete combo of a hand type collides with the board.
    pub blocked: f64,
}

impl Default for LikelihoodTable {
    fn default() -> Self {
        Self {
            monster: Likelihood::new(0.85, 0.02, 0.70),
            strong: Likelihood::new(0.70, 0.05, 0.65),
            trips: Likelihood::new(0.60, 0.08, 0.60),
            two_pair: Likelihood::new(0.50, 0.12, 0.55),
            one_pair: Likelihood::new(0.30, 0.25, 0.55),
            high_card: Likelihood::new(0.10, 0.65, 0.35),
            blocked: 0.3,
        }
    }
}

impl LikelihoodTable {
    pub fn tier(&self, category: Category) -> &Likelihood {
        match category {
            Category::FullHouse
            | Category::FourOfAKind
            | Category::StraightFlush
            | Category::RoyalFlush => &self.monster,
            Category::Straight | Category::Flush => &self.strong,
            Category::ThreeOfAKind => &self.trips,
            Category::TwoPair => &self.two_pair,
            Category::OnePair => &self.one_pair,
            Category::HighCard => &self.high_card,
        }
    }

    pub fn likelihood(&self, category: Category, kind: ActionKind) -> f64 {
        self.tier(category).pick(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_monotone_in_strength() {
        let t = LikelihoodTable::default();
        let tiers = [
            t.high_card,
            t.one_pair,
            t.two_pair,
            t.trips,
            t.strong,
            t.monster,
        ];
        for w in tiers.windows(2) {
            assert!(w[0].aggressive <= w[1].aggressive);
            assert!(w[0].fold >= w[1].fold);
        }
        assert_eq!(t.likelihood(Category::RoyalFlush, ActionKind::Raise), 0.85);
        assert_eq!(t.likelihood(Category::HighCard, ActionKind::Check), 0.35);
    }
}
