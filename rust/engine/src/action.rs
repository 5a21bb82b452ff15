use serde::{Deserialize, Serialize};

/// A betting decision.
///
/// For `Call`, `Bet` and `Raise` the amount is the total chips moved by the
/// seat: the capped call amount, or the call amount plus the street's fixed
/// increment, capped at the stack.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    Fold,
    Check,
    Call { amount: u32 },
    Bet { amount: u32 },
    Raise { amount: u32 },
}

/// Amount-free tag of an [`Action`], used for legality checks and likelihoods.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl ActionKind {
    pub fn is_aggressive(self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Raise)
    }

    pub fn is_passive(self) -> bool {
        matches!(self, ActionKind::Check | ActionKind::Call)
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call { .. } => ActionKind::Call,
            Action::Bet { .. } => ActionKind::Bet,
            Action::Raise { .. } => ActionKind::Raise,
        }
    }

    pub fn is_aggressive(&self) -> bool {
        self.kind().is_aggressive()
    }

    pub fn amount(&self) -> u32 {
        match *self {
            Action::Fold | Action::Check => 0,
            Action::Call { amount } | Action::Bet { amount } | Action::Raise { amount } => amount,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Street::Preflop => "Pre-Flop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
            Street::Showdown => "Showdown",
        }
    }

    /// Following street; `Showdown` is terminal.
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }

    /// Preflop and flop use the small bet; turn and river the big bet.
    pub fn is_big_bet(self) -> bool {
        matches!(self, Street::Turn | Street::River | Street::Showdown)
    }
}

/// One entry of a hand's action log.
///
/// `increment` is the street's fixed bet size for aggressive actions and the
/// chips moved for calls, matching what `label` displays.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: usize,
    pub street: Street,
    pub action: ActionKind,
    pub label: String,
    pub increment: u32,
    pub total_bet: u32,
}

impl ActionRecord {
    pub fn new(seat: usize, street: Street, action: ActionKind, increment: u32, total_bet: u32) -> Self {
        let label = match action {
            ActionKind::Fold => "Fold".to_string(),
            ActionKind::Check => "Check".to_string(),
            ActionKind::Call => format!("Call ${increment}"),
            ActionKind::Bet => format!("Bet ${increment}"),
            ActionKind::Raise => format!("Raise ${increment}"),
        };
        Self {
            seat,
            street,
            action,
            label,
            increment,
            total_bet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_serialize_as_tagged_objects() {
        let json = serde_json::to_string(&Action::Raise { amount: 60 }).unwrap();
        assert_eq!(json, r#"{"action":"raise","amount":60}"#);
        let fold: Action = serde_json::from_str(r#"{"action":"fold"}"#).unwrap();
        assert_eq!(fold, Action::Fold);
    }

    #[test]
    fn record_labels_follow_kind() {
        let r = ActionRecord::new(2, Street::Flop, ActionKind::Raise, 30, 60);
        assert_eq!(r.label, "Raise $30");
        assert_eq!(ActionRecord::new(0, Street::Turn, ActionKind::Check, 0, 0).label, "Check");
    }

    #[test]
    fn streets_progress_to_showdown() {
        assert_eq!(Street::River.next(), Street::Showdown);
        assert_eq!(Street::Showdown.next(), Street::Showdown);
        assert!(!Street::Flop.is_big_bet());
        assert!(Street::Turn.is_big_bet());
        assert_eq!(Street::Preflop.name(), "Pre-Flop");
    }
}
