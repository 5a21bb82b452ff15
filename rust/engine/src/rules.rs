use crate::action::{Action, ActionKind};

pub const SMALL_BLIND: u32 = 15;
pub const BIG_BLIND: u32 = 30;
/// Fixed increment on preflop and flop.
pub const SMALL_BET: u32 = 30;
/// Fixed increment on turn and river.
pub const BIG_BET: u32 = 60;
/// Bets plus raises allowed per street. Preflop the big blind counts as one.
pub const MAX_RAISES: u32 = 4;
pub const STARTING_CHIPS: u32 = 1500;
pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 9;

/// Builds the action menu for a seat.
///
/// # Arguments
///
/// * `stack` - Seat's remaining chips
/// * `to_call` - Chips needed to match the current maximum bet
/// * `bet_size` - The street's fixed increment (already scaled by bet level)
/// * `raise_count` - Bets and raises made so far this street
///
/// Fold is always offered. Check is offered iff nothing is owed, otherwise a
/// call capped at the stack. A bet (nothing owed) or raise (call plus the
/// increment) is offered while `raise_count < MAX_RAISES` and the seat holds
/// chips beyond the call; its amount is capped at the stack.
///
/// # Examples
///
/// ```
/// use holdem_engine::action::Action;
/// use holdem_engine::rules::legal_actions;
///
/// let menu = legal_actions(1000, 15, 30, 1);
/// assert_eq!(
///     menu,
///     vec![Action::Fold, Action::Call { amount: 15 }, Action::Raise { amount: 45 }]
/// );
///
/// // Capped: no more raises this street.
/// let menu = legal_actions(1000, 30, 30, 4);
/// assert_eq!(menu, vec![Action::Fold, Action::Call { amount: 30 }]);
/// ```
pub fn legal_actions(stack: u32, to_call: u32, bet_size: u32, raise_count: u32) -> Vec<Action> {
    let mut actions = vec![Action::Fold];
    if to_call == 0 {
        actions.push(Action::Check);
    } else {
        actions.push(Action::Call {
            amount: to_call.min(stack),
        });
    }
    if raise_count < MAX_RAISES && stack > to_call {
        if to_call == 0 {
            actions.push(Action::Bet {
                amount: bet_size.min(stack),
            });
        } else {
            actions.push(Action::Raise {
                amount: (to_call + bet_size).min(stack),
            });
        }
    }
    actions
}

/// True if an action of the same kind appears in the menu.
pub fn is_legal(menu: &[Action], kind: ActionKind) -> bool {
    menu.iter().any(|a| a.kind() == kind)
}

/// Splits `pot` among the seats holding the maximum score.
///
/// `scores` lists `(seat, score)` in seat order. Each winner gets
/// `pot / winners`; the odd chips go to the first winner. Returns the payouts
/// in seat order, or an empty list when `scores` is empty.
///
/// ```
/// use holdem_engine::rules::settle_showdown;
///
/// let payouts = settle_showdown(90, &[(0, 100), (1, 100), (2, 50)]);
/// assert_eq!(payouts, vec![(0, 45), (1, 45)]);
/// ```
pub fn settle_showdown(pot: u32, scores: &[(usize, u32)]) -> Vec<(usize, u32)> {
    let Some(best) = scores.iter().map(|&(_, s)| s).max() else {
        return Vec::new();
    };
    let winners: Vec<usize> = scores
        .iter()
        .filter(|&&(_, s)| s == best)
        .map(|&(seat, _)| seat)
        .collect();
    let n = winners.len() as u32;
    let share = pot / n;
    let odd = pot - share * n;
    winners
        .iter()
        .enumerate()
        .map(|(i, &seat)| (seat, if i == 0 { share + odd } else { share }))
        .collect()
}

const POSITION_NAMES: [&[&str]; 8] = [
    &["BTN", "BB"],
    &["BTN", "SB", "BB"],
    &["BTN", "SB", "BB", "UTG"],
    &["BTN", "SB", "BB", "UTG", "CO"],
    &["BTN", "SB", "BB", "UTG", "HJ", "CO"],
    &["BTN", "SB", "BB", "UTG", "LJ", "HJ", "CO"],
    &["BTN", "SB", "BB", "UTG", "MP", "LJ", "HJ", "CO"],
    &["BTN", "SB", "BB", "UTG", "UTG+1", "MP", "LJ", "HJ", "CO"],
];

/// Offset of `seat` from the button counting only alive seats.
/// `None` if either seat is not alive.
pub fn position_offset(seat: usize, dealer: usize, alive_seats: &[usize]) -> Option<usize> {
    let n = alive_seats.len();
    let d = alive_seats.iter().position(|&s| s == dealer)?;
    let s = alive_seats.iter().position(|&x| x == seat)?;
    Some((s + n - d) % n)
}

/// Table position label (BTN, SB, BB, UTG, ..., CO); empty for eliminated
/// seats or fewer than two alive.
pub fn position_name(seat: usize, dealer: usize, alive_seats: &[usize]) -> &'static str {
    let n = alive_seats.len();
    if !(MIN_SEATS..=MAX_SEATS).contains(&n) {
        return "";
    }
    position_offset(seat, dealer, alive_seats)
        .and_then(|rel| POSITION_NAMES[n - MIN_SEATS].get(rel).copied())
        .unwrap_or("")
}
