//! Preflop starting-hand heuristics: the Chen formula, the raise/call
//! probability tables it feeds, and the positional adjustment.

use holdem_engine::cards::Card;
use holdem_engine::rules::position_offset;

const RANK_SCORE: [f64; 13] = [
    1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 6.0, 7.0, 8.0, 10.0,
];

/// Chen strength of two hole cards.
///
/// Starts from the high card's value. Pairs double it with a floor of 5.
/// Otherwise suited adds 2, the rank gap subtracts 1/2/4/5 for gaps of
/// 1/2/3/more, and close connectors from four up to jack high get 1 back.
pub fn chen_score(a: Card, b: Card) -> f64 {
    let (r1, r2) = (a.rank_index(), b.rank_index());
    let hi = r1.max(r2);
    let lo = r1.min(r2);
    let mut score = RANK_SCORE[hi as usize];
    if r1 == r2 {
        return (score * 2.0).max(5.0);
    }
    if a.suit_index() == b.suit_index() {
        score += 2.0;
    }
    let gap = hi - lo;
    score -= match gap {
        1 => 1.0,
        2 => 2.0,
        3 => 4.0,
        _ => 5.0,
    };
    if gap <= 1 && lo >= 2 && hi <= 9 {
        score += 1.0;
    }
    score
}

pub fn preflop_raise_prob(score: f64, position_bonus: f64) -> f64 {
    let adj = score + position_bonus;
    match adj {
        a if a >= 10.0 => 1.0,
        a if a >= 8.0 => 0.85,
        a if a >= 7.0 => 0.65,
        a if a >= 6.0 => 0.45,
        a if a >= 5.0 => 0.25,
        a if a >= 4.0 => 0.10,
        _ => 0.04,
    }
}

pub fn preflop_call_prob(score: f64, position_bonus: f64) -> f64 {
    let adj = score + position_bonus;
    match adj {
        a if a >= 7.0 => 1.0,
        a if a >= 5.0 => 0.80,
        a if a >= 4.0 => 0.55,
        a if a >= 3.0 => 0.30,
        _ => 0.12,
    }
}

/// Later position plays wider: BTN 2.5, SB 1.0, BB 0.5, the last two seats
/// before the button 1.5 when more than four are alive, otherwise 0.
pub fn position_bonus(seat: usize, dealer: usize, alive_seats: &[usize]) -> f64 {
    let n = alive_seats.len();
    match position_offset(seat, dealer, alive_seats) {
        Some(0) => 2.5,
        Some(1) => 1.0,
        Some(2) => 0.5,
        Some(pos) if n > 4 && pos + 2 >= n => 1.5,
        _ => 0.0,
    }
}
