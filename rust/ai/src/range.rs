//! Bayesian opponent-range tracking over the 169 starting-hand types.
//!
//! Every tracked seat carries a weight per hand type, starting at the type's
//! combo count (the uninformed prior). Each observed action multiplies every
//! weight by the likelihood of that action given the type, then rescales so
//! the largest weight is 1.
//!
//! Hand-type indices:
//!
//! | indices | types | order |
//! |---|---|---|
//! | 0..13 | pairs | 22 .. AA |
//! | 13..91 | suited | AKs, AQs, .., A2s, KQs, .., 32s |
//! | 91..169 | offsuit | AKo, .., 32o |

use std::collections::BTreeSet;

use holdem_engine::action::{ActionKind, ActionRecord, Street};
use holdem_engine::cards::{mask_of, rank_symbol, Card};
use holdem_engine::game::Game;
use holdem_engine::hand::{compare_hands, evaluate_best};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::trace;

use crate::chen::{chen_score, position_bonus, preflop_call_prob, preflop_raise_prob};
use crate::config::LikelihoodTable;

pub const NUM_HAND_TYPES: usize = 169;
/// Concrete two-card holdings in a 52-card deck.
pub const TOTAL_COMBOS: u32 = 1326;
/// Fraction of the max weight a type needs to count as "in range".
pub const DISPLAY_THRESHOLD: f64 = 0.15;
const NEGLIGIBLE: f64 = 1e-10;
const SAMPLE_FLOOR: f64 = 1e-9;
/// Per-raise growth of the likelihood exponent.
const RAISE_ACCELERATION: f64 = 0.15;

const PAIR_SUITS: [(u8, u8); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
const SUITED_SUITS: [(u8, u8); 4] = [(0, 0), (1, 1), (2, 2), (3, 3)];
const OFFSUIT_SUITS: [(u8, u8); 12] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (1, 0),
    (1, 2),
    (1, 3),
    (2, 0),
    (2, 1),
    (2, 3),
    (3, 0),
    (3, 1),
    (3, 2),
];

/// Canonical starting-hand bucket. `high >= low`; pairs are never suited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandType {
    pub high: u8,
    pub low: u8,
    pub suited: bool,
}

impl HandType {
    pub fn is_pair(&self) -> bool {
        self.high == self.low
    }

    /// 6 for pairs, 4 suited, 12 offsuit.
    pub fn combos(&self) -> u32 {
        self.suit_patterns().len() as u32
    }

    fn suit_patterns(&self) -> &'static [(u8, u8)] {
        if self.is_pair() {
            &PAIR_SUITS
        } else if self.suited {
            &SUITED_SUITS
        } else {
            &OFFSUIT_SUITS
        }
    }

    /// Every concrete holding of this type, in a fixed suit order.
    pub fn concrete(&self) -> impl Iterator<Item = [Card; 2]> + '_ {
        self.suit_patterns()
            .iter()
            .map(move |&(s1, s2)| [Card::from_parts(self.high, s1), Card::from_parts(self.low, s2)])
    }

    /// Holdings that avoid every card in `blocked` (a card mask).
    pub fn live(&self, blocked: u64) -> impl Iterator<Item = [Card; 2]> + '_ {
        self.concrete()
            .filter(move |h| blocked & (h[0].mask() | h[1].mask()) == 0)
    }

    /// Fixed stand-in holding: As/Ah for pairs, two spades suited, spade
    /// and heart offsuit.
    pub fn representative(&self) -> [Card; 2] {
        let (s1, s2) = self.suit_patterns()[0];
        [Card::from_parts(self.high, s1), Card::from_parts(self.low, s2)]
    }

    pub fn label(&self) -> String {
        let h = rank_symbol(self.high);
        let l = rank_symbol(self.low);
        match (self.is_pair(), self.suited) {
            (true, _) => format!("{h}{l}"),
            (false, true) => format!("{h}{l}s"),
            (false, false) => format!("{h}{l}o"),
        }
    }
}

const fn build_hand_types() -> [HandType; NUM_HAND_TYPES] {
    let mut out = [HandType {
        high: 0,
        low: 0,
        suited: false,
    }; NUM_HAND_TYPES];
    let mut r = 0;
    while r < 13 {
        out[r] = HandType {
            high: r as u8,
            low: r as u8,
            suited: false,
        };
        r += 1;
    }
    let mut idx = 13;
    let mut pass = 0;
    while pass < 2 {
        let mut h = 12;
        while h >= 1 {
            let mut k = h;
            while k > 0 {
                k -= 1;
                out[idx] = HandType {
                    high: h as u8,
                    low: k as u8,
                    suited: pass == 0,
                };
                idx += 1;
            }
            h -= 1;
        }
        pass += 1;
    }
    out
}

pub static HAND_TYPES: [HandType; NUM_HAND_TYPES] = build_hand_types();

// Position of (h, l) inside the suited or offsuit block.
fn block_offset(h: u8, l: u8) -> usize {
    let h = h as usize;
    78 - h * (h + 1) / 2 + (h - 1 - l as usize)
}

/// Index of the hand type for ranks `(high, low)`; `suited` is ignored for pairs.
pub fn type_index(high: u8, low: u8, suited: bool) -> usize {
    let (h, l) = (high.max(low), high.min(low));
    if h == l {
        h as usize
    } else if suited {
        13 + block_offset(h, l)
    } else {
        91 + block_offset(h, l)
    }
}

pub fn hand_type_index(a: Card, b: Card) -> usize {
    type_index(a.rank_index(), b.rank_index(), a.suit_index() == b.suit_index())
}

fn base_weights() -> [f64; NUM_HAND_TYPES] {
    let mut w = [0.0; NUM_HAND_TYPES];
    for (slot, ht) in w.iter_mut().zip(HAND_TYPES.iter()) {
        *slot = f64::from(ht.combos());
    }
    w
}

/// Belief about one seat's holding.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeState {
    pub weights: [f64; NUM_HAND_TYPES],
    pub action_count: u32,
    pub aggressed: bool,
    /// Aggressive actions seen on `raise_street`.
    pub raise_count: u32,
    pub raise_street: Option<Street>,
}

impl Default for RangeState {
    fn default() -> Self {
        Self {
            weights: base_weights(),
            action_count: 0,
            aggressed: false,
            raise_count: 0,
            raise_street: None,
        }
    }
}

impl RangeState {
    pub fn from_weights(weights: [f64; NUM_HAND_TYPES]) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    pub fn max_weight(&self) -> f64 {
        self.weights.iter().copied().fold(0.0, f64::max)
    }

    /// Absolute in-range cutoff, `None` when the range has collapsed.
    fn threshold(&self) -> Option<f64> {
        let max = self.max_weight();
        (max >= NEGLIGIBLE).then_some(DISPLAY_THRESHOLD * max)
    }

    fn in_range(&self) -> Option<impl Iterator<Item = (usize, &'static HandType)> + '_> {
        let threshold = self.threshold()?;
        Some(
            HAND_TYPES
                .iter()
                .enumerate()
                .filter(move |(i, _)| self.weights[*i] >= threshold),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub in_range: bool,
    /// Live combos; 0 when out of range.
    pub combos: u32,
}

/// Ranks of the grid rows/columns: A, K, Q, J, T, 9.
pub const GRID_RANKS: [u8; 6] = [12, 11, 10, 9, 8, 7];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandDistribution {
    /// Live in-range combos per category index.
    pub by_category: [u32; 10],
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquityBreakdown {
    pub win: u32,
    pub tie: u32,
    pub lose: u32,
    pub total: u32,
    /// Rounded percentage of combos making each category.
    pub category_pct: [u32; 10],
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("Unrecognized range token: '{0}'")]
    Token(String),
}

/// Per-session owner of every seat's [`RangeState`].
#[derive(Debug, Clone)]
pub struct RangeTracker {
    states: Vec<RangeState>,
    table: LikelihoodTable,
}

impl RangeTracker {
    pub fn new(num_seats: usize) -> Self {
        Self::with_table(num_seats, LikelihoodTable::default())
    }

    pub fn with_table(num_seats: usize, table: LikelihoodTable) -> Self {
        Self {
            states: vec![RangeState::default(); num_seats],
            table,
        }
    }

    /// Restores every seat to the combo-count prior. Call at each new hand.
    pub fn reset_all(&mut self, num_seats: usize) {
        self.states = vec![RangeState::default(); num_seats];
    }

    pub fn num_seats(&self) -> usize {
        self.states.len()
    }

    pub fn table(&self) -> &LikelihoodTable {
        &self.table
    }

    pub fn state(&self, seat: usize) -> Option<&RangeState> {
        self.states.get(seat)
    }

    pub fn state_mut(&mut self, seat: usize) -> Option<&mut RangeState> {
        self.states.get_mut(seat)
    }

    /// Folds the game's latest action into the acting seat's range.
    ///
    /// `hero` is the seat whose cards the caller holds; its actions carry no
    /// information and are skipped, as are eliminated and untracked seats.
    /// Returns whether a range was updated.
    pub fn observe(&mut self, game: &Game, hero: Option<usize>) -> bool {
        let Some(record) = game.action_history().last() else {
            return false;
        };
        let seat = record.seat;
        if Some(seat) == hero || game.eliminated().get(seat).copied().unwrap_or(true) {
            return false;
        }
        let table = self.table;
        let Some(state) = self.states.get_mut(seat) else {
            return false;
        };

        let aggressive = record.action.is_aggressive();
        if aggressive {
            if state.raise_street != Some(record.street) {
                state.raise_count = 0;
                state.raise_street = Some(record.street);
            }
            state.aggressed = true;
            state.raise_count += 1;
        }
        let power = if aggressive {
            1.0 + f64::from(state.raise_count - 1) * RAISE_ACCELERATION
        } else {
            1.0
        };

        let board_mask = mask_of(game.board());
        let alive = game.alive_seats();
        for (i, ht) in HAND_TYPES.iter().enumerate() {
            if state.weights[i] < NEGLIGIBLE {
                continue;
            }
            let p = if record.street == Street::Preflop {
                preflop_likelihood(ht, record, game.dealer_seat(), &alive)
            } else {
                postflop_likelihood(&table, ht, record.action, game.board(), board_mask)
            };
            state.weights[i] *= p.powf(power);
        }

        let max = state.max_weight();
        if max > NEGLIGIBLE {
            state.weights.iter_mut().for_each(|w| *w /= max);
        }
        state.action_count += 1;
        trace!(
            seat,
            label = %record.label,
            power,
            in_range = self.range_percent(seat),
            "range updated"
        );
        true
    }

    /// Draws one concrete holding with probability proportional to its
    /// type's weight, skipping holdings that touch `excluded` (a card mask).
    pub fn sample_hand<R: Rng + ?Sized>(
        &self,
        seat: usize,
        excluded: u64,
        rng: &mut R,
    ) -> Option<[Card; 2]> {
        let state = self.states.get(seat)?;
        let live = || {
            HAND_TYPES
                .iter()
                .zip(state.weights.iter())
                .filter(|(_, w)| **w >= SAMPLE_FLOOR)
                .flat_map(move |(ht, &w)| ht.live(excluded).map(move |h| (w, h)))
        };
        let total: f64 = live().map(|(w, _)| w).sum();
        if total < 1e-12 {
            return None;
        }
        let mut r = rng.random::<f64>() * total;
        let mut last = None;
        for (w, h) in live() {
            r -= w;
            if r <= 0.0 {
                return Some(h);
            }
            last = Some(h);
        }
        last
    }

    /// Condensed notation of the in-range types, e.g. `"QQ+, AKs, AQo+"`.
    ///
    /// A run of pairs reaching AA prints as `XX+`; a run of kickers reaching
    /// one below the high card prints as `HKs+`/`HKo+`. Empty when the seat is
    /// untracked or its range collapsed.
    pub fn notation(&self, seat: usize) -> String {
        let Some(iter) = self.states.get(seat).and_then(RangeState::in_range) else {
            return String::new();
        };
        let mut pairs: Vec<u8> = Vec::new();
        let mut suited: [Vec<u8>; 13] = Default::default();
        let mut offsuit: [Vec<u8>; 13] = Default::default();
        for (_, ht) in iter {
            if ht.is_pair() {
                pairs.push(ht.high);
            } else if ht.suited {
                suited[ht.high as usize].push(ht.low);
            } else {
                offsuit[ht.high as usize].push(ht.low);
            }
        }

        let mut parts = Vec::new();
        pairs.sort_unstable_by(|a, b| b.cmp(a));
        for run in descending_runs(&pairs) {
            if run[0] == 12 && run.len() > 1 {
                let lo = rank_symbol(run[run.len() - 1]);
                parts.push(format!("{lo}{lo}+"));
            } else {
                parts.extend(run.iter().map(|&r| {
                    let s = rank_symbol(r);
                    format!("{s}{s}")
                }));
            }
        }
        for (kickers_by_high, tag) in [(&mut suited, 's'), (&mut offsuit, 'o')] {
            for h in (0..13u8).rev() {
                let kickers = &mut kickers_by_high[h as usize];
                kickers.sort_unstable_by(|a, b| b.cmp(a));
                let hs = rank_symbol(h);
                for run in descending_runs(&kickers[..]) {
                    if run[0] + 1 == h && run.len() > 1 {
                        parts.push(format!("{hs}{}{tag}+", rank_symbol(run[run.len() - 1])));
                    } else {
                        parts.extend(run.iter().map(|&k| format!("{hs}{}{tag}", rank_symbol(k))));
                    }
                }
            }
        }
        parts.join(", ")
    }

    /// Share (0..=100) of all 1326 holdings covered by in-range types.
    /// 100 for untracked seats or a collapsed range.
    pub fn range_percent(&self, seat: usize) -> u32 {
        let Some(iter) = self.states.get(seat).and_then(RangeState::in_range) else {
            return 100;
        };
        let above: u32 = iter.map(|(_, ht)| ht.combos()).sum();
        (f64::from(above) / f64::from(TOTAL_COMBOS) * 100.0).round() as u32
    }

    /// Live in-range holdings given the cards the caller can see.
    pub fn combo_count(&self, seat: usize, excluded: &[Card]) -> u32 {
        let blocked = mask_of(excluded);
        self.states
            .get(seat)
            .and_then(RangeState::in_range)
            .map_or(0, |iter| iter.map(|(_, ht)| ht.live(blocked).count() as u32).sum())
    }

    /// 6x6 chart over A..9: diagonal pairs, upper-right suited, lower-left
    /// offsuit.
    pub fn grid(&self, seat: usize, excluded: &[Card]) -> Option<[[GridCell; 6]; 6]> {
        let state = self.states.get(seat)?;
        let threshold = state.threshold()?;
        let blocked = mask_of(excluded);
        let mut grid = [[GridCell {
            in_range: false,
            combos: 0,
        }; 6]; 6];
        for (ri, row) in grid.iter_mut().enumerate() {
            for (ci, cell) in row.iter_mut().enumerate() {
                let idx = type_index(GRID_RANKS[ri], GRID_RANKS[ci], ci > ri);
                let in_range = state.weights[idx] >= threshold;
                let combos = if in_range {
                    HAND_TYPES[idx].live(blocked).count() as u32
                } else {
                    0
                };
                *cell = GridCell { in_range, combos };
            }
        }
        Some(grid)
    }

    /// Category tally of live in-range holdings on `board` (3..=5 cards).
    pub fn hand_distribution(
        &self,
        seat: usize,
        board: &[Card],
        excluded: &[Card],
    ) -> Option<HandDistribution> {
        if !(3..=5).contains(&board.len()) {
            return None;
        }
        let iter = self.states.get(seat)?.in_range()?;
        let blocked = mask_of(excluded) | mask_of(board);
        let mut by_category = [0u32; 10];
        let mut total = 0;
        for (_, ht) in iter {
            for hole in ht.live(blocked) {
                if let Some(ev) = evaluate_best(&with_board(hole, board)) {
                    by_category[ev.category.index()] += 1;
                    total += 1;
                }
            }
        }
        Some(HandDistribution { by_category, total })
    }

    /// Exact showdown comparison of `hero` against every live in-range
    /// holding on the current `board`.
    pub fn equity_breakdown(
        &self,
        seat: usize,
        board: &[Card],
        hero: [Card; 2],
    ) -> Option<EquityBreakdown> {
        if !(3..=5).contains(&board.len()) {
            return None;
        }
        let hero_eval = evaluate_best(&with_board(hero, board))?;
        let iter = self.states.get(seat)?.in_range()?;
        let blocked = mask_of(&hero) | mask_of(board);
        let (mut win, mut tie, mut lose, mut total) = (0, 0, 0, 0);
        let mut counts = [0u32; 10];
        for (_, ht) in iter {
            for hole in ht.live(blocked) {
                let Some(opp) = evaluate_best(&with_board(hole, board)) else {
                    continue;
                };
                total += 1;
                counts[opp.category.index()] += 1;
                match compare_hands(&hero_eval, &opp) {
                    std::cmp::Ordering::Greater => win += 1,
                    std::cmp::Ordering::Equal => tie += 1,
                    std::cmp::Ordering::Less => lose += 1,
                }
            }
        }
        if total == 0 {
            return None;
        }
        let category_pct =
            counts.map(|c| (f64::from(c) / f64::from(total) * 100.0).round() as u32);
        Some(EquityBreakdown {
            win,
            tie,
            lose,
            total,
            category_pct,
        })
    }

    /// True once at least one action by `seat` has been observed.
    pub fn has_range(&self, seat: usize) -> bool {
        self.states.get(seat).is_some_and(|s| s.action_count > 0)
    }

    pub fn has_aggressed(&self, seat: usize) -> bool {
        self.states.get(seat).is_some_and(|s| s.aggressed)
    }
}

fn with_board(hole: [Card; 2], board: &[Card]) -> Vec<Card> {
    let mut cards = Vec::with_capacity(2 + board.len());
    cards.extend_from_slice(&hole);
    cards.extend_from_slice(board);
    cards
}

// Splits a descending list into runs of consecutive values.
fn descending_runs(values: &[u8]) -> Vec<&[u8]> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=values.len() {
        if i == values.len() || values[i - 1] != values[i] + 1 {
            if start < i {
                runs.push(&values[start..i]);
            }
            start = i;
        }
    }
    runs
}

fn preflop_likelihood(ht: &HandType, record: &ActionRecord, dealer: usize, alive: &[usize]) -> f64 {
    let [a, b] = ht.representative();
    let score = chen_score(a, b);
    let bonus = position_bonus(record.seat, dealer, alive);
    let raise = preflop_raise_prob(score, bonus);
    let call = preflop_call_prob(score, bonus);
    match record.action {
        ActionKind::Fold => (1.0 - raise - call).max(0.0),
        ActionKind::Bet | ActionKind::Raise => raise,
        ActionKind::Check | ActionKind::Call => call,
    }
}

fn postflop_likelihood(
    table: &LikelihoodTable,
    ht: &HandType,
    kind: ActionKind,
    board: &[Card],
    board_mask: u64,
) -> f64 {
    // First holding of the type that avoids the board stands in for it.
    let Some(hole) = ht.live(board_mask).next() else {
        return table.blocked;
    };
    match evaluate_best(&with_board(hole, board)) {
        Some(ev) => table.likelihood(ev.category, kind),
        None => table.blocked,
    }
}

fn rank_from_symbol(c: char) -> Option<u8> {
    "23456789TJQKA".find(c).map(|i| i as u8)
}

/// Expands range notation (as produced by [`RangeTracker::notation`]) into
/// hand-type indices.
pub fn parse_notation(notation: &str) -> Result<BTreeSet<usize>, NotationError> {
    let mut out = BTreeSet::new();
    for token in notation.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let bad = || NotationError::Token(token.to_string());
        let chars: Vec<char> = token.chars().collect();
        if chars.len() < 2 {
            return Err(bad());
        }
        let a = rank_from_symbol(chars[0]).ok_or_else(bad)?;
        let b = rank_from_symbol(chars[1]).ok_or_else(bad)?;
        let rest: String = chars[2..].iter().collect();
        if a == b {
            match rest.as_str() {
                "" => {
                    out.insert(type_index(a, a, false));
                }
                "+" => out.extend((a..13).map(|r| type_index(r, r, false))),
                _ => return Err(bad()),
            }
            continue;
        }
        if b > a {
            return Err(bad());
        }
        let (suited, plus) = match rest.as_str() {
            "s" => (true, false),
            "o" => (false, false),
            "s+" => (true, true),
            "o+" => (false, true),
            _ => return Err(bad()),
        };
        if plus {
            out.extend((b..a).map(|k| type_index(a, k, suited)));
        } else {
            out.insert(type_index(a, b, suited));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::parse_cards;

    #[test]
    fn table_layout_matches_index_math() {
        assert_eq!(HAND_TYPES.len(), 169);
        for (i, ht) in HAND_TYPES.iter().enumerate() {
            assert_eq!(type_index(ht.high, ht.low, ht.suited), i, "{}", ht.label());
        }
        assert_eq!(HAND_TYPES[12].label(), "AA");
        assert_eq!(HAND_TYPES[13].label(), "AKs");
        assert_eq!(HAND_TYPES[90].label(), "32s");
        assert_eq!(HAND_TYPES[91].label(), "AKo");
        assert_eq!(HAND_TYPES[168].label(), "32o");
        let total: u32 = HAND_TYPES.iter().map(HandType::combos).sum();
        assert_eq!(total, TOTAL_COMBOS);
    }

    #[test]
    fn concrete_holdings_map_back_to_their_type() {
        for (i, ht) in HAND_TYPES.iter().enumerate() {
            let mut n = 0;
            for [a, b] in ht.concrete() {
                assert_ne!(a, b);
                assert_eq!(hand_type_index(a, b), i);
                n += 1;
            }
            assert_eq!(n, ht.combos());
        }
    }

    #[test]
    fn representatives_follow_fixed_suits() {
        let aa = HAND_TYPES[type_index(12, 12, false)].representative();
        assert_eq!(aa.map(|c| c.to_string()), ["As".to_string(), "Ah".to_string()]);
        let kqo = HAND_TYPES[type_index(11, 10, false)].representative();
        assert_eq!(kqo.map(|c| c.to_string()), ["Ks".to_string(), "Qh".to_string()]);
    }

    #[test]
    fn runs_split_on_gaps() {
        assert_eq!(descending_runs(&[12, 11, 9, 8, 7, 3]), vec![&[12, 11][..], &[9, 8, 7][..], &[3][..]]);
        assert!(descending_runs(&[]).is_empty());
    }

    #[test]
    fn parses_plus_notation() {
        let set = parse_notation("QQ+, AJs+, KTo").unwrap();
        let labels: Vec<String> = set.iter().map(|&i| HAND_TYPES[i].label()).collect();
        assert_eq!(labels, vec!["QQ", "KK", "AA", "AKs", "AQs", "AJs", "KTo"]);
        assert!(parse_notation("AZs").is_err());
        assert!(parse_notation("KAs").is_err());
    }

    #[test]
    fn equity_breakdown_needs_a_board() {
        let t = RangeTracker::new(2);
        let hero = parse_cards("As Ah").unwrap();
        assert!(t.equity_breakdown(1, &[], [hero[0], hero[1]]).is_none());
        let board = parse_cards("Ad Kc 7h").unwrap();
        let b = t.equity_breakdown(1, &board, [hero[0], hero[1]]).unwrap();
        assert_eq!(b.win + b.tie + b.lose, b.total);
        // Full prior: every holding avoiding the five known cards, C(47, 2).
        assert_eq!(b.total, 1081);
        assert!(b.win > b.lose);
    }
}
