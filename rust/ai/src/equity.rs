//! Monte Carlo showdown equity and outs.
//!
//! Trials are split into fixed-size batches that run in parallel. Each batch
//! owns a `ChaCha8Rng` seeded from the caller's RNG, and batch results are
//! summed in batch order, so a seeded caller gets a reproducible estimate.

use holdem_engine::cards::{full_deck, mask_of, Card};
use holdem_engine::game::Game;
use holdem_engine::hand::{compare_hands, evaluate_best, HandEvaluation};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

use crate::range::RangeTracker;

const BATCH: u32 = 100;

/// What the hero knows: hole cards, the board, and who is still in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spot {
    pub hero: [Card; 2],
    pub board: Vec<Card>,
    pub opponents: Vec<usize>,
}

impl Spot {
    /// Builds the spot for `hero_seat`; `None` if that seat holds no cards.
    pub fn from_game(game: &Game, hero_seat: usize) -> Option<Self> {
        let hero = game.hand(hero_seat)?;
        let opponents = game
            .active_players()
            .into_iter()
            .filter(|&s| s != hero_seat)
            .collect();
        Some(Self {
            hero,
            board: game.board().to_vec(),
            opponents,
        })
    }

    fn known_mask(&self) -> u64 {
        mask_of(&self.hero) | mask_of(&self.board)
    }

    fn unknown_cards(&self) -> Vec<Card> {
        let known = self.known_mask();
        full_deck()
            .into_iter()
            .filter(|c| known & c.mask() == 0)
            .collect()
    }

    fn needed_board(&self) -> usize {
        5usize.saturating_sub(self.board.len())
    }
}

/// Share of the pot the hero takes in one dealt-out trial: 1 for a clean
/// win, `1 / tie_count` when tied for best, 0 when beaten.
fn credit(hero: &HandEvaluation, opponents: impl Iterator<Item = HandEvaluation>) -> f64 {
    let mut tie_count = 1u32;
    for opp in opponents {
        match compare_hands(hero, &opp) {
            Ordering::Less => return 0.0,
            Ordering::Equal => tie_count += 1,
            Ordering::Greater => {}
        }
    }
    1.0 / f64::from(tie_count)
}

fn seven(hole: &[Card], board: &[Card]) -> Option<HandEvaluation> {
    let mut cards = Vec::with_capacity(7);
    cards.extend_from_slice(hole);
    cards.extend_from_slice(board);
    evaluate_best(&cards)
}

// Runs `trials` in parallel batches and returns the summed credit.
fn run_batched<R, F>(trials: u32, rng: &mut R, batch: F) -> f64
where
    R: Rng + ?Sized,
    F: Fn(u32, &mut ChaCha8Rng) -> f64 + Sync,
{
    let batches = trials.div_ceil(BATCH);
    let seeds: Vec<u64> = (0..batches).map(|_| rng.random()).collect();
    let totals: Vec<f64> = seeds
        .into_par_iter()
        .enumerate()
        .map(|(i, seed)| {
            let n = BATCH.min(trials - i as u32 * BATCH);
            let mut batch_rng = ChaCha8Rng::seed_from_u64(seed);
            batch(n, &mut batch_rng)
        })
        .collect();
    totals.into_iter().sum()
}

/// Equity against opponents holding uniformly random cards.
///
/// Returns 0.0 for zero trials. A hero with no live opponents wins every
/// trial.
pub fn estimate_equity<R: Rng + ?Sized>(spot: &Spot, trials: u32, rng: &mut R) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    let unknown = spot.unknown_cards();
    let needed = spot.needed_board();
    let draw = needed + 2 * spot.opponents.len();
    if draw > unknown.len() {
        return 0.0;
    }

    let wins = run_batched(trials, rng, |n, batch_rng| {
        let mut pool = unknown.clone();
        let mut board = Vec::with_capacity(5);
        let mut sum = 0.0;
        for _ in 0..n {
            let (dealt, _) = pool.partial_shuffle(batch_rng, draw);
            board.clear();
            board.extend_from_slice(&spot.board);
            board.extend_from_slice(&dealt[..needed]);
            let Some(hero) = seven(&spot.hero, &board) else {
                continue;
            };
            let holes = dealt[needed..].chunks_exact(2);
            sum += credit(&hero, holes.filter_map(|h| seven(h, &board)));
        }
        sum
    });
    let equity = wins / f64::from(trials);
    debug!(trials, opponents = spot.opponents.len(), equity, "uniform equity");
    equity
}

/// Equity with each opponent's holding drawn from its tracked range.
///
/// An opponent whose range yields no live holding (collapsed, or blocked by
/// cards already dealt this trial) gets two random unseen cards instead.
pub fn estimate_equity_vs_ranges<R: Rng + ?Sized>(
    spot: &Spot,
    tracker: &RangeTracker,
    trials: u32,
    rng: &mut R,
) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    let needed = spot.needed_board();
    let base_mask = spot.known_mask();

    let wins = run_batched(trials, rng, |n, batch_rng| {
        let mut sum = 0.0;
        let mut holes: Vec<[Card; 2]> = Vec::with_capacity(spot.opponents.len());
        for _ in 0..n {
            let mut excluded = base_mask;
            holes.clear();
            let mut valid = true;
            for &opp in &spot.opponents {
                let hole = match tracker.sample_hand(opp, excluded, batch_rng) {
                    Some(h) => h,
                    None => match random_hole(excluded, batch_rng) {
                        Some(h) => h,
                        None => {
                            valid = false;
                            break;
                        }
                    },
                };
                excluded |= mask_of(&hole);
                holes.push(hole);
            }
            if !valid {
                continue;
            }
            let mut pool: Vec<Card> = full_deck()
                .into_iter()
                .filter(|c| excluded & c.mask() == 0)
                .collect();
            if pool.len() < needed {
                continue;
            }
            let (runout, _) = pool.partial_shuffle(batch_rng, needed);
            let mut board = spot.board.clone();
            board.extend_from_slice(runout);
            let Some(hero) = seven(&spot.hero, &board) else {
                continue;
            };
            sum += credit(&hero, holes.iter().filter_map(|h| seven(h, &board)));
        }
        sum
    });
    let equity = wins / f64::from(trials);
    debug!(trials, opponents = spot.opponents.len(), equity, "range-conditioned equity");
    equity
}

fn random_hole<R: Rng + ?Sized>(excluded: u64, rng: &mut R) -> Option<[Card; 2]> {
    let mut pool: Vec<Card> = full_deck()
        .into_iter()
        .filter(|c| excluded & c.mask() == 0)
        .collect();
    if pool.len() < 2 {
        return None;
    }
    let (two, _) = pool.partial_shuffle(rng, 2);
    Some([two[0], two[1]])
}

/// Unseen cards that would lift the hero's made-hand category if dealt next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outs {
    pub count: usize,
    pub cards: Vec<Card>,
    pub description: String,
}

impl Outs {
    fn none() -> Self {
        Self {
            count: 0,
            cards: Vec::new(),
            description: String::new(),
        }
    }
}

/// Outs on the flop or turn. Any other board size returns an empty result.
pub fn calc_outs(hero: [Card; 2], board: &[Card]) -> Outs {
    if !(3..=4).contains(&board.len()) {
        return Outs::none();
    }
    let Some(current) = seven(&hero, board) else {
        return Outs::none();
    };
    let current = current.category.index();
    let known = mask_of(&hero) | mask_of(board);
    let mut next = board.to_vec();
    let cards: Vec<Card> = full_deck()
        .into_iter()
        .filter(|c| known & c.mask() == 0)
        .filter(|&c| {
            next.truncate(board.len());
            next.push(c);
            seven(&hero, &next).is_some_and(|e| e.category.index() > current)
        })
        .collect();
    let description = describe_outs(hero, board, &cards);
    Outs {
        count: cards.len(),
        cards,
        description,
    }
}

/// Splits flush outs from the rest when the hero holds a four-flush.
pub fn describe_outs(hero: [Card; 2], board: &[Card], outs: &[Card]) -> String {
    if outs.is_empty() {
        return "No clean outs".to_string();
    }
    let mut suit_counts = [0usize; 4];
    for c in hero.iter().chain(board) {
        suit_counts[c.suit_index() as usize] += 1;
    }
    let flush = suit_counts
        .iter()
        .position(|&n| n == 4)
        .map(|suit| outs.iter().filter(|c| c.suit_index() as usize == suit).count())
        .filter(|&n| n > 0);
    let plural = if outs.len() == 1 { "" } else { "s" };
    match flush {
        Some(n) if n < outs.len() => {
            format!("{n} flush + {} other out{plural}", outs.len() - n)
        }
        Some(n) => format!("{n} flush out{plural}"),
        None => format!("{} improve out{plural}", outs.len()),
    }
}
