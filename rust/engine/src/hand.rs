use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Score weight of one category tier.
pub const CATEGORY_WEIGHT: u32 = 10_000_000;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    /// Ace-high straight flush. Shares the straight-flush score tier.
    RoyalFlush = 9,
}

const CATEGORY_NAMES: [&str; 10] = [
    "High Card",
    "One Pair",
    "Two Pair",
    "Three of a Kind",
    "Straight",
    "Flush",
    "Full House",
    "Four of a Kind",
    "Straight Flush",
    "Royal Flush",
];

impl Category {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Category> {
        use Category::*;
        const ALL: [Category; 10] = [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
            RoyalFlush,
        ];
        ALL.get(i).copied()
    }

    pub fn name(self) -> &'static str {
        CATEGORY_NAMES[self.index()]
    }
}

/// Result of ranking a 5..7 card set.
///
/// `score` totally orders hands: equal scores tie.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandEvaluation {
    pub score: u32,
    pub category: Category,
    pub best_cards: [Card; 5],
}

impl HandEvaluation {
    pub fn category_name(&self) -> &'static str {
        self.category.name()
    }
}

fn kicker_score(ks: &[u8]) -> u32 {
    ks.iter().fold(0u32, |acc, &k| acc * 13 + u32::from(k))
}

/// Ranks exactly five cards, returning the category and its score.
///
/// Scores are `tier * 10_000_000` plus a sub-score whose layout depends on
/// the category:
///
/// | category | sub-score |
/// |---|---|
/// | straight / straight flush | `high * 1000` (wheel high is 3) |
/// | quads | `quad * 1000 + kicker` |
/// | full house | `trips * 100 + pair` |
/// | trips | `trips * 10000 + ks(kickers)` |
/// | two pair | `hi * 10000 + lo * 100 + kicker` |
/// | one pair | `pair * 100000 + ks(kickers)` |
/// | flush / high card | `ks(all five)` |
///
/// where `ks` is base-13 positional encoding, highest kicker most significant.
pub fn evaluate5(cards: &[Card; 5]) -> (Category, u32) {
    let mut ranks = cards.map(Card::rank_index);
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let first_suit = cards[0].suit_index();
    let flush = cards.iter().all(|c| c.suit_index() == first_suit);
    let straight_high = straight_high(&ranks);

    let mut counts = [0u8; 13];
    for &r in &ranks {
        counts[r as usize] += 1;
    }
    // (count, rank) groups, largest group first, higher rank first within a size.
    let mut groups: Vec<(u8, u8)> = (0..13u8)
        .rev()
        .filter(|&r| counts[r as usize] > 0)
        .map(|r| (counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
    let singles: Vec<u8> = groups
        .iter()
        .filter(|g| g.0 == 1)
        .map(|g| g.1)
        .collect();

    let tier = |c: Category| (c as u32).min(8) * CATEGORY_WEIGHT;

    if let (true, Some(high)) = (flush, straight_high) {
        let cat = if ranks[0] == 12 && ranks[1] == 11 {
            Category::RoyalFlush
        } else {
            Category::StraightFlush
        };
        return (cat, tier(cat) + u32::from(high) * 1000);
    }
    match (groups[0].0, groups.get(1).map(|g| g.0)) {
        (4, _) => {
            let score = u32::from(groups[0].1) * 1000 + u32::from(groups[1].1);
            (Category::FourOfAKind, tier(Category::FourOfAKind) + score)
        }
        (3, Some(2)) => {
            let score = u32::from(groups[0].1) * 100 + u32::from(groups[1].1);
            (Category::FullHouse, tier(Category::FullHouse) + score)
        }
        _ if flush => (Category::Flush, tier(Category::Flush) + kicker_score(&ranks)),
        _ if straight_high.is_some() => {
            let high = u32::from(straight_high.unwrap_or_default());
            (Category::Straight, tier(Category::Straight) + high * 1000)
        }
        (3, _) => {
            let score = u32::from(groups[0].1) * 10_000 + kicker_score(&singles);
            (Category::ThreeOfAKind, tier(Category::ThreeOfAKind) + score)
        }
        (2, Some(2)) => {
            let score = u32::from(groups[0].1) * 10_000
                + u32::from(groups[1].1) * 100
                + u32::from(singles[0]);
            (Category::TwoPair, tier(Category::TwoPair) + score)
        }
        (2, _) => {
            let score = u32::from(groups[0].1) * 100_000 + kicker_score(&singles);
            (Category::OnePair, tier(Category::OnePair) + score)
        }
        _ => (Category::HighCard, kicker_score(&ranks)),
    }
}

// `ranks` sorted high to low.
fn straight_high(ranks: &[u8; 5]) -> Option<u8> {
    let distinct = ranks.windows(2).all(|w| w[0] != w[1]);
    if distinct && ranks[0] - ranks[4] == 4 {
        return Some(ranks[0]);
    }
    if *ranks == [12, 3, 2, 1, 0] {
        return Some(3);
    }
    None
}

/// Best five-card hand out of 5..=7 cards.
///
/// Returns `None` for fewer than five cards. Among equally scored subsets the
/// first one in combination order is kept.
pub fn evaluate_best(cards: &[Card]) -> Option<HandEvaluation> {
    if cards.len() < 5 {
        return None;
    }
    let mut best: Option<HandEvaluation> = None;
    for idx in Combinations::<5>::new(cards.len()) {
        let five = idx.map(|i| cards[i]);
        let (category, score) = evaluate5(&five);
        if best.map_or(true, |b| score > b.score) {
            best = Some(HandEvaluation {
                score,
                category,
                best_cards: five,
            });
        }
    }
    best
}

pub fn compare_hands(a: &HandEvaluation, b: &HandEvaluation) -> Ordering {
    a.score.cmp(&b.score)
}

/// Iterative lexicographic enumeration of all `K`-subsets of `0..n`.
///
/// ```rust
/// use holdem_engine::hand::Combinations;
///
/// assert_eq!(Combinations::<5>::new(7).count(), 21);
/// ```
#[derive(Debug, Clone)]
pub struct Combinations<const K: usize> {
    n: usize,
    idx: [usize; K],
    done: bool,
}

impl<const K: usize> Combinations<K> {
    pub fn new(n: usize) -> Self {
        let mut idx = [0usize; K];
        for (i, slot) in idx.iter_mut().enumerate() {
            *slot = i;
        }
        Self {
            n,
            idx,
            done: K > n,
        }
    }
}

impl<const K: usize> Iterator for Combinations<K> {
    type Item = [usize; K];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.idx;
        // Advance: find the rightmost index that can still move right.
        let mut i = K;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.idx[i] < self.n - K + i {
                self.idx[i] += 1;
                for j in i + 1..K {
                    self.idx[j] = self.idx[j - 1] + 1;
                }
                break;
            }
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn five(s: &str) -> [Card; 5] {
        let v = parse_cards(s).unwrap();
        [v[0], v[1], v[2], v[3], v[4]]
    }

    #[test]
    fn quads_encode_quad_and_kicker() {
        let (cat, score) = evaluate5(&five("As Ah Ad Ac 7s"));
        assert_eq!(cat, Category::FourOfAKind);
        assert_eq!(score, 70_000_000 + 12 * 1000 + 5);
    }

    #[test]
    fn wheel_straight_flush_has_high_three() {
        let (cat, score) = evaluate5(&five("2h 3h 4h 5h Ah"));
        assert_eq!(cat, Category::StraightFlush);
        assert_eq!(score, 80_003_000);
        let (cat, _) = evaluate5(&five("2h 3d 4h 5h Ah"));
        assert_eq!(cat, Category::Straight);
    }

    #[test]
    fn royal_is_distinct_category_same_tier() {
        let (cat, score) = evaluate5(&five("Ts Js Qs Ks As"));
        assert_eq!(cat, Category::RoyalFlush);
        assert_eq!(score, 80_012_000);
        assert_eq!(cat.name(), "Royal Flush");
    }

    #[test]
    fn grouped_categories_use_weighted_multipliers() {
        assert_eq!(
            evaluate5(&five("Kc Kd Ks 4h 4d")),
            (Category::FullHouse, 60_000_000 + 11 * 100 + 2)
        );
        assert_eq!(
            evaluate5(&five("9s 9h 5d 5c Ah")),
            (Category::TwoPair, 20_000_000 + 7 * 10_000 + 3 * 100 + 12)
        );
        assert_eq!(
            evaluate5(&five("7s 7h 7d Kc 2h")),
            (Category::ThreeOfAKind, 30_000_000 + 5 * 10_000 + 11 * 13)
        );
        assert_eq!(
            evaluate5(&five("Qs Qh 9d 6c 3h")),
            (
                Category::OnePair,
                10_000_000 + 10 * 100_000 + 7 * 169 + 4 * 13 + 1
            )
        );
    }

    #[test]
    fn high_card_and_flush_use_base_thirteen() {
        let ks = 12 * 13u32.pow(4) + 10 * 13u32.pow(3) + 7 * 169 + 5 * 13 + 2;
        assert_eq!(
            evaluate5(&five("As Qh 9d 7c 4h")),
            (Category::HighCard, ks)
        );
        assert_eq!(
            evaluate5(&five("As Qs 9s 7s 4s")),
            (Category::Flush, 50_000_000 + ks)
        );
    }

    #[test]
    fn fewer_than_five_cards_has_no_result() {
        let cards = parse_cards("As Ks Qs Js").unwrap();
        assert!(evaluate_best(&cards).is_none());
    }

    #[test]
    fn combinations_are_lexicographic() {
        let all: Vec<[usize; 2]> = Combinations::<2>::new(4).collect();
        assert_eq!(all, vec![[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]]);
        assert_eq!(Combinations::<5>::new(4).count(), 0);
        assert_eq!(Combinations::<5>::new(5).count(), 1);
    }
}
