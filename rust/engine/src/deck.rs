use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::DeckError;

/// An ordered 52-card deck with a dealing cursor and a burn list.
///
/// The deck does not own a random source; the owning [`crate::game::Game`]
/// passes its RNG in so a seeded session reproduces every shuffle.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    burned: Vec<Card>,
}

impl Deck {
    /// Unshuffled deck in index order (2s, 2h, 2d, 2c, 3s, ...).
    pub fn ordered() -> Self {
        Self {
            cards: full_deck(),
            position: 0,
            burned: Vec::new(),
        }
    }

    /// Fresh deck shuffled with the caller's RNG.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::ordered();
        deck.shuffle(rng);
        deck
    }

    pub fn new_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        Self::new(&mut rng)
    }

    /// Fisher–Yates over the whole card list; resets the cursor.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.position = 0;
    }

    /// Deals `n` cards. Nothing is consumed when fewer than `n` remain.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        let remaining = self.remaining_count();
        if n > remaining {
            return Err(DeckError::Exhausted {
                requested: n,
                remaining,
            });
        }
        let dealt = self.cards[self.position..self.position + n].to_vec();
        self.position += n;
        Ok(dealt)
    }

    pub fn deal_card(&mut self) -> Result<Card, DeckError> {
        let card = *self
            .cards
            .get(self.position)
            .ok_or(DeckError::Exhausted {
                requested: 1,
                remaining: 0,
            })?;
        self.position += 1;
        Ok(card)
    }

    pub fn burn(&mut self) -> Result<Card, DeckError> {
        let card = self.deal_card()?;
        self.burned.push(card);
        Ok(card)
    }

    pub fn burned(&self) -> &[Card] {
        &self.burned
    }

    /// Cards not yet dealt, in deal order.
    pub fn remaining(&self) -> &[Card] {
        &self.cards[self.position..]
    }

    pub fn remaining_count(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    /// Strips the given cards out of the deck and rewinds the cursor.
    pub fn remove_cards(&mut self, to_remove: &[Card]) {
        self.cards.retain(|c| !to_remove.contains(c));
        self.position = 0;
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
