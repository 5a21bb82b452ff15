//! Public/private split of a [`Game`] for replicating a table to remote seats.
//!
//! The authority serializes a [`TableSnapshot`] for everyone and sends each
//! human seat its own hole cards separately via [`private_cards`]. Replicas
//! rebuild their local view with [`Game::apply_snapshot`]; they display state
//! and never drive it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::action::{ActionRecord, Street};
use crate::cards::Card;
use crate::errors::GameError;
use crate::game::{Game, WinningHand};
use crate::hand::HandEvaluation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub num_players: usize,
    pub to_act: Option<usize>,
    pub bets: Vec<u32>,
    pub pot: u32,
    pub chips: Vec<u32>,
    pub chips_start: Vec<u32>,
    pub folded: Vec<bool>,
    pub eliminated: Vec<bool>,
    pub street: Street,
    pub board: Vec<Card>,
    pub hands_played: u32,
    pub game_over: bool,
    pub bust: bool,
    pub tour_win: bool,
    pub winner: Option<usize>,
    pub winners: Vec<usize>,
    pub winning_hand: Option<WinningHand>,
    pub dealer_seat: usize,
    pub sb_seat: usize,
    pub bb_seat: usize,
    pub bet_level: u32,
    pub raise_count: u32,
    pub last_action: Vec<String>,
    pub eval_results: BTreeMap<usize, HandEvaluation>,
    /// Hole cards of seats shown down. Everyone else's stay private.
    pub revealed_hands: BTreeMap<usize, [Card; 2]>,
    pub human_seats: Vec<usize>,
    pub action_history: Vec<ActionRecord>,
}

impl TableSnapshot {
    pub fn from_game(game: &Game, human_seats: &[usize]) -> Self {
        let revealed_hands = game
            .eval_results
            .keys()
            .filter_map(|&seat| game.hand(seat).map(|h| (seat, h)))
            .collect();
        Self {
            num_players: game.num_players(),
            to_act: game.to_act,
            bets: game.bets.clone(),
            pot: game.pot,
            chips: game.chips.clone(),
            chips_start: game.chips_start.clone(),
            folded: game.folded.clone(),
            eliminated: game.eliminated.clone(),
            street: game.street,
            board: game.board.clone(),
            hands_played: game.hands_played,
            game_over: game.game_over,
            bust: game.bust,
            tour_win: game.tour_win,
            winner: game.winner,
            winners: game.winners.clone(),
            winning_hand: game.winning_hand,
            dealer_seat: game.dealer_seat,
            sb_seat: game.sb_seat,
            bb_seat: game.bb_seat,
            bet_level: game.bet_level(),
            raise_count: game.raise_count,
            last_action: game.last_action.clone(),
            eval_results: game.eval_results.clone(),
            revealed_hands,
            human_seats: human_seats.to_vec(),
            action_history: game.action_history.clone(),
        }
    }
}

/// Hole cards for each human seat that currently holds cards.
pub fn private_cards(game: &Game, human_seats: &[usize]) -> BTreeMap<usize, [Card; 2]> {
    human_seats
        .iter()
        .filter_map(|&seat| game.hand(seat).map(|h| (seat, h)))
        .collect()
}

impl Game {
    /// Overwrites this replica with `snapshot`.
    ///
    /// `local_private` is the local seat's hole cards from the private
    /// channel, if they have arrived. Without them, cards already known for
    /// `local_seat` are kept unless the snapshot belongs to a new hand.
    /// Pending-action bookkeeping is cleared; a replica never applies actions.
    ///
    /// Returns `true` when the snapshot starts a new hand.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfig`] when the snapshot's table size or vector
    /// lengths do not match this game.
    pub fn apply_snapshot(
        &mut self,
        snapshot: &TableSnapshot,
        local_seat: Option<usize>,
        local_private: Option<[Card; 2]>,
    ) -> Result<bool, GameError> {
        let n = self.num_players();
        let lens = [
            snapshot.bets.len(),
            snapshot.chips.len(),
            snapshot.folded.len(),
            snapshot.eliminated.len(),
        ];
        if snapshot.num_players != n || lens.iter().any(|&l| l != n) {
            return Err(GameError::InvalidConfig(format!(
                "snapshot for {} seats applied to a {n}-seat table",
                snapshot.num_players
            )));
        }

        let new_hand = snapshot.hands_played != self.hands_played;
        let kept = match (local_seat, new_hand) {
            (Some(seat), false) => self.hand(seat),
            _ => None,
        };

        self.to_act = snapshot.to_act;
        self.bets = snapshot.bets.clone();
        self.pot = snapshot.pot;
        self.chips = snapshot.chips.clone();
        if snapshot.chips_start.len() == n {
            self.chips_start = snapshot.chips_start.clone();
        }
        self.folded = snapshot.folded.clone();
        self.eliminated = snapshot.eliminated.clone();
        self.street = snapshot.street;
        self.board = snapshot.board.clone();
        self.hands_played = snapshot.hands_played;
        self.game_over = snapshot.game_over;
        self.bust = snapshot.bust;
        self.tour_win = snapshot.tour_win;
        self.winner = snapshot.winner;
        self.winners = snapshot.winners.clone();
        self.winning_hand = snapshot.winning_hand;
        self.dealer_seat = snapshot.dealer_seat;
        self.sb_seat = snapshot.sb_seat;
        self.bb_seat = snapshot.bb_seat;
        self.config.bet_level = snapshot.bet_level;
        self.raise_count = snapshot.raise_count;
        if snapshot.last_action.len() == n {
            self.last_action = snapshot.last_action.clone();
        }
        self.eval_results = snapshot.eval_results.clone();
        self.action_history = snapshot.action_history.clone();
        self.pending.clear();

        self.hands = vec![None; n];
        for (&seat, &cards) in &snapshot.revealed_hands {
            if seat < n {
                self.hands[seat] = Some(cards);
            }
        }
        if let Some(seat) = local_seat.filter(|&s| s < n) {
            if let Some(cards) = local_private.or(kept) {
                self.hands[seat] = Some(cards);
            }
        }
        Ok(new_hand)
    }

    /// Stores hole cards delivered on the private channel.
    pub fn receive_private_cards(&mut self, seat: usize, cards: [Card; 2]) {
        if let Some(slot) = self.hands.get_mut(seat) {
            *slot = Some(cards);
        }
    }
}
