use std::collections::{BTreeMap, BTreeSet};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::action::{Action, ActionKind, ActionRecord, Street};
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{evaluate_best, HandEvaluation};
use crate::rules::{self, MAX_SEATS, MIN_SEATS};

/// Table parameters fixed for a whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub num_players: usize,
    /// Seat under human control, `None` for an all-AI or observer table.
    pub player_seat: Option<usize>,
    pub starting_chips: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub small_bet: u32,
    pub big_bet: u32,
    /// Blind escalation: every stake is multiplied by `1 << bet_level`.
    pub bet_level: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            num_players: MAX_SEATS,
            player_seat: Some(0),
            starting_chips: rules::STARTING_CHIPS,
            small_blind: rules::SMALL_BLIND,
            big_blind: rules::BIG_BLIND,
            small_bet: rules::SMALL_BET,
            big_bet: rules::BIG_BET,
            bet_level: 0,
        }
    }
}

impl TableConfig {
    pub fn with_players(num_players: usize) -> Self {
        Self {
            num_players,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.num_players) {
            return Err(GameError::InvalidConfig(format!(
                "num_players must be {MIN_SEATS}..={MAX_SEATS}, got {}",
                self.num_players
            )));
        }
        if let Some(seat) = self.player_seat {
            if seat >= self.num_players {
                return Err(GameError::InvalidConfig(format!(
                    "player_seat {seat} outside table of {}",
                    self.num_players
                )));
            }
        }
        if self.starting_chips == 0 {
            return Err(GameError::InvalidConfig("starting_chips must be positive".into()));
        }
        if self.small_blind == 0 || self.big_blind < self.small_blind {
            return Err(GameError::InvalidConfig(
                "blinds must satisfy 0 < small_blind <= big_blind".into(),
            ));
        }
        if self.small_bet == 0 || self.big_bet == 0 {
            return Err(GameError::InvalidConfig("bet sizes must be positive".into()));
        }
        if self.bet_level > 16 {
            return Err(GameError::InvalidConfig(format!(
                "bet_level {} too large",
                self.bet_level
            )));
        }
        Ok(())
    }

    pub fn multiplier(&self) -> u32 {
        1u32 << self.bet_level
    }
}

/// How the last hand was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WinningHand {
    /// Everyone else folded.
    Uncontested,
    Showdown(HandEvaluation),
}

impl WinningHand {
    pub fn category_name(&self) -> &'static str {
        match self {
            WinningHand::Uncontested => "Fold Win",
            WinningHand::Showdown(e) => e.category_name(),
        }
    }

    pub fn best_cards(&self) -> &[Card] {
        match self {
            WinningHand::Uncontested => &[],
            WinningHand::Showdown(e) => &e.best_cards,
        }
    }
}

/// Authoritative state of a limit hold'em session at 2..=9 seats.
///
/// Chips, elimination and the dealer button persist across hands; everything
/// else is reset by [`Game::new_hand`]. Eliminated seats are always folded.
///
/// Mutation is single-threaded: callers funnel every action through
/// [`Game::apply_action`] one at a time.
#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) config: TableConfig,
    pub(crate) rng: ChaCha20Rng,
    pub(crate) deck: Deck,
    pub(crate) dealer_seat: usize,
    pub(crate) sb_seat: usize,
    pub(crate) bb_seat: usize,
    pub(crate) chips: Vec<u32>,
    pub(crate) chips_start: Vec<u32>,
    pub(crate) eliminated: Vec<bool>,
    pub(crate) hands: Vec<Option<[Card; 2]>>,
    pub(crate) board: Vec<Card>,
    pub(crate) bets: Vec<u32>,
    pub(crate) pot: u32,
    pub(crate) street: Street,
    pub(crate) folded: Vec<bool>,
    pub(crate) to_act: Option<usize>,
    pub(crate) pending: BTreeSet<usize>,
    pub(crate) raise_count: u32,
    pub(crate) action_history: Vec<ActionRecord>,
    pub(crate) last_action: Vec<String>,
    pub(crate) winner: Option<usize>,
    pub(crate) winners: Vec<usize>,
    pub(crate) winning_hand: Option<WinningHand>,
    pub(crate) eval_results: BTreeMap<usize, HandEvaluation>,
    pub(crate) game_over: bool,
    pub(crate) bust: bool,
    pub(crate) tour_win: bool,
    pub(crate) hands_played: u32,
}

impl Game {
    /// Starts a session with an OS-seeded shuffle and deals the first hand.
    pub fn new(config: TableConfig) -> Result<Self, GameError> {
        Self::with_seed(config, rand::random())
    }

    /// Starts a reproducible session: the same seed and action sequence
    /// produce the same cards.
    pub fn with_seed(config: TableConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        let n = config.num_players;
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        // First new_hand advances the button onto a random seat.
        let first_button = rng.random_range(0..n);
        let deck = Deck::ordered();
        let mut game = Self {
            dealer_seat: (first_button + n - 1) % n,
            sb_seat: 0,
            bb_seat: 0,
            chips: vec![config.starting_chips; n],
            chips_start: vec![config.starting_chips; n],
            eliminated: vec![false; n],
            hands: vec![None; n],
            board: Vec::new(),
            bets: vec![0; n],
            pot: 0,
            street: Street::Preflop,
            folded: vec![false; n],
            to_act: None,
            pending: BTreeSet::new(),
            raise_count: 0,
            action_history: Vec::new(),
            last_action: vec![String::new(); n],
            winner: None,
            winners: Vec::new(),
            winning_hand: None,
            eval_results: BTreeMap::new(),
            game_over: false,
            bust: false,
            tour_win: false,
            hands_played: 0,
            config,
            rng,
            deck,
        };
        game.new_hand();
        Ok(game)
    }

    /// Eliminates empty stacks, moves the button, posts blinds and deals.
    ///
    /// If the human seat is eliminated (`bust`) or fewer than two seats remain
    /// (`tour_win`), the session ends instead and the previous hand's table
    /// state is left in place.
    ///
    /// Calling this while a hand is still live abandons that hand: every
    /// seat gets back what it put in, so no chips leave the table.
    ///
    /// # Panics
    ///
    /// Panics if the deck cannot cover the hole cards, which cannot happen at
    /// nine seats or fewer.
    pub fn new_hand(&mut self) {
        let n = self.num_players();
        if !self.game_over && self.pot > 0 {
            // chips_start is taken before blinds, so it undoes every contribution.
            debug!(hand = self.hands_played, pot = self.pot, "live hand abandoned");
            self.chips = self.chips_start.clone();
            self.pot = 0;
            self.bets = vec![0; n];
        }
        for i in 0..n {
            if self.chips[i] == 0 {
                self.eliminated[i] = true;
            }
        }
        let alive_count = self.eliminated.iter().filter(|e| !**e).count();
        let bust = self.config.player_seat.is_some_and(|s| self.eliminated[s]);
        if bust || alive_count < 2 {
            self.game_over = true;
            self.bust = bust;
            self.tour_win = !bust && alive_count < 2;
            self.to_act = None;
            self.pending.clear();
            info!(
                hands_played = self.hands_played,
                bust = self.bust,
                tour_win = self.tour_win,
                "session over"
            );
            return;
        }

        self.deck = Deck::new(&mut self.rng);
        self.board.clear();
        self.hands = vec![None; n];
        self.pot = 0;
        self.street = Street::Preflop;
        self.bets = vec![0; n];
        self.action_history.clear();
        self.last_action = vec![String::new(); n];
        self.folded = self.eliminated.clone();
        self.winner = None;
        self.winners.clear();
        self.winning_hand = None;
        self.eval_results.clear();
        self.game_over = false;
        self.bust = false;
        self.tour_win = false;

        loop {
            self.dealer_seat = (self.dealer_seat + 1) % n;
            if !self.eliminated[self.dealer_seat] {
                break;
            }
        }
        if alive_count == 2 {
            self.sb_seat = self.dealer_seat;
            self.bb_seat = self.next_alive(self.dealer_seat);
        } else {
            self.sb_seat = self.next_alive(self.dealer_seat);
            self.bb_seat = self.next_alive(self.sb_seat);
        }
        self.chips_start = self.chips.clone();

        let mult = self.config.multiplier();
        self.post_blind(self.sb_seat, self.config.small_blind * mult);
        self.post_blind(self.bb_seat, self.config.big_blind * mult);
        self.raise_count = 1;

        for seat in 0..n {
            if !self.eliminated[seat] {
                let cards = self.draw(2);
                self.hands[seat] = Some([cards[0], cards[1]]);
            }
        }

        let utg = if alive_count == 2 {
            self.sb_seat
        } else {
            self.next_alive(self.bb_seat)
        };
        self.to_act = Some(utg);
        self.pending = self.active_players().into_iter().collect();
        self.hands_played += 1;
        debug!(
            hand = self.hands_played,
            dealer = self.dealer_seat,
            sb = self.sb_seat,
            bb = self.bb_seat,
            pot = self.pot,
            "hand started"
        );
    }

    /// Applies `action` for `seat`.
    ///
    /// Only the kind of `action` is checked against [`Game::legal_actions`];
    /// the chips moved are recomputed from the table. A rejected action
    /// returns an error and changes nothing.
    ///
    /// # Errors
    ///
    /// - [`GameError::HandComplete`] once the hand (or session) is over
    /// - [`GameError::NoSeatToAct`] if nobody is waiting to act
    /// - [`GameError::NotPlayersTurn`] if `seat` is not the seat to act
    /// - [`GameError::IllegalAction`] if the kind is not on the menu
    ///
    /// # Panics
    ///
    /// Panics if dealing the next street exhausts the deck.
    pub fn apply_action(&mut self, seat: usize, action: Action) -> Result<(), GameError> {
        if self.game_over {
            return Err(GameError::HandComplete);
        }
        let expected = self.to_act.ok_or(GameError::NoSeatToAct)?;
        if seat != expected {
            return Err(GameError::NotPlayersTurn {
                expected,
                actual: seat,
            });
        }
        let kind = action.kind();
        if !rules::is_legal(&self.legal_actions(), kind) {
            return Err(GameError::IllegalAction { seat, action: kind });
        }

        let to_call = self.call_amount_for(seat);
        let increment = match kind {
            ActionKind::Fold => {
                self.folded[seat] = true;
                self.pending.remove(&seat);
                0
            }
            ActionKind::Check => {
                self.pending.remove(&seat);
                0
            }
            ActionKind::Call => {
                let amount = to_call.min(self.chips[seat]);
                self.commit(seat, amount);
                self.pending.remove(&seat);
                amount
            }
            ActionKind::Bet | ActionKind::Raise => {
                let size = self.bet_size();
                let total = (to_call + size).min(self.chips[seat]);
                self.commit(seat, total);
                self.raise_count += 1;
                self.pending = self
                    .active_players()
                    .into_iter()
                    .filter(|&s| s != seat)
                    .collect();
                size
            }
        };

        let record = ActionRecord::new(seat, self.street, kind, increment, self.bets[seat]);
        trace!(seat, street = self.street.name(), label = %record.label, "action");
        self.last_action[seat] = record.label.clone();
        self.action_history.push(record);

        let active = self.active_players();
        if let [only] = active[..] {
            self.chips[only] += self.pot;
            self.winner = Some(only);
            self.winners = vec![only];
            self.winning_hand = Some(WinningHand::Uncontested);
            self.game_over = true;
            self.to_act = None;
            self.pending.clear();
            debug!(winner = only, pot = self.pot, "hand won uncontested");
            return Ok(());
        }

        if self.pending.is_empty() {
            self.advance_street();
        } else {
            self.to_act = self.next_pending(seat);
        }
        Ok(())
    }

    fn advance_street(&mut self) {
        self.bets.iter_mut().for_each(|b| *b = 0);
        self.raise_count = 0;
        self.last_action.iter_mut().for_each(String::clear);
        self.street = self.street.next();

        if self.street == Street::Showdown {
            self.showdown();
            return;
        }

        if let Err(e) = self.deck.burn() {
            panic!("deck invariant violated: {e}");
        }
        let count = if self.street == Street::Flop { 3 } else { 1 };
        let cards = self.draw(count);
        self.board.extend(cards);

        self.pending = self.active_players().into_iter().collect();
        self.to_act = self.next_active(self.dealer_seat);
        debug!(street = self.street.name(), board = ?self.board, "street dealt");
    }

    fn showdown(&mut self) {
        self.street = Street::Showdown;
        self.game_over = true;
        self.to_act = None;
        self.pending.clear();

        self.eval_results.clear();
        for seat in self.active_players() {
            let Some(hole) = self.hands[seat] else {
                continue;
            };
            let mut cards = hole.to_vec();
            cards.extend_from_slice(&self.board);
            if let Some(eval) = evaluate_best(&cards) {
                self.eval_results.insert(seat, eval);
            }
        }

        let scores: Vec<(usize, u32)> = self
            .eval_results
            .iter()
            .map(|(&seat, e)| (seat, e.score))
            .collect();
        let payouts = rules::settle_showdown(self.pot, &scores);
        for &(seat, amount) in &payouts {
            self.chips[seat] += amount;
        }
        self.winners = payouts.iter().map(|&(seat, _)| seat).collect();
        self.winner = match self.winners[..] {
            [only] => Some(only),
            _ => None,
        };
        self.winning_hand = self
            .winners
            .first()
            .and_then(|w| self.eval_results.get(w))
            .map(|e| WinningHand::Showdown(*e));
        debug!(winners = ?self.winners, pot = self.pot, "showdown settled");
    }

    fn post_blind(&mut self, seat: usize, amount: u32) {
        let actual = amount.min(self.chips[seat]);
        self.commit(seat, actual);
    }

    fn commit(&mut self, seat: usize, amount: u32) {
        self.chips[seat] -= amount;
        self.bets[seat] += amount;
        self.pot += amount;
    }

    fn draw(&mut self, n: usize) -> Vec<Card> {
        match self.deck.deal(n) {
            Ok(cards) => cards,
            Err(e) => panic!("deck invariant violated: {e}"),
        }
    }

    fn next_alive(&self, from: usize) -> usize {
        let n = self.num_players();
        (1..=n)
            .map(|i| (from + i) % n)
            .find(|&s| !self.eliminated[s])
            .unwrap_or(from)
    }

    fn next_active(&self, from: usize) -> Option<usize> {
        let n = self.num_players();
        (1..=n).map(|i| (from + i) % n).find(|&s| !self.folded[s])
    }

    fn next_pending(&self, from: usize) -> Option<usize> {
        let n = self.num_players();
        (1..=n)
            .map(|i| (from + i) % n)
            .find(|s| self.pending.contains(s))
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Action menu for the seat to act; empty when nobody is to act.
    pub fn legal_actions(&self) -> Vec<Action> {
        match self.to_act {
            Some(seat) if !self.game_over => rules::legal_actions(
                self.chips[seat],
                self.call_amount_for(seat),
                self.bet_size(),
                self.raise_count,
            ),
            _ => Vec::new(),
        }
    }

    /// Chips the seat to act must add to call; 0 when nobody is to act.
    pub fn call_amount(&self) -> u32 {
        self.to_act.map_or(0, |s| self.call_amount_for(s))
    }

    pub fn call_amount_for(&self, seat: usize) -> u32 {
        self.max_bet().saturating_sub(self.bets[seat])
    }

    pub fn max_bet(&self) -> u32 {
        self.bets.iter().copied().max().unwrap_or(0)
    }

    /// The street's fixed increment scaled by the bet level.
    pub fn bet_size(&self) -> u32 {
        let base = if self.street.is_big_bet() {
            self.config.big_bet
        } else {
            self.config.small_bet
        };
        base * self.config.multiplier()
    }

    pub fn street_name(&self) -> &'static str {
        self.street.name()
    }

    pub fn is_player_turn(&self, seat: usize) -> bool {
        !self.game_over && self.to_act == Some(seat)
    }

    /// Seats that have not folded this hand.
    pub fn active_players(&self) -> Vec<usize> {
        (0..self.num_players()).filter(|&s| !self.folded[s]).collect()
    }

    /// Seats not eliminated from the session.
    pub fn alive_seats(&self) -> Vec<usize> {
        (0..self.num_players())
            .filter(|&s| !self.eliminated[s])
            .collect()
    }

    pub fn position_name(&self, seat: usize) -> &'static str {
        rules::position_name(seat, self.dealer_seat, &self.alive_seats())
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn num_players(&self) -> usize {
        self.config.num_players
    }

    pub fn player_seat(&self) -> Option<usize> {
        self.config.player_seat
    }

    pub fn bet_level(&self) -> u32 {
        self.config.bet_level
    }

    pub fn dealer_seat(&self) -> usize {
        self.dealer_seat
    }

    pub fn sb_seat(&self) -> usize {
        self.sb_seat
    }

    pub fn bb_seat(&self) -> usize {
        self.bb_seat
    }

    pub fn chips(&self) -> &[u32] {
        &self.chips
    }

    /// Stacks before this hand's blinds.
    pub fn chips_start(&self) -> &[u32] {
        &self.chips_start
    }

    pub fn eliminated(&self) -> &[bool] {
        &self.eliminated
    }

    pub fn hand(&self, seat: usize) -> Option<[Card; 2]> {
        self.hands.get(seat).copied().flatten()
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn bets(&self) -> &[u32] {
        &self.bets
    }

    /// Total chips put in this hand. Kept after payout for display.
    pub fn pot(&self) -> u32 {
        self.pot
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn folded(&self) -> &[bool] {
        &self.folded
    }

    pub fn to_act(&self) -> Option<usize> {
        self.to_act
    }

    pub fn pending(&self) -> &BTreeSet<usize> {
        &self.pending
    }

    pub fn raise_count(&self) -> u32 {
        self.raise_count
    }

    pub fn action_history(&self) -> &[ActionRecord] {
        &self.action_history
    }

    /// Display label of each seat's latest action this street.
    pub fn last_action(&self) -> &[String] {
        &self.last_action
    }

    /// Sole winner, `None` on a split pot or while the hand is running.
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn winners(&self) -> &[usize] {
        &self.winners
    }

    pub fn winning_hand(&self) -> Option<&WinningHand> {
        self.winning_hand.as_ref()
    }

    pub fn eval_results(&self) -> &BTreeMap<usize, HandEvaluation> {
        &self.eval_results
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_bust(&self) -> bool {
        self.bust
    }

    pub fn is_tour_win(&self) -> bool {
        self.tour_win
    }

    /// True once the session itself has ended, not just the current hand.
    pub fn is_session_over(&self) -> bool {
        self.bust || self.tour_win
    }

    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }
}
