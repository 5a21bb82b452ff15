use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::action::{ActionKind, ActionRecord, Street};
use crate::cards::{format_cards, Card};
use crate::game::{Game, WinningHand};
use crate::hand::HandEvaluation;

/// Complete record of a finished hand, detached from the live [`Game`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Identifier of the form `YYYYMMDD-NNNNNN`.
    pub hand_id: String,
    pub hand_number: u32,
    /// RFC3339 timestamp.
    pub ts: String,
    pub num_players: usize,
    pub hero_seat: Option<usize>,
    pub dealer_seat: usize,
    pub sb_seat: usize,
    pub bb_seat: usize,
    /// Blinds in effect for this hand (bet level applied).
    pub small_blind: u32,
    pub big_blind: u32,
    pub chips_start: Vec<u32>,
    pub chips_end: Vec<u32>,
    pub hands: Vec<Option<[Card; 2]>>,
    pub board: Vec<Card>,
    pub actions: Vec<ActionRecord>,
    pub winners: Vec<usize>,
    pub winning_hand: Option<WinningHand>,
    pub pot: u32,
    pub folded: Vec<bool>,
    pub eliminated: Vec<bool>,
    pub showdown: bool,
    #[serde(default)]
    pub eval_results: BTreeMap<usize, HandEvaluation>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

impl HandRecord {
    /// Captures the hand just finished.
    ///
    /// `None` while the hand is running, when the "hand" is really the end
    /// of the session (bust or tournament win), or when nothing was acted.
    pub fn from_game(game: &Game) -> Option<Self> {
        if !game.is_game_over() || game.is_session_over() || game.action_history().is_empty() {
            return None;
        }
        let now = Utc::now();
        let mult = game.config().multiplier();
        Some(Self {
            hand_id: format_hand_id(&now.format("%Y%m%d").to_string(), game.hands_played()),
            hand_number: game.hands_played(),
            ts: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            num_players: game.num_players(),
            hero_seat: game.player_seat(),
            dealer_seat: game.dealer_seat(),
            sb_seat: game.sb_seat(),
            bb_seat: game.bb_seat(),
            small_blind: game.config().small_blind * mult,
            big_blind: game.config().big_blind * mult,
            chips_start: game.chips_start().to_vec(),
            chips_end: game.chips().to_vec(),
            hands: (0..game.num_players()).map(|s| game.hand(s)).collect(),
            board: game.board().to_vec(),
            actions: game.action_history().to_vec(),
            winners: game.winners().to_vec(),
            winning_hand: game.winning_hand().copied(),
            pot: game.pot(),
            folded: game.folded().to_vec(),
            eliminated: game.eliminated().to_vec(),
            showdown: game.street() == Street::Showdown,
            eval_results: game.eval_results().clone(),
        })
    }

    fn category_name(&self, seat: usize) -> &'static str {
        self.eval_results
            .get(&seat)
            .map_or("", HandEvaluation::category_name)
    }

    fn position_tag(&self, seat: usize) -> &'static str {
        if seat == self.dealer_seat {
            " (button)"
        } else if seat == self.sb_seat {
            " (small blind)"
        } else if seat == self.bb_seat {
            " (big blind)"
        } else {
            ""
        }
    }

    /// Chips each showdown winner collected, odd chips to the first.
    fn share(&self, index: usize) -> u32 {
        let n = self.winners.len().max(1) as u32;
        let share = self.pot / n;
        if index == 0 {
            share + (self.pot - share * n)
        } else {
            share
        }
    }
}

fn ps_cards(cards: &[Card]) -> String {
    format!("[{}]", format_cards(cards))
}

fn ps_time(ts: &str) -> String {
    DateTime::parse_from_rfc3339(ts)
        .map(|d| d.with_timezone(&Utc).format("%Y/%m/%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|_| ts.to_string())
}

fn ps_action(name: &str, record: &ActionRecord) -> String {
    match record.action {
        ActionKind::Fold => format!("{name}: folds"),
        ActionKind::Check => format!("{name}: checks"),
        ActionKind::Call => format!("{name}: calls ${}", record.increment),
        ActionKind::Bet => format!("{name}: bets ${}", record.increment),
        ActionKind::Raise => format!(
            "{name}: raises ${} to ${}",
            record.increment, record.total_bet
        ),
    }
}

/// Renders `record` as PokerStars hand-history text.
///
/// `index` is the hand number printed in the header. `seat_names` maps
/// seats to screen names; missing entries print as `Seat<n>`.
pub fn format_pokerstars(record: &HandRecord, index: usize, seat_names: &[String]) -> String {
    let name = |s: usize| {
        seat_names
            .get(s)
            .cloned()
            .unwrap_or_else(|| format!("Seat{}", s + 1))
    };
    let n = record.num_players;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "PokerStars Hand #{index}: Hold'em Limit (${}/${}) - {}",
        record.small_blind,
        record.big_blind,
        ps_time(&record.ts)
    );
    let _ = writeln!(
        out,
        "Table 'Limit{}-{}' {n}-max Seat #{} is the button",
        record.big_blind,
        record.big_blind * 2,
        record.dealer_seat + 1
    );
    for i in (0..n).filter(|&i| !record.eliminated[i]) {
        let _ = writeln!(
            out,
            "Seat {}: {} (${} in chips)",
            i + 1,
            name(i),
            record.chips_start[i]
        );
    }

    let posted = |seat: usize, blind: u32| blind.min(record.chips_start[seat]);
    let _ = writeln!(
        out,
        "{}: posts small blind ${}",
        name(record.sb_seat),
        posted(record.sb_seat, record.small_blind)
    );
    let _ = writeln!(
        out,
        "{}: posts big blind ${}",
        name(record.bb_seat),
        posted(record.bb_seat, record.big_blind)
    );

    out.push_str("*** HOLE CARDS ***\n");
    if let Some(hero) = record.hero_seat {
        if let Some(Some(cards)) = record.hands.get(hero) {
            let _ = writeln!(out, "Dealt to {} {}", name(hero), ps_cards(cards));
        }
    }

    for street in [Street::Preflop, Street::Flop, Street::Turn, Street::River] {
        let acts: Vec<&ActionRecord> = record.actions.iter().filter(|a| a.street == street).collect();
        if street != Street::Preflop && acts.is_empty() {
            continue;
        }
        let b = &record.board;
        match street {
            Street::Flop if b.len() >= 3 => {
                let _ = writeln!(out, "*** FLOP *** {}", ps_cards(&b[..3]));
            }
            Street::Turn if b.len() >= 4 => {
                let _ = writeln!(out, "*** TURN *** {} {}", ps_cards(&b[..3]), ps_cards(&b[3..4]));
            }
            Street::River if b.len() >= 5 => {
                let _ = writeln!(out, "*** RIVER *** {} {}", ps_cards(&b[..4]), ps_cards(&b[4..5]));
            }
            _ => {}
        }
        for a in acts {
            out.push_str(&ps_action(&name(a.seat), a));
            out.push('\n');
        }
    }

    if record.showdown {
        out.push_str("*** SHOW DOWN ***\n");
        for (k, &s) in record.winners.iter().enumerate() {
            if let Some(Some(cards)) = record.hands.get(s) {
                let _ = writeln!(
                    out,
                    "{}: shows {} ({})",
                    name(s),
                    ps_cards(cards),
                    record.category_name(s)
                );
            }
            let _ = writeln!(out, "{}: collected (${})", name(s), record.share(k));
        }
        for i in 0..n {
            if record.winners.contains(&i) || record.folded[i] || record.eliminated[i] {
                continue;
            }
            if let Some(Some(cards)) = record.hands.get(i) {
                let _ = writeln!(
                    out,
                    "{}: shows {} ({})",
                    name(i),
                    ps_cards(cards),
                    record.category_name(i)
                );
                let _ = writeln!(out, "{}: lost", name(i));
            }
        }
    }

    out.push_str("*** SUMMARY ***\n");
    let _ = writeln!(out, "Total pot ${} | Rake $0", record.pot);
    if !record.board.is_empty() {
        let _ = writeln!(out, "Board {}", ps_cards(&record.board));
    }
    for i in (0..n).filter(|&i| !record.eliminated[i]) {
        let tag = record.position_tag(i);
        if let Some(k) = record.winners.iter().position(|&w| w == i) {
            match (record.showdown, record.hands.get(i)) {
                (true, Some(Some(cards))) => {
                    let _ = writeln!(
                        out,
                        "Seat {}: {}{tag} showed {} and won (${}) with {}",
                        i + 1,
                        name(i),
                        ps_cards(cards),
                        record.share(k),
                        record.category_name(i)
                    );
                }
                _ => {
                    let _ = writeln!(out, "Seat {}: {}{tag} collected (${})", i + 1, name(i), record.pot);
                }
            }
        } else if record.folded[i] {
            let street = record
                .actions
                .iter()
                .rev()
                .find(|a| a.seat == i && a.action == ActionKind::Fold)
                .map_or(Street::Preflop, |a| a.street);
            let when = match street {
                Street::Preflop => "before Flop",
                Street::Flop => "on the Flop",
                Street::Turn => "on the Turn",
                Street::River | Street::Showdown => "on the River",
            };
            let _ = writeln!(out, "Seat {}: {}{tag} folded {when}", i + 1, name(i));
        }
    }
    out
}
