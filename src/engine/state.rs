use core::fmt;
use std::fmt::Display;

use crate::core::{Card, SeatSet};

use super::action::PlayerAction;
use super::player::{Player, PlayerId, PlayerStatus};
use super::Chips;

/// The streets of a hand, in order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Street {
    #[default]
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    pub fn next(self) -> Self {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River => Street::Showdown,
            Street::Showdown => Street::Showdown,
        }
    }
}

impl Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
            Street::Showdown => write!(f, "Showdown"),
        }
    }
}

/// Whether a hand is in progress at the table.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TablePhase {
    #[default]
    Waiting,
    Playing,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PotKind {
    Main,
    Side,
}

/// One layer of the pot. `eligible` is recorded at collection time and
/// may still contain players who fold later; distribution intersects it
/// with the non-folded set.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pot {
    pub id: usize,
    pub amount: Chips,
    /// Sorted by player id.
    pub eligible: Vec<PlayerId>,
    pub kind: PotKind,
}

/// One entry of the current street's action history.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedAction {
    pub player: PlayerId,
    pub action: PlayerAction,
}

/// The mutable aggregate for one hand in progress.
///
/// Owned by the orchestrator; the assigner, turn engine, applier, and
/// pot engine borrow it mutably for one call at a time and retain no
/// references across calls.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct HandState {
    pub street: Street,
    pub phase: TablePhase,
    /// Seat order; `players[i].seat == i` always holds.
    pub players: Vec<Player>,
    pub button_idx: usize,
    pub community: Vec<Card>,
    pub current_turn: Option<PlayerId>,
    /// The street-total every active player must match.
    pub amount_to_call: Chips,
    /// Minimum raise increment over `amount_to_call`.
    pub min_raise: Chips,
    pub last_aggressor: Option<PlayerId>,
    /// Whether a full raise is currently permitted (vs call/fold only).
    pub action_reopened: bool,
    /// Seats that have voluntarily acted this street. Forced blinds do
    /// not count; a new full bet level clears everyone else's mark.
    pub acted: SeatSet,
    /// Action history scoped to the current street.
    pub history: Vec<RecordedAction>,
    pub pots: Vec<Pot>,
    pub(crate) next_pot_id: usize,
}

impl Default for HandState {
    fn default() -> Self {
        Self {
            street: Street::Preflop,
            phase: TablePhase::Waiting,
            players: Vec::new(),
            button_idx: 0,
            community: Vec::new(),
            current_turn: None,
            amount_to_call: 0,
            min_raise: 0,
            last_aggressor: None,
            // A fresh street always permits raising.
            action_reopened: true,
            acted: SeatSet::empty(),
            history: Vec::new(),
            pots: Vec::new(),
            next_pot_id: 0,
        }
    }
}

impl HandState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Players who can still take a turn this street.
    pub fn actionable_count(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.status.is_actionable())
            .count()
    }

    /// Players still contesting the hand (active or all-in).
    pub fn contesting_count(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.status.contests_pots())
            .count()
    }

    /// Ids of everyone who has put chips into this hand.
    pub fn contributors(&self) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.total_bet > 0)
            .map(|p| p.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Street-boundary reset: clears the per-street betting fields for
    /// the street just elapsed. Collected pots and statuses persist.
    pub fn begin_street(&mut self, street: Street, base_min_raise: Chips) {
        self.street = street;
        self.amount_to_call = 0;
        self.min_raise = base_min_raise;
        self.last_aggressor = None;
        self.action_reopened = true;
        self.acted = SeatSet::empty();
        self.history.clear();
        for player in &mut self.players {
            player.current_bet = 0;
        }
    }

    /// Per-hand reset. Player identities, seats, chips, and the button
    /// position persist; everything hand-scoped is cleared.
    pub fn reset_for_hand(&mut self) {
        self.street = Street::Preflop;
        self.community.clear();
        self.current_turn = None;
        self.amount_to_call = 0;
        self.min_raise = 0;
        self.last_aggressor = None;
        self.action_reopened = true;
        self.acted = SeatSet::empty();
        self.history.clear();
        self.pots.clear();
        self.next_pot_id = 0;
        for player in &mut self.players {
            player.reset_for_hand();
        }
    }

    /// Every chip at the table: stacks, uncollected street bets, and
    /// collected pots. Invariant under any sequence of valid operations
    /// within a hand.
    pub fn total_chips(&self) -> Chips {
        let stacks: Chips = self.players.iter().map(|p| p.chips + p.current_bet).sum();
        let pots: Chips = self.pots.iter().map(|p| p.amount).sum();
        stacks + pots
    }

    /// Seats that would still need to act for the round to close.
    pub fn pending_seats(&self) -> SeatSet {
        let mut pending = SeatSet::empty();
        for (seat, player) in self.players.iter().enumerate() {
            if player.status.is_actionable()
                && (!self.acted.get(seat) || player.current_bet != self.amount_to_call)
            {
                pending.enable(seat);
            }
        }
        pending
    }
}
