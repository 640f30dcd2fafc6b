use core::fmt;
use std::fmt::Display;

use crate::core::Card;

use super::Chips;

/// Stable identifier for a seated player. Assigned when the player is
/// seated and kept across hands.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub u32);

impl Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStatus {
    /// In the hand and able to act.
    Active,
    /// Out of the current hand.
    Folded,
    /// All chips committed; still contesting pots but never acts.
    AllIn,
    /// Seated but not dealt in.
    SittingOut,
}

impl PlayerStatus {
    /// Only active players take turns.
    pub fn is_actionable(self) -> bool {
        matches!(self, PlayerStatus::Active)
    }

    /// Still holding a claim on pots at showdown.
    pub fn contests_pots(self) -> bool {
        matches!(self, PlayerStatus::Active | PlayerStatus::AllIn)
    }
}

/// A seated player. Identity and chips persist across hands; bet and
/// status fields are per hand.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub chips: Chips,
    pub hole_cards: Option<[Card; 2]>,
    /// Dense seat position, equal to the player's index in the seat order.
    pub seat: usize,
    pub status: PlayerStatus,
    /// Chips wagered on the current street, not yet collected into pots.
    pub current_bet: Chips,
    /// Chips wagered over the whole hand.
    pub total_bet: Chips,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, chips: Chips, seat: usize) -> Self {
        Self {
            id,
            name: name.into(),
            chips,
            hole_cards: None,
            seat,
            status: if chips > 0 {
                PlayerStatus::Active
            } else {
                PlayerStatus::SittingOut
            },
            current_bet: 0,
            total_bet: 0,
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
        }
    }

    /// Chips still owed to match `amount_to_call` on this street.
    pub fn owes(&self, amount_to_call: Chips) -> Chips {
        amount_to_call.saturating_sub(self.current_bet)
    }

    /// Move up to `amount` chips from the stack into the current bet.
    /// A stack shorter than `amount` commits everything and marks the
    /// player all-in; there is never debt. Returns the amount paid.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.current_bet += paid;
        self.total_bet += paid;
        if self.chips == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }

    pub fn clear_roles(&mut self) {
        self.is_dealer = false;
        self.is_small_blind = false;
        self.is_big_blind = false;
    }

    /// Per-hand reset. Identity, seat, and chips persist.
    pub fn reset_for_hand(&mut self) {
        self.hole_cards = None;
        self.current_bet = 0;
        self.total_bet = 0;
        self.status = if self.chips > 0 && self.status != PlayerStatus::SittingOut {
            PlayerStatus::Active
        } else {
            PlayerStatus::SittingOut
        };
    }
}
