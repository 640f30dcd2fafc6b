use crate::core::{Card, RankClass};

use super::player::PlayerId;
use super::state::Street;
use super::Chips;

/// Why a pot (or pot share) went to a player.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AwardReason {
    /// Everyone else in the pot folded or was never eligible.
    OnlyEligible,
    /// Won at showdown via the ranking oracle.
    BestHand,
    /// Returned by the forced-termination path.
    Refund,
}

/// One payout from one pot.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotAward {
    pub pot_id: usize,
    pub player: PlayerId,
    pub amount: Chips,
    pub reason: AwardReason,
    /// The winning hand class, when a showdown decided the pot.
    pub rank: Option<RankClass>,
}

/// Ordered events returned from [`Table::apply_action`](super::Table::apply_action)
/// for the hosting layer to fan out. The engine itself keeps no event log.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Betting on the current street is complete.
    RoundClosed { street: Street },
    /// The hand moved to a new street.
    StreetAdvanced { street: Street },
    FlopDealt([Card; 3]),
    TurnDealt(Card),
    RiverDealt(Card),
    ShowdownStarted,
    /// Action passed to a new player.
    TurnChanged { player: PlayerId },
    PotsDistributed { awards: Vec<PotAward> },
    HandFinished,
    /// Fewer than two seated players still hold chips.
    GameEnded,
}
