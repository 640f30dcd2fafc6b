use super::Chips;

/// A discrete action submitted by the hosting layer for one player.
///
/// `Bet` opens the betting on a street; `Raise` carries the target total
/// for this street (not the increment). Shortfalls on `Call` become an
/// automatic all-in at apply time.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    Check,
    Bet(Chips),
    Call,
    Raise(Chips),
    Fold,
    AllIn,
}

impl PlayerAction {
    pub fn label(&self) -> &'static str {
        match self {
            PlayerAction::Check => "check",
            PlayerAction::Bet(_) => "bet",
            PlayerAction::Call => "call",
            PlayerAction::Raise(_) => "raise",
            PlayerAction::Fold => "fold",
            PlayerAction::AllIn => "all_in",
        }
    }
}
