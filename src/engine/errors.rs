use thiserror::Error;

use crate::core::DeckError;

use super::player::PlayerId;
use super::Chips;

/// Every user-visible failure from the engine.
///
/// Each variant maps to a stable machine-readable [`code`](EngineError::code)
/// so the hosting layer can surface `{code, message}` pairs without parsing
/// display strings. Validation failures never mutate state.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum EngineError {
    #[error("operation is not allowed in the current table phase")]
    WrongPhase,

    #[error("player {0} is not at this table")]
    UnknownPlayer(PlayerId),

    #[error("it is not player {0}'s turn")]
    OutOfTurn(PlayerId),

    #[error("player {0} cannot act in their current status")]
    NotActionable(PlayerId),

    #[error("cannot check while {owed} chips are owed")]
    CannotCheck { owed: Chips },

    #[error("cannot bet into an open bet of {amount_to_call}; raise instead")]
    BetIntoOpenAction { amount_to_call: Chips },

    #[error("bet of {amount} is below the big blind of {big_blind}")]
    BetBelowMinimum { amount: Chips, big_blind: Chips },

    #[error("bet of {amount} exceeds the stack of {stack}")]
    BetExceedsStack { amount: Chips, stack: Chips },

    #[error("there is no outstanding bet to call")]
    NothingToCall,

    #[error("there is no outstanding bet to raise; bet instead")]
    RaiseWithoutBet,

    #[error("betting is not reopened; only call or fold")]
    RaiseNotReopened,

    #[error("raise target {target} does not exceed the current bet of {amount_to_call}")]
    RaiseBelowCall { target: Chips, amount_to_call: Chips },

    #[error("raise target {target} is below the minimum raise target of {min_target}")]
    RaiseBelowMinimum { target: Chips, min_target: Chips },

    #[error("raise target {target} needs {needed} more chips than the stack of {stack}")]
    RaiseExceedsStack {
        target: Chips,
        needed: Chips,
        stack: Chips,
    },

    #[error("cannot go all-in with an empty stack")]
    EmptyStackAllIn,

    #[error("need at least two eligible players, found {0}")]
    NotEnoughPlayers(usize),

    #[error("the table is full")]
    TableFull,

    #[error("buy-in of {amount} is outside the allowed range {min}..={max}")]
    InvalidBuyIn { amount: Chips, min: Chips, max: Chips },

    #[error(transparent)]
    Deck(#[from] DeckError),
}

impl EngineError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::WrongPhase => "wrong_phase",
            EngineError::UnknownPlayer(_) => "unknown_player",
            EngineError::OutOfTurn(_) => "out_of_turn",
            EngineError::NotActionable(_) => "not_actionable",
            EngineError::CannotCheck { .. } => "cannot_check",
            EngineError::BetIntoOpenAction { .. } => "bet_into_open_action",
            EngineError::BetBelowMinimum { .. } => "bet_below_minimum",
            EngineError::BetExceedsStack { .. } => "bet_exceeds_stack",
            EngineError::NothingToCall => "nothing_to_call",
            EngineError::RaiseWithoutBet => "raise_without_bet",
            EngineError::RaiseNotReopened => "raise_not_reopened",
            EngineError::RaiseBelowCall { .. } => "raise_below_call",
            EngineError::RaiseBelowMinimum { .. } => "raise_below_minimum",
            EngineError::RaiseExceedsStack { .. } => "raise_exceeds_stack",
            EngineError::EmptyStackAllIn => "empty_stack_all_in",
            EngineError::NotEnoughPlayers(_) => "not_enough_players",
            EngineError::TableFull => "table_full",
            EngineError::InvalidBuyIn { .. } => "invalid_buy_in",
            EngineError::Deck(_) => "deck_exhausted",
        }
    }
}
