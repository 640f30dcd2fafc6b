use super::action::PlayerAction;
use super::errors::EngineError;
use super::player::PlayerId;
use super::rules::TableRules;
use super::state::{HandState, TablePhase};

/// Check whether `action` is legal for `player_id` right now.
///
/// Pure: never mutates state. Check order is fixed so the hosting layer
/// gets the most specific error first: phase, known player, turn,
/// status, then per-action sizing.
pub fn check_action(
    state: &HandState,
    rules: &TableRules,
    player_id: PlayerId,
    action: &PlayerAction,
) -> Result<(), EngineError> {
    if state.phase != TablePhase::Playing {
        return Err(EngineError::WrongPhase);
    }
    let player = state
        .player(player_id)
        .ok_or(EngineError::UnknownPlayer(player_id))?;
    if state.current_turn != Some(player_id) {
        return Err(EngineError::OutOfTurn(player_id));
    }
    if !player.status.is_actionable() {
        return Err(EngineError::NotActionable(player_id));
    }

    let owed = player.owes(state.amount_to_call);

    match *action {
        PlayerAction::Check => {
            if owed > 0 {
                return Err(EngineError::CannotCheck { owed });
            }
            Ok(())
        }
        PlayerAction::Bet(amount) => {
            if state.amount_to_call > 0 {
                return Err(EngineError::BetIntoOpenAction {
                    amount_to_call: state.amount_to_call,
                });
            }
            if amount > player.chips {
                return Err(EngineError::BetExceedsStack {
                    amount,
                    stack: player.chips,
                });
            }
            if amount == 0 || amount < rules.big_blind {
                return Err(EngineError::BetBelowMinimum {
                    amount,
                    big_blind: rules.big_blind,
                });
            }
            Ok(())
        }
        PlayerAction::Call => {
            // Always satisfiable once owed: a short stack becomes an
            // automatic all-in at apply time.
            if owed == 0 {
                return Err(EngineError::NothingToCall);
            }
            Ok(())
        }
        PlayerAction::Raise(target) => {
            if state.amount_to_call == 0 {
                return Err(EngineError::RaiseWithoutBet);
            }
            if !state.action_reopened {
                return Err(EngineError::RaiseNotReopened);
            }
            if target <= state.amount_to_call {
                return Err(EngineError::RaiseBelowCall {
                    target,
                    amount_to_call: state.amount_to_call,
                });
            }
            let needed = target - player.current_bet;
            if needed > player.chips {
                return Err(EngineError::RaiseExceedsStack {
                    target,
                    needed,
                    stack: player.chips,
                });
            }
            let min_target = state.amount_to_call + state.min_raise;
            let is_all_in = needed == player.chips;
            if target < min_target && !is_all_in {
                return Err(EngineError::RaiseBelowMinimum { target, min_target });
            }
            Ok(())
        }
        PlayerAction::Fold => Ok(()),
        PlayerAction::AllIn => {
            if player.chips == 0 {
                return Err(EngineError::EmptyStackAllIn);
            }
            Ok(())
        }
    }
}
