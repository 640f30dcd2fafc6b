use tracing::trace;

use super::action::PlayerAction;
use super::player::{PlayerId, PlayerStatus};
use super::rules::TableRules;
use super::state::{HandState, RecordedAction};
use super::turn::reopen_pending;

/// Apply an already-validated action.
///
/// Callers must run [`check_action`](super::validate::check_action)
/// immediately before this; applying an action the validator would
/// reject is a programming defect, not a recoverable condition, and
/// there is no rollback. [`Table::apply_action`](super::Table::apply_action)
/// is the atomic entry point that sequences the two correctly.
pub fn apply_action(
    state: &mut HandState,
    rules: &TableRules,
    player_id: PlayerId,
    action: PlayerAction,
) {
    debug_assert!(
        super::validate::check_action(state, rules, player_id, &action).is_ok(),
        "apply_action called with an action the validator rejects"
    );
    let seat = state.seat_of(player_id).expect("validated player is seated");

    state.history.push(RecordedAction {
        player: player_id,
        action,
    });
    state.acted.enable(seat);

    match action {
        PlayerAction::Check => {}
        PlayerAction::Bet(amount) => {
            state.players[seat].commit(amount);
            let new_level = state.players[seat].current_bet;
            state.amount_to_call = state.amount_to_call.max(new_level);
            state.last_aggressor = Some(player_id);
            state.action_reopened = true;
            state.min_raise = state.min_raise.max(amount);
            state.acted = reopen_pending(state, seat);
        }
        PlayerAction::Call => {
            let owed = state.players[seat].owes(state.amount_to_call);
            let paid = state.players[seat].commit(owed);
            if paid < owed {
                // A short call never reopens betting.
                state.action_reopened = false;
            }
        }
        PlayerAction::Raise(target) => {
            let prev_level = state.amount_to_call;
            let needed = target - state.players[seat].current_bet;
            state.players[seat].commit(needed);
            state.amount_to_call = target;
            state.last_aggressor = Some(player_id);
            state.action_reopened = true;
            state.min_raise = state.min_raise.max(target - prev_level);
            state.acted = reopen_pending(state, seat);
        }
        PlayerAction::Fold => {
            state.players[seat].status = PlayerStatus::Folded;
            state.players[seat].hole_cards = None;
        }
        PlayerAction::AllIn => {
            let stack = state.players[seat].chips;
            state.players[seat].commit(stack);
            let new_level = state.players[seat].current_bet;
            if new_level > state.amount_to_call {
                let increment = new_level - state.amount_to_call;
                if increment >= state.min_raise {
                    // A full raise: betting reopens for everyone.
                    state.action_reopened = true;
                    state.min_raise = state.min_raise.max(increment);
                } else {
                    // A short raise: players who already acted get
                    // another turn for the extra chips, but may only
                    // call or fold until the next street.
                    state.action_reopened = false;
                }
                state.amount_to_call = new_level;
                state.last_aggressor = Some(player_id);
                state.acted = reopen_pending(state, seat);
            } else if new_level < state.amount_to_call {
                // All-in for less than the call amount: a short call.
                state.action_reopened = false;
            }
        }
    }

    trace!(
        player = %player_id,
        action = action.label(),
        amount_to_call = state.amount_to_call,
        min_raise = state.min_raise,
        reopened = state.action_reopened,
        "action applied"
    );
}
