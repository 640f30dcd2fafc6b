use tracing::debug;

use super::errors::EngineError;
use super::player::PlayerId;
use super::rules::TableRules;
use super::state::HandState;
use super::turn::next_active_seat;

/// Move the button and assign blind roles for a new hand.
///
/// Requires at least two players who can be dealt in. Heads-up the
/// button posts the small blind; with three or more players the small
/// blind sits one seat after the button and the big blind one after
/// that, skipping sitting-out seats in both cases.
pub fn assign_positions(state: &mut HandState) -> Result<(), EngineError> {
    let eligible = state.actionable_count();
    if eligible < 2 {
        return Err(EngineError::NotEnoughPlayers(eligible));
    }

    for player in &mut state.players {
        player.clear_roles();
    }

    let button = next_active_seat(&state.players, state.button_idx)
        .expect("two eligible players guarantee a button seat");
    state.button_idx = button;
    state.players[button].is_dealer = true;

    if eligible == 2 {
        // Heads-up: the button is also the small blind.
        state.players[button].is_small_blind = true;
        let bb = next_active_seat(&state.players, button)
            .expect("second eligible player takes the big blind");
        state.players[bb].is_big_blind = true;
    } else {
        let sb = next_active_seat(&state.players, button)
            .expect("eligible seat after the button");
        state.players[sb].is_small_blind = true;
        let bb = next_active_seat(&state.players, sb)
            .expect("eligible seat after the small blind");
        state.players[bb].is_big_blind = true;
    }

    debug!(
        button = state.button_idx,
        players = state.players.len(),
        "positions assigned"
    );
    Ok(())
}

/// Collect the blinds. A stack shorter than its blind commits whatever
/// is available and goes all-in; there is never debt. Sets the amount
/// to call and the minimum raise to the full big blind either way.
pub fn post_blinds(state: &mut HandState, rules: &TableRules) {
    if let Some(seat) = state.players.iter().position(|p| p.is_small_blind) {
        let paid = state.players[seat].commit(rules.small_blind);
        debug!(seat, paid, "small blind posted");
    }
    if let Some(seat) = state.players.iter().position(|p| p.is_big_blind) {
        let paid = state.players[seat].commit(rules.big_blind);
        debug!(seat, paid, "big blind posted");
    }
    state.amount_to_call = rules.big_blind;
    state.min_raise = rules.base_min_raise();
}

/// Pre-flop first actor: under the gun (one after the big blind), the
/// button when heads-up, or the first player after the button when no
/// big blind seat is resolvable.
pub fn first_actor_preflop(state: &HandState) -> Option<PlayerId> {
    let heads_up = state.players.iter().any(|p| p.is_dealer && p.is_small_blind);
    if heads_up {
        let button = &state.players[state.button_idx];
        if button.status.is_actionable() {
            return Some(button.id);
        }
        return next_active_seat(&state.players, state.button_idx).map(|s| state.players[s].id);
    }
    match state.players.iter().position(|p| p.is_big_blind) {
        Some(bb) => next_active_seat(&state.players, bb).map(|s| state.players[s].id),
        None => next_active_seat(&state.players, state.button_idx).map(|s| state.players[s].id),
    }
}

/// Post-flop first actor: the first actionable player after the button,
/// regardless of table size.
pub fn first_actor_postflop(state: &HandState) -> Option<PlayerId> {
    next_active_seat(&state.players, state.button_idx).map(|s| state.players[s].id)
}
