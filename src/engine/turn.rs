use crate::core::SeatSet;

use super::player::{Player, PlayerId};
use super::state::HandState;

/// Next seat with an actionable player, walking circularly from just
/// after `from`. Returns `None` when nobody can act.
pub(crate) fn next_active_seat(players: &[Player], from: usize) -> Option<usize> {
    let n = players.len();
    if n == 0 {
        return None;
    }
    (1..=n)
        .map(|step| (from + step) % n)
        .find(|&seat| players[seat].status.is_actionable())
}

/// Next actor in seat order after `from`. An unknown or absent `from`
/// yields the first actionable seat.
pub fn next_actor_after(state: &HandState, from: Option<PlayerId>) -> Option<PlayerId> {
    match from.and_then(|id| state.seat_of(id)) {
        Some(seat) => next_active_seat(&state.players, seat).map(|s| state.players[s].id),
        None => state
            .players
            .iter()
            .find(|p| p.status.is_actionable())
            .map(|p| p.id),
    }
}

/// Whether betting on the current street is complete.
///
/// Closed when no actionable seat is still pending: everyone who can
/// act has acted this street and matched the amount to call. The acted
/// set is explicit per seat; a new bet level clears the marks of
/// everyone who now owes chips, so a walked-past player can never be
/// skipped by double-submitted actions. A lone active player facing
/// only all-ins must still match the bet, but once matched there is
/// nobody left to respond to them, so the street ends without waiting
/// for a meaningless check.
pub fn round_closed(state: &HandState) -> bool {
    let pending = state.pending_seats();
    if pending.is_empty() {
        return true;
    }
    state.actionable_count() <= 1
        && pending
            .iter()
            .all(|seat| state.players[seat].current_bet == state.amount_to_call)
}

/// The hand ends as soon as at most one player is still contesting pots.
pub fn hand_over(state: &HandState) -> bool {
    state.contesting_count() <= 1
}

/// Seats whose acted marks must be cleared when `actor` establishes a
/// new bet level: every other actionable seat.
pub(crate) fn reopen_pending(state: &HandState, actor_seat: usize) -> SeatSet {
    let mut cleared = state.acted;
    for (seat, player) in state.players.iter().enumerate() {
        if seat != actor_seat && player.status.is_actionable() {
            cleared.disable(seat);
        }
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::player::{Player, PlayerStatus};

    fn state_with(statuses: &[PlayerStatus]) -> HandState {
        let mut state = HandState::new();
        for (i, status) in statuses.iter().enumerate() {
            let mut p = Player::new(PlayerId(i as u32), format!("p{i}"), 1000, i);
            p.status = *status;
            state.players.push(p);
        }
        state
    }

    #[test]
    fn test_next_actor_walks_circularly() {
        let state = state_with(&[
            PlayerStatus::Active,
            PlayerStatus::Folded,
            PlayerStatus::Active,
        ]);
        assert_eq!(
            Some(PlayerId(2)),
            next_actor_after(&state, Some(PlayerId(0)))
        );
        assert_eq!(
            Some(PlayerId(0)),
            next_actor_after(&state, Some(PlayerId(2)))
        );
    }

    #[test]
    fn test_next_actor_none_from_gives_first() {
        let state = state_with(&[
            PlayerStatus::Folded,
            PlayerStatus::Active,
            PlayerStatus::Active,
        ]);
        assert_eq!(Some(PlayerId(1)), next_actor_after(&state, None));
    }

    #[test]
    fn test_next_actor_none_when_nobody_actionable() {
        let state = state_with(&[PlayerStatus::AllIn, PlayerStatus::Folded]);
        assert_eq!(None, next_actor_after(&state, Some(PlayerId(0))));
        assert_eq!(None, next_actor_after(&state, None));
    }

    #[test]
    fn test_round_closed_single_actionable_with_nothing_owed() {
        let state = state_with(&[PlayerStatus::Active, PlayerStatus::AllIn]);
        assert!(round_closed(&state));
    }

    #[test]
    fn test_lone_active_player_facing_all_in_still_gets_a_turn() {
        let mut state = state_with(&[PlayerStatus::Active, PlayerStatus::AllIn]);
        state.amount_to_call = 400;
        state.players[0].current_bet = 20;
        state.players[1].current_bet = 400;
        // The only active player still owes chips; the street cannot
        // end before they call or fold the all-in.
        assert!(!round_closed(&state));

        state.players[0].current_bet = 400;
        assert!(round_closed(&state));
    }

    #[test]
    fn test_round_open_until_all_acted_and_matched() {
        let mut state = state_with(&[
            PlayerStatus::Active,
            PlayerStatus::Active,
            PlayerStatus::Active,
        ]);
        state.amount_to_call = 20;
        for p in &mut state.players {
            p.current_bet = 20;
        }
        // All matched but the big blind has not acted yet.
        state.acted.enable(0);
        state.acted.enable(1);
        assert!(!round_closed(&state));

        state.acted.enable(2);
        assert!(round_closed(&state));
    }

    #[test]
    fn test_round_open_when_bet_unmatched() {
        let mut state = state_with(&[PlayerStatus::Active, PlayerStatus::Active]);
        state.amount_to_call = 50;
        state.players[0].current_bet = 50;
        state.acted.enable(0);
        state.acted.enable(1);
        assert!(!round_closed(&state));
    }

    #[test]
    fn test_hand_over_counts_all_in_as_contesting() {
        let state = state_with(&[PlayerStatus::AllIn, PlayerStatus::Folded, PlayerStatus::Active]);
        assert!(!hand_over(&state));
        let state = state_with(&[PlayerStatus::Folded, PlayerStatus::Folded, PlayerStatus::Active]);
        assert!(hand_over(&state));
    }
}
