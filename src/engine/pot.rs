use std::cmp::Ordering;

use tracing::debug;

use crate::core::RankOracle;

use super::event::{AwardReason, PotAward};
use super::state::{HandState, Pot, PotKind};
use super::Chips;

/// Convert this street's wagers into pot layers. Run at every street
/// end, and once more before settlement.
///
/// Layers are cut at each distinct bet level, lowest first; everyone
/// whose street bet reached a level funds and is recorded in that
/// layer. A layer whose eligible set matches an existing pot merges
/// into it, so an uncontested multi-street hand stays a single main
/// pot. Folded contributors stay recorded; distribution filters them.
pub fn collect_bets(state: &mut HandState) {
    let contributors: Vec<usize> = state
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.current_bet > 0)
        .map(|(seat, _)| seat)
        .collect();
    if contributors.is_empty() {
        return;
    }

    let mut levels: Vec<Chips> = contributors
        .iter()
        .map(|&s| state.players[s].current_bet)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let hand_contributors = state.contributors();

    let mut prev = 0;
    for level in levels {
        let payers: Vec<usize> = contributors
            .iter()
            .copied()
            .filter(|&s| state.players[s].current_bet >= level)
            .collect();
        let amount = (level - prev) * payers.len() as Chips;
        let mut eligible: Vec<_> = payers.iter().map(|&s| state.players[s].id).collect();
        eligible.sort_unstable();

        if let Some(pot) = state.pots.iter_mut().find(|p| p.eligible == eligible) {
            pot.amount += amount;
        } else {
            let kind = if eligible == hand_contributors {
                PotKind::Main
            } else {
                PotKind::Side
            };
            let id = state.next_pot_id;
            state.next_pot_id += 1;
            state.pots.push(Pot {
                id,
                amount,
                eligible,
                kind,
            });
        }
        prev = level;
    }

    for player in &mut state.players {
        player.current_bet = 0;
    }

    let total: Chips = state.pots.iter().map(|p| p.amount).sum();
    debug!(
        street = %state.street,
        pots = state.pots.len(),
        total,
        "street bets collected"
    );
}

/// Settle every pot, at showdown or on early termination.
///
/// Per pot, the players still contesting the hand out of its recorded
/// eligible set compete; a lone claimant takes it without a showdown.
/// Ties split evenly, with the remainder paid one chip at a time by
/// clockwise seat distance from the button, the button seat last. A pot
/// nobody can claim (every recorded player folded) is returned to its
/// contributors rather than vanishing.
pub fn distribute(state: &mut HandState, oracle: &dyn RankOracle) -> Vec<PotAward> {
    let pots = std::mem::take(&mut state.pots);
    let mut awards = Vec::new();

    for pot in pots.into_iter().filter(|p| p.amount > 0) {
        let live: Vec<usize> = pot
            .eligible
            .iter()
            .filter_map(|&id| state.seat_of(id))
            .filter(|&s| state.players[s].status.contests_pots())
            .collect();

        match live.len() {
            0 => {
                // Everyone recorded in this layer folded; give their
                // chips back instead of burning them.
                let seats: Vec<usize> = pot
                    .eligible
                    .iter()
                    .filter_map(|&id| state.seat_of(id))
                    .collect();
                pay_split(state, &pot, &seats, AwardReason::Refund, None, &mut awards);
            }
            1 => {
                let seat = live[0];
                state.players[seat].chips += pot.amount;
                awards.push(PotAward {
                    pot_id: pot.id,
                    player: state.players[seat].id,
                    amount: pot.amount,
                    reason: AwardReason::OnlyEligible,
                    rank: None,
                });
            }
            _ => {
                let board = state.community.clone();
                let ranked: Vec<_> = live
                    .iter()
                    .filter_map(|&s| {
                        state.players[s]
                            .hole_cards
                            .map(|hole| (s, oracle.evaluate(hole, &board)))
                    })
                    .collect();
                let best = ranked
                    .iter()
                    .map(|(_, value)| *value)
                    .max()
                    .expect("live players hold cards");
                let winners: Vec<usize> = ranked
                    .iter()
                    .filter(|(_, value)| value.cmp(&best) == Ordering::Equal)
                    .map(|(seat, _)| *seat)
                    .collect();
                pay_split(
                    state,
                    &pot,
                    &winners,
                    AwardReason::BestHand,
                    Some(best.rank),
                    &mut awards,
                );
            }
        }
    }

    debug!(awards = awards.len(), "pots distributed");
    awards
}

/// Forced-termination refund for a hand that cannot complete normally.
///
/// Uncollected street bets go straight back to their owners; each
/// already-formed pot splits evenly among its still-present eligible
/// players with the usual clockwise remainder rule. No chips vanish.
pub fn refund_all(state: &mut HandState) -> Vec<PotAward> {
    for player in &mut state.players {
        player.chips += player.current_bet;
        player.current_bet = 0;
    }

    let pots = std::mem::take(&mut state.pots);
    let mut awards = Vec::new();
    for pot in pots.into_iter().filter(|p| p.amount > 0) {
        let mut seats: Vec<usize> = pot
            .eligible
            .iter()
            .filter_map(|&id| state.seat_of(id))
            .collect();
        if seats.is_empty() {
            // Every eligible player already left; the remaining table
            // absorbs the layer rather than losing it.
            seats = (0..state.players.len()).collect();
        }
        pay_split(state, &pot, &seats, AwardReason::Refund, None, &mut awards);
    }

    debug!(awards = awards.len(), "hand refunded");
    awards
}

/// Split `pot.amount` evenly across `seats`, paying the remainder one
/// chip at a time by clockwise distance from the button; the button
/// seat itself is paid last.
fn pay_split(
    state: &mut HandState,
    pot: &Pot,
    seats: &[usize],
    reason: AwardReason,
    rank: Option<crate::core::RankClass>,
    awards: &mut Vec<PotAward>,
) {
    if seats.is_empty() {
        return;
    }
    let n = state.players.len();
    let button = state.button_idx;
    let mut ordered: Vec<usize> = seats.to_vec();
    ordered.sort_unstable_by_key(|&seat| (seat + n - 1 - button) % n);

    let share = pot.amount / ordered.len() as Chips;
    let remainder = pot.amount % ordered.len() as Chips;

    for (i, &seat) in ordered.iter().enumerate() {
        let extra = if (i as Chips) < remainder { 1 } else { 0 };
        let amount = share + extra;
        if amount == 0 {
            continue;
        }
        state.players[seat].chips += amount;
        awards.push(PotAward {
            pot_id: pot.id,
            player: state.players[seat].id,
            amount,
            reason,
            rank,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, HandValue, RankClass, Suit, Value};
    use crate::engine::player::{Player, PlayerId, PlayerStatus};

    /// Ranks every hand by the first hole card's value so tests can rig
    /// showdowns without building full boards.
    struct FirstCardOracle;

    impl RankOracle for FirstCardOracle {
        fn evaluate(&self, hole: [Card; 2], _board: &[Card]) -> HandValue {
            HandValue {
                rank: RankClass::HighCard,
                score: hole[0].value.index(),
                best_five: [hole[0]; 5],
            }
        }
    }

    fn hole(value: Value) -> [Card; 2] {
        [
            Card::new(value, Suit::Spade),
            Card::new(Value::Two, Suit::Heart),
        ]
    }

    fn state_of(stacks: &[u64]) -> HandState {
        let mut state = HandState::new();
        for (i, chips) in stacks.iter().enumerate() {
            state
                .players
                .push(Player::new(PlayerId(i as u32), format!("p{i}"), *chips, i));
        }
        state
    }

    fn bet(state: &mut HandState, seat: usize, amount: u64) {
        state.players[seat].commit(amount);
    }

    #[test]
    fn test_layering_50_100_150() {
        let mut state = state_of(&[50, 100, 150]);
        bet(&mut state, 0, 50);
        bet(&mut state, 1, 100);
        bet(&mut state, 2, 150);
        collect_bets(&mut state);

        assert_eq!(3, state.pots.len());
        let amounts: Vec<u64> = state.pots.iter().map(|p| p.amount).collect();
        assert_eq!(vec![150, 100, 50], amounts);
        assert_eq!(
            vec![PlayerId(0), PlayerId(1), PlayerId(2)],
            state.pots[0].eligible
        );
        assert_eq!(vec![PlayerId(1), PlayerId(2)], state.pots[1].eligible);
        assert_eq!(vec![PlayerId(2)], state.pots[2].eligible);
        assert_eq!(PotKind::Main, state.pots[0].kind);
        assert_eq!(PotKind::Side, state.pots[1].kind);
        assert_eq!(300u64, state.pots.iter().map(|p| p.amount).sum());
        assert!(state.players.iter().all(|p| p.current_bet == 0));
    }

    #[test]
    fn test_equal_bets_merge_across_streets() {
        let mut state = state_of(&[1000, 1000]);
        bet(&mut state, 0, 50);
        bet(&mut state, 1, 50);
        collect_bets(&mut state);
        bet(&mut state, 0, 70);
        bet(&mut state, 1, 70);
        collect_bets(&mut state);

        assert_eq!(1, state.pots.len());
        assert_eq!(240, state.pots[0].amount);
        assert_eq!(PotKind::Main, state.pots[0].kind);
    }

    #[test]
    fn test_collect_ignores_streets_with_no_bets() {
        let mut state = state_of(&[1000, 1000]);
        collect_bets(&mut state);
        assert!(state.pots.is_empty());
    }

    #[test]
    fn test_lone_claimant_takes_pot_without_showdown() {
        let mut state = state_of(&[1000, 1000]);
        bet(&mut state, 0, 100);
        bet(&mut state, 1, 100);
        collect_bets(&mut state);
        state.players[1].status = PlayerStatus::Folded;

        let awards = distribute(&mut state, &FirstCardOracle);
        assert_eq!(1, awards.len());
        assert_eq!(PlayerId(0), awards[0].player);
        assert_eq!(200, awards[0].amount);
        assert_eq!(AwardReason::OnlyEligible, awards[0].reason);
        assert_eq!(1100, state.players[0].chips);
        assert!(state.pots.is_empty());
    }

    #[test]
    fn test_showdown_pays_best_hand() {
        let mut state = state_of(&[1000, 1000, 1000]);
        for seat in 0..3 {
            bet(&mut state, seat, 100);
        }
        state.players[0].hole_cards = Some(hole(Value::King));
        state.players[1].hole_cards = Some(hole(Value::Ace));
        state.players[2].hole_cards = Some(hole(Value::Queen));
        collect_bets(&mut state);

        let awards = distribute(&mut state, &FirstCardOracle);
        assert_eq!(1, awards.len());
        assert_eq!(PlayerId(1), awards[0].player);
        assert_eq!(300, awards[0].amount);
        assert_eq!(AwardReason::BestHand, awards[0].reason);
        assert_eq!(Some(RankClass::HighCard), awards[0].rank);
        assert_eq!(1200, state.players[1].chips);
    }

    #[test]
    fn test_three_way_tie_remainder_goes_clockwise_from_button() {
        let mut state = state_of(&[1000, 1000, 1000]);
        state.button_idx = 0;
        // 100 chips total, indivisible by three: 34 + 33 + 33.
        bet(&mut state, 0, 34);
        bet(&mut state, 1, 33);
        bet(&mut state, 2, 33);
        state.players[0].current_bet = 0;
        state.players[1].current_bet = 0;
        state.players[2].current_bet = 0;
        state.pots.push(Pot {
            id: 0,
            amount: 100,
            eligible: vec![PlayerId(0), PlayerId(1), PlayerId(2)],
            kind: PotKind::Main,
        });
        for seat in 0..3 {
            state.players[seat].hole_cards = Some(hole(Value::Ace));
        }

        let awards = distribute(&mut state, &FirstCardOracle);
        let amount_for = |id: u32| {
            awards
                .iter()
                .find(|a| a.player == PlayerId(id))
                .unwrap()
                .amount
        };
        // The extra chip lands immediately clockwise of the button;
        // the button seat collects last.
        assert_eq!(34, amount_for(1));
        assert_eq!(33, amount_for(2));
        assert_eq!(33, amount_for(0));
    }

    #[test]
    fn test_side_pot_winner_must_be_eligible() {
        let mut state = state_of(&[50, 300, 300]);
        bet(&mut state, 0, 50); // short all-in
        bet(&mut state, 1, 150);
        bet(&mut state, 2, 150);
        collect_bets(&mut state);
        state.players[0].status = PlayerStatus::AllIn;
        // The short stack holds the best hand but can only win the
        // layer it funded.
        state.players[0].hole_cards = Some(hole(Value::Ace));
        state.players[1].hole_cards = Some(hole(Value::King));
        state.players[2].hole_cards = Some(hole(Value::Queen));

        let awards = distribute(&mut state, &FirstCardOracle);
        let total: u64 = awards.iter().map(|a| a.amount).sum();
        assert_eq!(350, total);
        assert_eq!(
            150,
            awards
                .iter()
                .filter(|a| a.player == PlayerId(0))
                .map(|a| a.amount)
                .sum::<u64>()
        );
        assert_eq!(
            200,
            awards
                .iter()
                .filter(|a| a.player == PlayerId(1))
                .map(|a| a.amount)
                .sum::<u64>()
        );
    }

    #[test]
    fn test_unclaimable_pot_returns_to_contributors() {
        let mut state = state_of(&[1000, 1000]);
        bet(&mut state, 0, 200);
        bet(&mut state, 1, 100);
        collect_bets(&mut state);
        // The over-bettor folds; the 100-chip excess layer has no
        // live claimant and flows back.
        state.players[0].status = PlayerStatus::Folded;
        state.players[1].hole_cards = Some(hole(Value::Ace));

        let total_before: u64 =
            state.players.iter().map(|p| p.chips).sum::<u64>() + 300;
        let awards = distribute(&mut state, &FirstCardOracle);
        let total_after: u64 = state.players.iter().map(|p| p.chips).sum();
        assert_eq!(total_before, total_after);
        assert!(awards
            .iter()
            .any(|a| a.player == PlayerId(0) && a.reason == AwardReason::Refund));
    }

    #[test]
    fn test_refund_all_conserves_chips() {
        let mut state = state_of(&[1000, 1000, 1000]);
        bet(&mut state, 0, 100);
        bet(&mut state, 1, 100);
        bet(&mut state, 2, 40);
        collect_bets(&mut state);
        // Fresh wagers on the next street, not yet collected.
        bet(&mut state, 0, 60);
        bet(&mut state, 1, 25);

        let awards = refund_all(&mut state);
        assert!(state.pots.is_empty());
        assert!(!awards.is_empty());
        assert_eq!(3000u64, state.players.iter().map(|p| p.chips).sum());
        assert!(state.players.iter().all(|p| p.current_bet == 0));
    }
}
