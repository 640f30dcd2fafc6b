use std::cmp::Ordering;

use super::card::{Card, Value};

/// The hand classes, weakest to strongest.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum RankClass {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

/// The strength of a player's best five-card hand.
///
/// Ordered by `(rank, score)`; `best_five` carries the cards that made
/// the hand and never affects comparison.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandValue {
    pub rank: RankClass,
    /// Tie-breaker within the rank class. Card values packed four bits
    /// at a time in order of significance.
    pub score: u32,
    pub best_five: [Card; 5],
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.rank, self.score).cmp(&(other.rank, other.score))
    }
}

/// The hand-ranking oracle the pot engine consults at showdown.
///
/// Implementations must be deterministic for identical inputs and yield
/// a consistent order under repeated comparison, since the same engine
/// is used for live play and deterministic replay.
pub trait RankOracle {
    fn evaluate(&self, hole: [Card; 2], board: &[Card]) -> HandValue;
}

/// Default oracle: exhaustively ranks the best five cards out of the
/// player's two hole cards plus the board.
#[derive(Debug, Default, Clone, Copy)]
pub struct SevenCardOracle;

impl RankOracle for SevenCardOracle {
    fn evaluate(&self, hole: [Card; 2], board: &[Card]) -> HandValue {
        let mut cards: Vec<Card> = Vec::with_capacity(2 + board.len());
        cards.extend_from_slice(&hole);
        cards.extend_from_slice(board);
        debug_assert!(cards.len() >= 5, "oracle needs at least five cards");

        let n = cards.len();
        let mut best: Option<HandValue> = None;
        for a in 0..n - 4 {
            for b in a + 1..n - 3 {
                for c in b + 1..n - 2 {
                    for d in c + 1..n - 1 {
                        for e in d + 1..n {
                            let mut five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                            let (rank, score) = rank_five(&five);
                            five.sort_unstable_by(|x, y| y.cmp(x));
                            let candidate = HandValue {
                                rank,
                                score,
                                best_five: five,
                            };
                            if best.map_or(true, |current| candidate > current) {
                                best = Some(candidate);
                            }
                        }
                    }
                }
            }
        }
        best.expect("at least one five card combination")
    }
}

/// Bit mask for the wheel (Ace, two, three, four, five).
const WHEEL: u32 = 0b1_0000_0000_1111;

/// Index of the straight's high card for a value bitset, if any.
/// The wheel ranks lowest; its high card is the five.
fn straight_high(value_bits: u32) -> Option<u32> {
    for high in (4..13u32).rev() {
        let mask = 0b1_1111 << (high - 4);
        if value_bits & mask == mask {
            return Some(high);
        }
    }
    if value_bits & WHEEL == WHEEL {
        return Some(Value::Five.index());
    }
    None
}

fn pack(values: &[Value]) -> u32 {
    values.iter().fold(0, |acc, v| (acc << 4) | v.index())
}

/// Rank exactly five cards into a class and an in-class score.
fn rank_five(cards: &[Card; 5]) -> (RankClass, u32) {
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let value_bits = cards.iter().fold(0u32, |acc, c| acc | c.value.bit());
    let straight = straight_high(value_bits);

    if is_flush {
        if let Some(high) = straight {
            return (RankClass::StraightFlush, high);
        }
    }

    // Group values by multiplicity, largest group first, value breaking ties.
    let mut counts = [0u8; 13];
    for card in cards {
        counts[card.value.index() as usize] += 1;
    }
    let mut groups: Vec<(u8, Value)> = Value::ALL
        .iter()
        .filter(|v| counts[v.index() as usize] > 0)
        .map(|v| (counts[v.index() as usize], *v))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let shape: Vec<u8> = groups.iter().map(|(count, _)| *count).collect();
    let ordered: Vec<Value> = groups.iter().map(|(_, v)| *v).collect();

    match shape.as_slice() {
        [4, 1] => (RankClass::FourOfAKind, pack(&ordered)),
        [3, 2] => (RankClass::FullHouse, pack(&ordered)),
        [3, 1, 1] => (RankClass::ThreeOfAKind, pack(&ordered)),
        [2, 2, 1] => (RankClass::TwoPair, pack(&ordered)),
        [2, 1, 1, 1] => (RankClass::OnePair, pack(&ordered)),
        _ => {
            if is_flush {
                (RankClass::Flush, pack(&ordered))
            } else if let Some(high) = straight {
                (RankClass::Straight, high)
            } else {
                (RankClass::HighCard, pack(&ordered))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::Suit;

    fn card(value: Value, suit: Suit) -> Card {
        Card::new(value, suit)
    }

    fn five(values: [Value; 5], suits: [Suit; 5]) -> [Card; 5] {
        let mut cards = [card(Value::Two, Suit::Club); 5];
        for i in 0..5 {
            cards[i] = card(values[i], suits[i]);
        }
        cards
    }

    const OFFSUIT: [Suit; 5] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade, Suit::Club];

    #[test]
    fn test_high_card_vs_pair() {
        let (high, _) = rank_five(&five(
            [Value::Ace, Value::King, Value::Nine, Value::Five, Value::Three],
            OFFSUIT,
        ));
        let (pair, _) = rank_five(&five(
            [Value::Two, Value::Two, Value::Nine, Value::Five, Value::Three],
            OFFSUIT,
        ));
        assert_eq!(RankClass::HighCard, high);
        assert_eq!(RankClass::OnePair, pair);
        assert!(pair > high);
    }

    #[test]
    fn test_wheel_is_lowest_straight() {
        let (rank, wheel_score) = rank_five(&five(
            [Value::Ace, Value::Two, Value::Three, Value::Four, Value::Five],
            OFFSUIT,
        ));
        assert_eq!(RankClass::Straight, rank);
        let (_, six_high) = rank_five(&five(
            [Value::Two, Value::Three, Value::Four, Value::Five, Value::Six],
            OFFSUIT,
        ));
        assert!(six_high > wheel_score);
    }

    #[test]
    fn test_straight_flush_beats_quads() {
        let sf = rank_five(&five(
            [Value::Five, Value::Six, Value::Seven, Value::Eight, Value::Nine],
            [Suit::Heart; 5],
        ));
        let quads = rank_five(&five(
            [Value::Ace, Value::Ace, Value::Ace, Value::Ace, Value::King],
            [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade, Suit::Club],
        ));
        assert_eq!(RankClass::StraightFlush, sf.0);
        assert_eq!(RankClass::FourOfAKind, quads.0);
        assert!(sf > quads);
    }

    #[test]
    fn test_kickers_break_pair_ties() {
        let (_, ace_kicker) = rank_five(&five(
            [Value::Ten, Value::Ten, Value::Ace, Value::Five, Value::Three],
            OFFSUIT,
        ));
        let (_, king_kicker) = rank_five(&five(
            [Value::Ten, Value::Ten, Value::King, Value::Five, Value::Three],
            OFFSUIT,
        ));
        assert!(ace_kicker > king_kicker);
    }

    #[test]
    fn test_oracle_picks_best_five_of_seven() {
        let hole = [card(Value::Ace, Suit::Spade), card(Value::Ace, Suit::Heart)];
        let board = [
            card(Value::Ace, Suit::Club),
            card(Value::Ace, Suit::Diamond),
            card(Value::King, Suit::Club),
            card(Value::Two, Suit::Heart),
            card(Value::Three, Suit::Diamond),
        ];
        let value = SevenCardOracle.evaluate(hole, &board);
        assert_eq!(RankClass::FourOfAKind, value.rank);
        // The kicker must be the king, not the two or three.
        assert!(value.best_five.iter().any(|c| c.value == Value::King));
    }

    #[test]
    fn test_oracle_is_deterministic() {
        let hole = [card(Value::Ten, Suit::Spade), card(Value::Jack, Suit::Spade)];
        let board = [
            card(Value::Queen, Suit::Spade),
            card(Value::Two, Suit::Heart),
            card(Value::Seven, Suit::Club),
            card(Value::King, Suit::Spade),
            card(Value::Nine, Suit::Diamond),
        ];
        let a = SevenCardOracle.evaluate(hole, &board);
        let b = SevenCardOracle.evaluate(hole, &board);
        assert_eq!(a, b);
    }

    #[test]
    fn test_full_house_over_flush() {
        let boat = rank_five(&five(
            [Value::Nine, Value::Nine, Value::Nine, Value::Four, Value::Four],
            OFFSUIT,
        ));
        let flush = rank_five(&five(
            [Value::Ace, Value::Jack, Value::Nine, Value::Six, Value::Two],
            [Suit::Diamond; 5],
        ));
        assert_eq!(RankClass::FullHouse, boat.0);
        assert_eq!(RankClass::Flush, flush.0);
        assert!(boat > flush);
    }
}
