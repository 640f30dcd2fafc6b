use core::fmt;
use std::fmt::Display;

/// Card values, ordered from `Two` (lowest) to `Ace` (highest).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Value {
    /// Every value in ascending order.
    pub const ALL: [Value; 13] = [
        Value::Two,
        Value::Three,
        Value::Four,
        Value::Five,
        Value::Six,
        Value::Seven,
        Value::Eight,
        Value::Nine,
        Value::Ten,
        Value::Jack,
        Value::Queen,
        Value::King,
        Value::Ace,
    ];

    /// Zero-based index of this value (`Two` is 0, `Ace` is 12).
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Single bit for this value, used for straight detection.
    pub fn bit(self) -> u32 {
        1 << self.index()
    }

    fn to_char(self) -> char {
        match self {
            Value::Two => '2',
            Value::Three => '3',
            Value::Four => '4',
            Value::Five => '5',
            Value::Six => '6',
            Value::Seven => '7',
            Value::Eight => '8',
            Value::Nine => '9',
            Value::Ten => 'T',
            Value::Jack => 'J',
            Value::Queen => 'Q',
            Value::King => 'K',
            Value::Ace => 'A',
        }
    }
}

/// The four suits. Suit never affects hand strength.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    /// Every suit.
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    fn to_char(self) -> char {
        match self {
            Suit::Club => 'c',
            Suit::Diamond => 'd',
            Suit::Heart => 'h',
            Suit::Spade => 's',
        }
    }
}

/// A single playing card.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    pub value: Value,
    pub suit: Suit,
}

impl Card {
    pub fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_ordering() {
        assert!(Value::Ace > Value::King);
        assert!(Value::Three > Value::Two);
        assert_eq!(Value::Two.index(), 0);
        assert_eq!(Value::Ace.index(), 12);
    }

    #[test]
    fn test_card_display() {
        let c = Card::new(Value::Ace, Suit::Spade);
        assert_eq!("As", format!("{c}"));
        let c = Card::new(Value::Ten, Suit::Diamond);
        assert_eq!("Td", format!("{c}"));
    }

    #[test]
    fn test_value_bits_distinct() {
        let mut seen = 0u32;
        for v in Value::ALL {
            assert_eq!(0, seen & v.bit());
            seen |= v.bit();
        }
        assert_eq!(0b1_1111_1111_1111, seen);
    }
}
