use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use super::card::{Card, Suit, Value};

/// Errors from dealing out of a deck.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum DeckError {
    #[error("the deck has no cards left to deal")]
    Exhausted,
}

/// An exhaustible card supplier, shuffled once per hand.
///
/// The engine treats the deck as opaque: a live shuffled deck and a
/// scripted replay deck are interchangeable, so the same engine drives
/// both live play and deterministic replay.
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use holdem_engine::core::Deck;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let mut deck = Deck::shuffled(&mut rng);
/// assert_eq!(52, deck.remaining());
/// deck.deal_one().unwrap();
/// assert_eq!(51, deck.remaining());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    // Stored in reverse deal order so dealing is a pop.
    cards: Vec<Card>,
}

impl Deck {
    /// A full 52-card deck shuffled with the given RNG.
    pub fn shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut cards: Vec<Card> = Value::ALL
            .iter()
            .flat_map(|v| Suit::ALL.iter().map(move |s| Card::new(*v, *s)))
            .collect();
        cards.shuffle(rng);
        Self { cards }
    }

    /// A scripted deck that deals the given cards in order.
    /// Used for deterministic replays and tests.
    pub fn scripted(mut cards: Vec<Card>) -> Self {
        cards.reverse();
        Self { cards }
    }

    /// How many cards are left.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Deal the next card.
    pub fn deal_one(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Exhausted)
    }

    /// Deal `n` cards in order. Fails without dealing anything if the
    /// deck holds fewer than `n` cards.
    pub fn deal_many(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if self.cards.len() < n {
            return Err(DeckError::Exhausted);
        }
        Ok((0..n).map(|_| self.cards.pop().unwrap()).collect())
    }
}
