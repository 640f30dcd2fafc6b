//! Card primitives shared by the engine: cards, decks, seat bitsets,
//! and the hand-ranking oracle seam.

mod card;
mod deck;
mod rank;
mod seat_set;

pub use card::{Card, Suit, Value};
pub use deck::{Deck, DeckError};
pub use rank::{HandValue, RankClass, RankOracle, SevenCardOracle};
pub use seat_set::{SeatSet, MAX_SEATS};
