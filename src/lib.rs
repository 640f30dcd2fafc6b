//! An authoritative rules engine for single hands of No-Limit Texas
//! Hold'em.
//!
//! The crate covers everything between "start a hand" and "the pots are
//! paid": button and blind assignment, turn order, action validation and
//! application, exact multi-way side pot accounting, and showdown
//! settlement through a pluggable hand-ranking oracle. Dealing is driven
//! by a caller-supplied deck, so a live shuffle and a scripted replay
//! run the identical code path.
//!
//! ```
//! use holdem_engine::core::Deck;
//! use holdem_engine::engine::{PlayerAction, Table, TableRules};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut table = Table::new(TableRules::standard(10, 20));
//! let alice = table.seat_player("alice", 1000).unwrap();
//! let bob = table.seat_player("bob", 1000).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! table.start_hand(Deck::shuffled(&mut rng)).unwrap();
//!
//! // Heads-up the button posts the small blind and acts first.
//! let first = table.state().current_turn.unwrap();
//! assert!(first == alice || first == bob);
//! table.apply_action(first, PlayerAction::Fold).unwrap();
//! ```
//!
//! What this crate deliberately does not do: table discovery or
//! matchmaking, timers, chat, persistence, or any wire protocol. The
//! hosting layer serializes action submissions per table and fans the
//! returned [`engine::Event`]s out however it likes.

pub mod core;
pub mod engine;
