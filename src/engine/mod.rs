//! The No-Limit Texas Hold'em hand engine.
//!
//! [`Table`] is the only entry point the hosting layer needs: it owns
//! the hand state, sequences deal, betting streets, and showdown, and
//! returns ordered [`Event`]s from every successful call. The inner
//! components (position assignment, turn order, validation, application,
//! pot layering) are free functions over a mutable [`HandState`]
//! reference and can be driven directly in tests.
//!
//! Every operation is synchronous and side-effect-free on failure.
//! A `Table` holds no shared state, so independent tables may run
//! concurrently as long as each one is mutated by one caller at a time.

/// Chip amounts. Integer only; fractional chips do not exist.
pub type Chips = u64;

pub mod action;
pub mod apply;
pub mod blinds;
pub mod errors;
pub mod event;
pub mod player;
pub mod pot;
pub mod rules;
pub mod state;
pub mod table;
pub mod turn;
pub mod validate;

pub use action::PlayerAction;
pub use apply::apply_action;
pub use blinds::{assign_positions, first_actor_postflop, first_actor_preflop, post_blinds};
pub use errors::EngineError;
pub use event::{AwardReason, Event, PotAward};
pub use player::{Player, PlayerId, PlayerStatus};
pub use pot::{collect_bets, distribute, refund_all};
pub use rules::TableRules;
pub use state::{HandState, Pot, PotKind, RecordedAction, Street, TablePhase};
pub use table::{PrivateState, PublicPlayer, PublicState, Table};
pub use turn::{hand_over, next_actor_after, round_closed};
pub use validate::check_action;
