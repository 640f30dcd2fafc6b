use core::fmt;

use tracing::{debug, info};

use crate::core::{Card, Deck, RankOracle, SevenCardOracle};

use super::action::PlayerAction;
use super::apply::apply_action;
use super::blinds::{assign_positions, first_actor_postflop, first_actor_preflop, post_blinds};
use super::errors::EngineError;
use super::event::Event;
use super::player::{Player, PlayerId, PlayerStatus};
use super::pot::{collect_bets, distribute, refund_all};
use super::rules::TableRules;
use super::state::{HandState, Pot, Street, TablePhase};
use super::turn::{hand_over, next_actor_after, round_closed};
use super::validate::check_action;
use super::Chips;

/// One player as visible to everyone at the table. Hole cards are
/// replaced by a `has_cards` flag.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicPlayer {
    pub id: PlayerId,
    pub name: String,
    pub chips: Chips,
    pub seat: usize,
    pub status: PlayerStatus,
    pub current_bet: Chips,
    pub total_bet: Chips,
    pub has_cards: bool,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
}

/// The full table state minus every player's hole cards.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PublicState {
    pub street: Street,
    pub phase: TablePhase,
    pub players: Vec<PublicPlayer>,
    pub button_idx: usize,
    pub community: Vec<Card>,
    pub current_turn: Option<PlayerId>,
    pub amount_to_call: Chips,
    pub min_raise: Chips,
    pub pots: Vec<Pot>,
}

/// One player's own hole cards, and nothing else.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivateState {
    pub player: PlayerId,
    pub hole_cards: Option<[Card; 2]>,
}

/// The hand orchestrator and the hosting layer's only entry point.
///
/// Owns the [`HandState`] exclusively; every mutation goes through a
/// method that validates first and applies second, so a rejected call
/// leaves the state untouched. Successful calls return the ordered
/// [`Event`]s the hosting layer should fan out. The table itself keeps
/// no event log and no history across hands beyond seats and stacks.
///
/// One table must be driven by one logical caller at a time; separate
/// tables are fully independent.
pub struct Table {
    rules: TableRules,
    state: HandState,
    deck: Option<Deck>,
    oracle: Box<dyn RankOracle + Send>,
    next_player_id: u32,
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("rules", &self.rules)
            .field("state", &self.state)
            .field("deck", &self.deck)
            .finish_non_exhaustive()
    }
}

impl Table {
    /// A table ranking showdowns with the default [`SevenCardOracle`].
    pub fn new(rules: TableRules) -> Self {
        Self::with_oracle(rules, Box::new(SevenCardOracle))
    }

    /// A table with a caller-supplied ranking oracle. The oracle must be
    /// deterministic for identical inputs.
    pub fn with_oracle(rules: TableRules, oracle: Box<dyn RankOracle + Send>) -> Self {
        Self {
            rules,
            state: HandState::new(),
            deck: None,
            oracle,
            next_player_id: 0,
        }
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn state(&self) -> &HandState {
        &self.state
    }

    /// Seat a new player between hands. Returns the assigned id, stable
    /// for as long as the player stays seated.
    pub fn seat_player(
        &mut self,
        name: impl Into<String>,
        buy_in: Chips,
    ) -> Result<PlayerId, EngineError> {
        if self.state.phase != TablePhase::Waiting {
            return Err(EngineError::WrongPhase);
        }
        if self.state.players.len() >= self.rules.max_players {
            return Err(EngineError::TableFull);
        }
        if buy_in < self.rules.min_buy_in || buy_in > self.rules.max_buy_in {
            return Err(EngineError::InvalidBuyIn {
                amount: buy_in,
                min: self.rules.min_buy_in,
                max: self.rules.max_buy_in,
            });
        }

        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;
        let seat = self.state.players.len();
        let player = Player::new(id, name, buy_in, seat);
        info!(player = %id, seat, buy_in, "player seated");
        self.state.players.push(player);
        Ok(id)
    }

    /// Remove a player between hands. Returns the stack they leave with.
    pub fn unseat_player(&mut self, id: PlayerId) -> Result<Chips, EngineError> {
        if self.state.phase != TablePhase::Waiting {
            return Err(EngineError::WrongPhase);
        }
        let seat = self
            .state
            .seat_of(id)
            .ok_or(EngineError::UnknownPlayer(id))?;
        let player = self.state.players.remove(seat);
        for (i, p) in self.state.players.iter_mut().enumerate() {
            p.seat = i;
        }
        if seat < self.state.button_idx {
            self.state.button_idx -= 1;
        } else if self.state.button_idx >= self.state.players.len() {
            self.state.button_idx = 0;
        }
        info!(player = %id, chips = player.chips, "player left");
        Ok(player.chips)
    }

    /// Start a new hand: move the button, post blinds, deal hole cards,
    /// and hand the turn to the first pre-flop actor.
    ///
    /// The caller supplies the deck, shuffled or scripted, so live play
    /// and deterministic replay drive the identical path. Blind posts
    /// that put players all-in immediately run the board out.
    pub fn start_hand(&mut self, deck: Deck) -> Result<Vec<Event>, EngineError> {
        if self.state.phase != TablePhase::Waiting {
            return Err(EngineError::WrongPhase);
        }

        self.state.reset_for_hand();
        assign_positions(&mut self.state)?;
        post_blinds(&mut self.state, &self.rules);

        let mut deck = deck;
        let n = self.state.players.len();
        for step in 1..=n {
            let seat = (self.state.button_idx + step) % n;
            if !self.state.players[seat].status.contests_pots() {
                continue;
            }
            let cards = deck.deal_many(2)?;
            self.state.players[seat].hole_cards = Some([cards[0], cards[1]]);
        }
        self.deck = Some(deck);
        self.state.phase = TablePhase::Playing;
        self.state.street = Street::Preflop;
        self.state.current_turn = first_actor_preflop(&self.state);

        info!(
            button = self.state.button_idx,
            players = n,
            "hand started"
        );
        let mut events = vec![Event::StreetAdvanced {
            street: Street::Preflop,
        }];
        if round_closed(&self.state) {
            // Blind posts left at most one player able to act.
            self.drive(&mut events)?;
        } else if let Some(player) = self.state.current_turn {
            events.push(Event::TurnChanged { player });
        }
        Ok(events)
    }

    /// Submit one action for one player: the atomic validate-then-apply
    /// entry point. A rejected action returns the error and changes
    /// nothing; an accepted one mutates state and returns the events it
    /// caused, through street advances and showdown if it closed them.
    pub fn apply_action(
        &mut self,
        player_id: PlayerId,
        action: PlayerAction,
    ) -> Result<Vec<Event>, EngineError> {
        check_action(&self.state, &self.rules, player_id, &action)?;
        apply_action(&mut self.state, &self.rules, player_id, action);

        let mut events = Vec::new();
        self.drive(&mut events)?;
        Ok(events)
    }

    /// Abandon the hand in progress and refund everything: uncollected
    /// bets to their owners, formed pots split among their eligible
    /// players. For host-side shutdowns, not for game flow.
    pub fn abort_hand(&mut self) -> Result<Vec<Event>, EngineError> {
        if self.state.phase != TablePhase::Playing {
            return Err(EngineError::WrongPhase);
        }
        let awards = refund_all(&mut self.state);
        info!(awards = awards.len(), "hand aborted and refunded");
        let mut events = vec![Event::PotsDistributed { awards }];
        self.finish_hand(&mut events);
        Ok(events)
    }

    /// Everything at the table except hole cards.
    pub fn public_state(&self) -> PublicState {
        PublicState {
            street: self.state.street,
            phase: self.state.phase,
            players: self
                .state
                .players
                .iter()
                .map(|p| PublicPlayer {
                    id: p.id,
                    name: p.name.clone(),
                    chips: p.chips,
                    seat: p.seat,
                    status: p.status,
                    current_bet: p.current_bet,
                    total_bet: p.total_bet,
                    has_cards: p.hole_cards.is_some(),
                    is_dealer: p.is_dealer,
                    is_small_blind: p.is_small_blind,
                    is_big_blind: p.is_big_blind,
                })
                .collect(),
            button_idx: self.state.button_idx,
            community: self.state.community.clone(),
            current_turn: self.state.current_turn,
            amount_to_call: self.state.amount_to_call,
            min_raise: self.state.min_raise,
            pots: self.state.pots.clone(),
        }
    }

    /// One player's own hole cards.
    pub fn private_state_for(&self, id: PlayerId) -> Result<PrivateState, EngineError> {
        let player = self
            .state
            .player(id)
            .ok_or(EngineError::UnknownPlayer(id))?;
        Ok(PrivateState {
            player: id,
            hole_cards: player.hole_cards,
        })
    }

    /// Advance the hand as far as it can go without further input:
    /// close rounds, collect pots, deal streets (looping through an
    /// all-in runout), and settle at showdown or when one player is
    /// left. Stops as soon as some player owes a decision.
    fn drive(&mut self, events: &mut Vec<Event>) -> Result<(), EngineError> {
        loop {
            if hand_over(&self.state) {
                collect_bets(&mut self.state);
                self.settle(events);
                return Ok(());
            }
            if !round_closed(&self.state) {
                let next = next_actor_after(&self.state, self.state.current_turn);
                self.state.current_turn = next;
                if let Some(player) = next {
                    events.push(Event::TurnChanged { player });
                }
                return Ok(());
            }

            events.push(Event::RoundClosed {
                street: self.state.street,
            });
            collect_bets(&mut self.state);

            if self.state.street == Street::River {
                self.state.street = Street::Showdown;
                self.state.current_turn = None;
                events.push(Event::ShowdownStarted);
                self.settle(events);
                return Ok(());
            }

            let street = self.state.street.next();
            self.state
                .begin_street(street, self.rules.base_min_raise());
            events.push(Event::StreetAdvanced { street });

            let deck = self
                .deck
                .as_mut()
                .expect("deck is present while a hand is in progress");
            match street {
                Street::Flop => {
                    let cards = deck.deal_many(3)?;
                    let flop = [cards[0], cards[1], cards[2]];
                    self.state.community.extend_from_slice(&flop);
                    events.push(Event::FlopDealt(flop));
                }
                Street::Turn => {
                    let card = deck.deal_one()?;
                    self.state.community.push(card);
                    events.push(Event::TurnDealt(card));
                }
                Street::River => {
                    let card = deck.deal_one()?;
                    self.state.community.push(card);
                    events.push(Event::RiverDealt(card));
                }
                Street::Preflop | Street::Showdown => unreachable!("streets advance in order"),
            }
            debug!(street = %street, "street dealt");

            self.state.current_turn = first_actor_postflop(&self.state);
            if let Some(player) = self.state.current_turn {
                if !round_closed(&self.state) {
                    events.push(Event::TurnChanged { player });
                    return Ok(());
                }
            }
            // Nobody can act: keep running the board out.
        }
    }

    /// Distribute every pot and close out the hand.
    fn settle(&mut self, events: &mut Vec<Event>) {
        let awards = distribute(&mut self.state, self.oracle.as_ref());
        events.push(Event::PotsDistributed { awards });
        self.finish_hand(events);
    }

    fn finish_hand(&mut self, events: &mut Vec<Event>) {
        self.state.phase = TablePhase::Waiting;
        self.state.current_turn = None;
        self.deck = None;
        events.push(Event::HandFinished);

        let funded = self
            .state
            .players
            .iter()
            .filter(|p| p.chips > 0)
            .count();
        info!(funded, "hand finished");
        if funded < 2 {
            events.push(Event::GameEnded);
        }
    }
}
