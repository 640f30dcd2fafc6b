use super::Chips;

/// Read-only table configuration.
///
/// The engine derives a per-street minimum raise on hand state but never
/// mutates the rules. Validating the configuration itself (blind ratios,
/// buy-in bounds against bankrolls, ...) is the hosting layer's job.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRules {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_raise: Chips,
    pub max_players: usize,
    pub min_buy_in: Chips,
    pub max_buy_in: Chips,
}

impl TableRules {
    /// Conventional cash-game defaults derived from the blinds:
    /// min raise one big blind, buy-ins between 20 and 100 big blinds.
    pub fn standard(small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            small_blind,
            big_blind,
            min_raise: big_blind,
            max_players: 9,
            min_buy_in: big_blind * 20,
            max_buy_in: big_blind * 100,
        }
    }

    /// The minimum raise increment at the start of every street.
    pub fn base_min_raise(&self) -> Chips {
        self.min_raise.max(self.big_blind)
    }
}
