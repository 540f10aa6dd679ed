use std::collections::HashMap;

use blackjack::GameRules;
use serde::{Deserialize, Serialize};

pub type GuildId = u64;
pub type PlayerId = u64;

/// A player's seat at one guild's table. At most one round is active per seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatKey {
    pub guild: GuildId,
    pub player: PlayerId,
}

impl SeatKey {
    pub fn new(guild: GuildId, player: PlayerId) -> Self {
        Self { guild, player }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub min_bet: u64,
    pub rules: GameRules,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            min_bet: 10,
            rules: GameRules::default(),
        }
    }
}

/// Per-guild balances the table gates bets against and settles into.
pub trait BalanceStore {
    fn balance(&self, seat: SeatKey) -> u64;

    /// Applies a signed delta and returns the new balance, floored at zero.
    fn apply(&mut self, seat: SeatKey, delta: i64) -> u64;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    balances: HashMap<SeatKey, u64>,
    starting_balance: u64,
}

impl MemoryLedger {
    /// Seats that have never been seen start with `starting_balance`.
    pub fn new(starting_balance: u64) -> Self {
        Self {
            balances: HashMap::new(),
            starting_balance,
        }
    }

    pub fn set_balance(&mut self, seat: SeatKey, balance: u64) {
        self.balances.insert(seat, balance);
    }
}

impl BalanceStore for MemoryLedger {
    fn balance(&self, seat: SeatKey) -> u64 {
        self.balances
            .get(&seat)
            .copied()
            .unwrap_or(self.starting_balance)
    }

    fn apply(&mut self, seat: SeatKey, delta: i64) -> u64 {
        let current = self.balance(seat) as i128;
        let updated = (current + delta as i128).clamp(0, u64::MAX as i128) as u64;
        self.balances.insert(seat, updated);
        updated
    }
}
