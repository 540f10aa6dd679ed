use std::str::FromStr;

use blackjack::{Action, Card, Outcome, Phase};
use serde::{Deserialize, Serialize};

use crate::error::TableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetAmount {
    /// Everything the player currently holds
    All,
    Amount(u64),
}

impl FromStr for BetAmount {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(BetAmount::All);
        }
        match s.parse::<i64>() {
            Ok(amount) if amount > 0 => Ok(BetAmount::Amount(amount as u64)),
            _ => Err(TableError::InvalidBet(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Start { bet: BetAmount },
    Hit,
    Stand,
    Double,
    Surrender,
}

impl FromStr for Command {
    type Err = TableError;

    /// Accepts `blackjack <bet|all>` (alias `bj`), `hit`, `stand`, `double`, `surrender`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().unwrap_or_default().to_ascii_lowercase();
        match name.as_str() {
            "blackjack" | "bj" => {
                let bet = words.next().ok_or(TableError::MissingBet)?.parse()?;
                Ok(Command::Start { bet })
            }
            "hit" => Ok(Command::Hit),
            "stand" => Ok(Command::Stand),
            "double" => Ok(Command::Double),
            "surrender" => Ok(Command::Surrender),
            _ => Err(TableError::UnknownCommand(s.trim().to_string())),
        }
    }
}

/// What a player is allowed to see of a round, plus their balance after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResponse {
    pub phase: Phase,
    pub bet: u64,
    pub doubled: bool,
    pub player_cards: Vec<Card>,
    pub player_value: u8,
    pub dealer_cards: Vec<Card>,
    pub dealer_value: u8,
    pub available_actions: Vec<Action>,
    pub outcome: Option<Outcome>,
    pub net_payout: Option<i64>,
    pub balance: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub balance: u64,
    pub in_game: bool,
}
