use super::Table;
use crate::error::TableError;
use crate::game_logic::to_response;
use crate::msg::{BalanceResponse, RoundResponse};
use crate::state::{BalanceStore, SeatKey};

impl<S: BalanceStore> Table<S> {
    pub fn query_round(&self, seat: SeatKey) -> Result<RoundResponse, TableError> {
        let round = self.rounds.get(&seat).ok_or(TableError::NoActiveRound)?;
        Ok(to_response(round, self.store.balance(seat)))
    }

    pub fn query_balance(&self, seat: SeatKey) -> BalanceResponse {
        BalanceResponse {
            balance: self.store.balance(seat),
            in_game: self.is_in_game(seat),
        }
    }
}
