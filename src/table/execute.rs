use blackjack::{Action, CardPack, EngineError, GameRules, RoundEngine};

use super::Table;
use crate::error::TableError;
use crate::game_logic::{required_for_double, to_response};
use crate::msg::{BetAmount, Command, RoundResponse};
use crate::state::{BalanceStore, SeatKey};

impl<S: BalanceStore> Table<S> {
    pub fn execute(&mut self, seat: SeatKey, command: Command) -> Result<RoundResponse, TableError> {
        match command {
            Command::Start { bet } => self.execute_start(seat, bet),
            Command::Hit => self.execute_action(seat, Action::Hit),
            Command::Stand => self.execute_action(seat, Action::Stand),
            Command::Double => self.execute_double(seat),
            Command::Surrender => self.execute_action(seat, Action::Surrender),
        }
    }

    pub fn execute_start(&mut self, seat: SeatKey, bet: BetAmount) -> Result<RoundResponse, TableError> {
        let (bet, rules) = self.check_start(seat, bet)?;
        let pack = self.take_pack(seat, &rules)?;
        self.begin(seat, bet, pack, rules)
    }

    /// Starts a round dealt from `pack` instead of the seat's shoe, e.g. to
    /// replay a recorded deal. The same bet checks apply, and the pack becomes
    /// the seat's shoe once the round settles.
    pub fn execute_start_with_pack(
        &mut self,
        seat: SeatKey,
        bet: BetAmount,
        pack: CardPack,
    ) -> Result<RoundResponse, TableError> {
        let (bet, rules) = self.check_start(seat, bet)?;
        self.begin(seat, bet, pack, rules)
    }

    fn check_start(&self, seat: SeatKey, bet: BetAmount) -> Result<(u64, GameRules), TableError> {
        if self.rounds.contains_key(&seat) {
            return Err(TableError::AlreadyInGame);
        }

        let config = self.config(seat.guild);
        let balance = self.store.balance(seat);
        let bet = match bet {
            BetAmount::All => balance,
            BetAmount::Amount(amount) => amount,
        };

        if bet < config.min_bet {
            return Err(TableError::BetBelowMinimum {
                minimum: config.min_bet,
            });
        }
        if balance < bet {
            return Err(TableError::InsufficientFunds {
                required: bet,
                available: balance,
            });
        }
        Ok((bet, config.rules))
    }

    fn begin(
        &mut self,
        seat: SeatKey,
        bet: u64,
        pack: CardPack,
        rules: GameRules,
    ) -> Result<RoundResponse, TableError> {
        let mut round = RoundEngine::new(bet, pack, rules)?;
        log::info!(
            "Player {} in guild {} starts a round for {bet}",
            seat.player,
            seat.guild
        );

        match round.deal() {
            Ok(()) => Ok(self.conclude(seat, round)),
            Err(err) => Err(self.abort(seat, err)),
        }
    }

    pub fn execute_double(&mut self, seat: SeatKey) -> Result<RoundResponse, TableError> {
        let round = self.rounds.get(&seat).ok_or(TableError::NoActiveRound)?;
        let required = required_for_double(round);
        let available = self.store.balance(seat);
        if available < required {
            return Err(TableError::InsufficientFunds {
                required,
                available,
            });
        }
        self.execute_action(seat, Action::Double)
    }

    fn execute_action(&mut self, seat: SeatKey, action: Action) -> Result<RoundResponse, TableError> {
        let mut round = self.rounds.remove(&seat).ok_or(TableError::NoActiveRound)?;

        let result = match action {
            Action::Deal => round.deal(),
            Action::Hit => round.hit(),
            Action::Stand => round.stand(),
            Action::Double => round.double(),
            Action::Surrender => round.surrender(),
        };

        match result {
            Ok(()) => Ok(self.conclude(seat, round)),
            Err(EngineError::EmptyPack) => Err(self.abort(seat, EngineError::EmptyPack)),
            Err(err) => {
                // Rejected actions leave the round untouched
                self.rounds.insert(seat, round);
                Err(err.into())
            }
        }
    }

    /// Settles a finished round into the store, or parks an unfinished one.
    fn conclude(&mut self, seat: SeatKey, round: RoundEngine) -> RoundResponse {
        if let Some(net) = round.net_payout() {
            let balance = self.store.apply(seat, net);
            log::info!(
                "Player {} in guild {}: {:?}, net {net}, balance {balance}",
                seat.player,
                seat.guild,
                round.outcome()
            );
            let response = to_response(&round, balance);
            self.shoes.insert(seat, round.into_pack());
            response
        } else {
            let response = to_response(&round, self.store.balance(seat));
            self.rounds.insert(seat, round);
            response
        }
    }

    /// Discards a round that cannot continue. Nothing is settled.
    fn abort(&mut self, seat: SeatKey, err: EngineError) -> TableError {
        self.rounds.remove(&seat);
        self.shoes.remove(&seat);
        log::error!(
            "Round for player {} in guild {} aborted: {err}",
            seat.player,
            seat.guild
        );
        err.into()
    }
}
