use blackjack::EngineError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("You are already in a game!")]
    AlreadyInGame,

    #[error("You must be in a blackjack game!")]
    NoActiveRound,

    #[error("The minimum bet is {minimum} coins!")]
    BetBelowMinimum { minimum: u64 },

    #[error("You have insufficient funds! Required: {required}, available: {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("Bet must be an integer or all! Got: {0}")]
    InvalidBet(String),

    #[error("You must enter a bet!")]
    MissingBet,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}
