mod card;
mod error;
mod hand;
mod outcome;
mod pack;
mod round;
mod rules;

pub use card::{standard_deck, Card, Rank, Suit};
pub use error::EngineError;
pub use hand::{calculate_hand_value, is_soft_hand, Hand};
pub use outcome::{resolve, Outcome};
pub use pack::CardPack;
pub use round::{Action, Phase, RoundEngine};
pub use rules::{GameRules, PayoutRatio};
