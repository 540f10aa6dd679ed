use thiserror::Error;

use crate::round::{Action, Phase};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Cannot {action} during {phase:?}")]
    InvalidAction { action: Action, phase: Phase },
    #[error("Card pack is empty")]
    EmptyPack,
    #[error("Bet must be a positive amount")]
    InvalidBet,
    #[error("Invalid rules: {0}")]
    InvalidRules(String),
}
