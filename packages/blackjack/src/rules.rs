use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Payout multiplier as a ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRatio {
    pub numerator: u16,
    pub denominator: u16,
}

impl PayoutRatio {
    pub const THREE_TO_TWO: Self = Self {
        numerator: 3,
        denominator: 2,
    };
    pub const SIX_TO_FIVE: Self = Self {
        numerator: 6,
        denominator: 5,
    };
    pub const ONE_TO_ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };
    pub const ONE_HALF: Self = Self {
        numerator: 1,
        denominator: 2,
    };

    pub fn new(numerator: u16, denominator: u16) -> Result<Self, EngineError> {
        if denominator == 0 {
            return Err(EngineError::InvalidRules("Denominator cannot be zero".to_string()));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Rounds down.
    pub fn calculate_payout(&self, bet: u64) -> u64 {
        let scaled = bet as u128 * self.numerator as u128 / self.denominator.max(1) as u128;
        scaled.min(u64::MAX as u128) as u64
    }
}

/// House rules for a single-hand round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    /// Number of decks in the shoe
    pub num_decks: u8,

    /// Blackjack payout multiplier (commonly 3:2 or 6:5)
    pub blackjack_payout: PayoutRatio,

    /// Dealer draws while below this total, soft or hard
    pub dealer_stands_on: u8,

    /// Reshuffle a reused pack before a round when fewer cards remain
    pub reshuffle_below: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            num_decks: 6,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
            dealer_stands_on: 17,
            reshuffle_below: 52,
        }
    }
}

impl GameRules {
    pub fn single_deck() -> Self {
        Self {
            num_decks: 1,
            ..Self::default()
        }
    }

    pub fn six_to_five() -> Self {
        Self {
            blackjack_payout: PayoutRatio::SIX_TO_FIVE,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.num_decks == 0 {
            return Err(EngineError::InvalidRules("Shoe needs at least one deck".to_string()));
        }
        if self.blackjack_payout.denominator == 0 {
            return Err(EngineError::InvalidRules("Denominator cannot be zero".to_string()));
        }
        if !(2..=21).contains(&self.dealer_stands_on) {
            return Err(EngineError::InvalidRules(format!(
                "Dealer stand total {} outside 2..=21",
                self.dealer_stands_on
            )));
        }
        let needed = self.max_cards_per_round();
        if self.reshuffle_below < needed {
            return Err(EngineError::InvalidRules(format!(
                "Reshuffle threshold {} is below the {needed} cards one round can draw",
                self.reshuffle_below
            )));
        }
        Ok(())
    }

    /// Most cards a single round can draw from a shoe of `num_decks`.
    ///
    /// Every card but the last one each side takes keeps that side's hard
    /// total (aces as 1) at most 21 for the player and below
    /// `dealer_stands_on` for a dealer who draws. A dealer who never draws
    /// holds one such card worth at most 10. The bound counts how many of
    /// the shoe's lowest cards fit under both totals combined.
    pub fn max_cards_per_round(&self) -> usize {
        let dealer = u32::from(self.dealer_stands_on).saturating_sub(1).max(10);
        let mut budget = 21 + dealer;
        let mut count = 0;
        for hard_value in 1..=10u32 {
            let per_deck = if hard_value == 10 { 16 } else { 4 };
            for _ in 0..per_deck * usize::from(self.num_decks) {
                if hard_value > budget {
                    return count + 2;
                }
                budget -= hard_value;
                count += 1;
            }
        }
        count + 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payout_ratio_three_to_two() {
        let ratio = PayoutRatio::THREE_TO_TWO;
        assert_eq!(ratio.calculate_payout(100), 150);
        assert_eq!(ratio.calculate_payout(10), 15);
        assert_eq!(ratio.calculate_payout(5), 7);
    }

    #[test]
    fn test_payout_ratio_six_to_five() {
        let ratio = PayoutRatio::SIX_TO_FIVE;
        assert_eq!(ratio.calculate_payout(100), 120);
        assert_eq!(ratio.calculate_payout(50), 60);
    }

    #[test]
    fn test_payout_ratio_one_half() {
        assert_eq!(PayoutRatio::ONE_HALF.calculate_payout(100), 50);
        assert_eq!(PayoutRatio::ONE_HALF.calculate_payout(7), 3);
    }

    #[test]
    fn test_payout_ratio_does_not_overflow() {
        assert_eq!(PayoutRatio::ONE_TO_ONE.calculate_payout(u64::MAX), u64::MAX);
        assert_eq!(PayoutRatio::THREE_TO_TWO.calculate_payout(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_payout_ratio_zero_denominator() {
        assert!(PayoutRatio::new(3, 0).is_err());
    }

    #[test]
    fn test_default_rules() {
        let rules = GameRules::default();
        assert_eq!(rules.blackjack_payout, PayoutRatio::THREE_TO_TWO);
        assert_eq!(rules.dealer_stands_on, 17);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_invalid_rules() {
        let rules = GameRules {
            num_decks: 0,
            ..GameRules::default()
        };
        assert!(rules.validate().is_err());

        let rules = GameRules {
            dealer_stands_on: 25,
            ..GameRules::default()
        };
        assert!(rules.validate().is_err());

        let rules = GameRules {
            num_decks: 1,
            reshuffle_below: 0,
            ..GameRules::default()
        };
        assert!(matches!(rules.validate(), Err(EngineError::InvalidRules(_))));
    }

    #[test]
    fn test_max_cards_per_round() {
        // 4 aces, 4 twos, 4 threes and 3 fours fit under 21 + 16, plus the two busting cards
        assert_eq!(GameRules::single_deck().max_cards_per_round(), 17);
        // 24 aces and 6 twos
        assert_eq!(GameRules::default().max_cards_per_round(), 32);

        let rules = GameRules {
            num_decks: 1,
            reshuffle_below: 17,
            ..GameRules::default()
        };
        assert!(rules.validate().is_ok());
        let rules = GameRules {
            reshuffle_below: 16,
            ..rules
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(GameRules::single_deck().validate().is_ok());
        assert!(GameRules::six_to_five().validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(GameRules::single_deck().num_decks, 1);
        assert_eq!(GameRules::six_to_five().blackjack_payout, PayoutRatio::SIX_TO_FIVE);
    }
}
