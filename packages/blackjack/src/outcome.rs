use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Action, GameRules, Hand, PayoutRatio};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerBlackjack,
    DealerBlackjack,
    Push,
    PlayerBust,
    DealerBust,
    PlayerHigher,
    DealerHigher,
    Surrender,
}

impl Outcome {
    pub fn is_player_win(&self) -> bool {
        matches!(self, Outcome::PlayerBlackjack | Outcome::DealerBust | Outcome::PlayerHigher)
    }

    /// Net amount for the player. Even-money results use `stake` (the bet after any
    /// double); blackjack and surrender are paid on the original bet.
    pub fn settle(&self, original_bet: u64, stake: u64, rules: &GameRules) -> i64 {
        match self {
            Outcome::PlayerBlackjack => to_signed(rules.blackjack_payout.calculate_payout(original_bet)),
            Outcome::Surrender => -to_signed(PayoutRatio::ONE_HALF.calculate_payout(original_bet)),
            Outcome::Push => 0,
            Outcome::DealerBust | Outcome::PlayerHigher => to_signed(stake),
            Outcome::DealerBlackjack | Outcome::PlayerBust | Outcome::DealerHigher => -to_signed(stake),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Outcome::PlayerBlackjack => "Blackjack! You win",
            Outcome::DealerBlackjack => "Dealer has blackjack",
            Outcome::Push => "Push",
            Outcome::PlayerBust => "Bust",
            Outcome::DealerBust => "Dealer busts, you win",
            Outcome::PlayerHigher => "You win",
            Outcome::DealerHigher => "Dealer wins",
            Outcome::Surrender => "Surrendered",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

fn to_signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

/// Maps a terminal pair of hands and the player's actions to an outcome.
pub fn resolve(player: &Hand, dealer: &Hand, history: &[Action]) -> Outcome {
    if history.contains(&Action::Surrender) {
        return Outcome::Surrender;
    }

    let took_cards = history.iter().any(|a| matches!(a, Action::Hit | Action::Double));
    let player_natural = player.is_blackjack() && !took_cards;
    let dealer_natural = dealer.is_blackjack();

    match (player_natural, dealer_natural) {
        (true, true) => return Outcome::Push,
        (true, false) => return Outcome::PlayerBlackjack,
        (false, true) => return Outcome::DealerBlackjack,
        (false, false) => {}
    }

    if player.is_bust() {
        return Outcome::PlayerBust;
    }
    if dealer.is_bust() {
        return Outcome::DealerBust;
    }

    let (player_value, dealer_value) = (player.value(), dealer.value());
    if player_value > dealer_value {
        Outcome::PlayerHigher
    } else if dealer_value > player_value {
        Outcome::DealerHigher
    } else {
        Outcome::Push
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Rank, Suit};

    fn hand(ranks: &[Rank]) -> Hand {
        Hand::from_cards(ranks.iter().map(|&r| Card::new(r, Suit::Diamonds)).collect())
    }

    #[test]
    fn test_both_naturals_push() {
        let outcome = resolve(&hand(&[Rank::Ace, Rank::King]), &hand(&[Rank::Ace, Rank::Queen]), &[]);
        assert_eq!(outcome, Outcome::Push);
    }

    #[test]
    fn test_player_natural() {
        let outcome = resolve(&hand(&[Rank::Ace, Rank::Jack]), &hand(&[Rank::Ten, Rank::Nine]), &[]);
        assert_eq!(outcome, Outcome::PlayerBlackjack);
    }

    #[test]
    fn test_dealer_natural() {
        let outcome = resolve(&hand(&[Rank::Ten, Rank::Nine]), &hand(&[Rank::Ace, Rank::Ten]), &[]);
        assert_eq!(outcome, Outcome::DealerBlackjack);
    }

    #[test]
    fn test_surrender_wins_over_hand_contents() {
        let outcome = resolve(
            &hand(&[Rank::Ace, Rank::King]),
            &hand(&[Rank::Two, Rank::Three]),
            &[Action::Deal, Action::Surrender],
        );
        assert_eq!(outcome, Outcome::Surrender);
    }

    #[test]
    fn test_player_bust_before_dealer_bust() {
        let outcome = resolve(
            &hand(&[Rank::Ten, Rank::Six, Rank::Seven]),
            &hand(&[Rank::Ten, Rank::Six, Rank::Nine]),
            &[Action::Deal, Action::Hit],
        );
        assert_eq!(outcome, Outcome::PlayerBust);
    }

    #[test]
    fn test_dealer_bust() {
        let outcome = resolve(
            &hand(&[Rank::Ten, Rank::Two]),
            &hand(&[Rank::Ten, Rank::Six, Rank::Nine]),
            &[Action::Deal, Action::Stand],
        );
        assert_eq!(outcome, Outcome::DealerBust);
    }

    #[test]
    fn test_compare_values() {
        let higher = resolve(&hand(&[Rank::Ten, Rank::Eight]), &hand(&[Rank::Ten, Rank::Seven]), &[Action::Stand]);
        assert_eq!(higher, Outcome::PlayerHigher);

        let lower = resolve(&hand(&[Rank::Ten, Rank::Seven]), &hand(&[Rank::Ten, Rank::Nine]), &[Action::Stand]);
        assert_eq!(lower, Outcome::DealerHigher);

        let tie = resolve(&hand(&[Rank::Ten, Rank::Nine]), &hand(&[Rank::Ten, Rank::Nine]), &[Action::Stand]);
        assert_eq!(tie, Outcome::Push);
    }

    #[test]
    fn test_twenty_one_after_hit_is_not_natural() {
        let outcome = resolve(
            &hand(&[Rank::Ten, Rank::Ace]),
            &hand(&[Rank::Ten, Rank::Eight]),
            &[Action::Deal, Action::Hit],
        );
        assert_eq!(outcome, Outcome::PlayerHigher);
    }

    #[test]
    fn test_settle_table() {
        let rules = GameRules::default();
        assert_eq!(Outcome::PlayerBlackjack.settle(100, 100, &rules), 150);
        assert_eq!(Outcome::DealerBlackjack.settle(100, 100, &rules), -100);
        assert_eq!(Outcome::Push.settle(100, 200, &rules), 0);
        assert_eq!(Outcome::PlayerBust.settle(100, 100, &rules), -100);
        assert_eq!(Outcome::DealerBust.settle(100, 100, &rules), 100);
        assert_eq!(Outcome::PlayerHigher.settle(100, 100, &rules), 100);
        assert_eq!(Outcome::DealerHigher.settle(100, 100, &rules), -100);
        assert_eq!(Outcome::Surrender.settle(100, 100, &rules), -50);
    }

    #[test]
    fn test_settle_doubled_stake() {
        let rules = GameRules::default();
        assert_eq!(Outcome::PlayerHigher.settle(100, 200, &rules), 200);
        assert_eq!(Outcome::PlayerBust.settle(100, 200, &rules), -200);
        assert_eq!(Outcome::DealerBust.settle(100, 200, &rules), 200);
    }

    #[test]
    fn test_settle_six_to_five() {
        let rules = GameRules::six_to_five();
        assert_eq!(Outcome::PlayerBlackjack.settle(100, 100, &rules), 120);
    }
}
