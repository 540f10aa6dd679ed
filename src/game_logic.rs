use blackjack::RoundEngine;

use crate::msg::RoundResponse;

/// Player-facing view of a round. The dealer's hole card stays hidden until the
/// round is finished.
pub fn to_response(round: &RoundEngine, balance: u64) -> RoundResponse {
    RoundResponse {
        phase: round.phase(),
        bet: round.bet(),
        doubled: round.has_doubled(),
        player_cards: round.player_hand().cards().to_vec(),
        player_value: round.player_hand().value(),
        dealer_cards: round.visible_dealer_cards().to_vec(),
        dealer_value: round.visible_dealer_value(),
        available_actions: round.available_actions(),
        outcome: round.outcome(),
        net_payout: round.net_payout(),
        balance,
    }
}

/// Funds a seat needs to cover the current stake plus a double.
pub fn required_for_double(round: &RoundEngine) -> u64 {
    round.bet().saturating_mul(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack::{Action, Card, CardPack, GameRules, Outcome, Phase, Rank, Suit};

    fn round_with(ranks: &[Rank]) -> RoundEngine {
        let cards = ranks.iter().map(|&r| Card::new(r, Suit::Hearts)).collect();
        let mut round = RoundEngine::new(40, CardPack::from_cards(cards), GameRules::default()).unwrap();
        round.deal().unwrap();
        round
    }

    #[test]
    fn test_response_hides_hole_card() {
        let round = round_with(&[Rank::Ten, Rank::Six, Rank::Nine, Rank::King]);
        let response = to_response(&round, 960);
        assert_eq!(response.phase, Phase::PlayerTurn);
        assert_eq!(response.player_value, 16);
        assert_eq!(response.dealer_cards, vec![Card::new(Rank::Nine, Suit::Hearts)]);
        assert_eq!(response.dealer_value, 9);
        assert_eq!(response.outcome, None);
        assert_eq!(response.net_payout, None);
        assert!(response.available_actions.contains(&Action::Double));
        assert_eq!(response.balance, 960);
    }

    #[test]
    fn test_response_reveals_dealer_when_finished() {
        let mut round = round_with(&[Rank::Ten, Rank::Six, Rank::Nine, Rank::King]);
        round.surrender().unwrap();
        let response = to_response(&round, 980);
        assert_eq!(response.dealer_cards.len(), 2);
        assert_eq!(response.dealer_value, 19);
        assert_eq!(response.outcome, Some(Outcome::Surrender));
        assert_eq!(response.net_payout, Some(-20));
        assert!(response.available_actions.is_empty());
    }

    #[test]
    fn test_required_for_double() {
        let round = round_with(&[Rank::Ten, Rank::Six, Rank::Nine, Rank::King]);
        assert_eq!(required_for_double(&round), 80);
    }
}
