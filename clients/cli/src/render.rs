use blackjack::{Card, Phase};
use blackjack_table::msg::{BalanceResponse, RoundResponse};
use blackjack_table::TableConfig;

fn cards(cards: &[Card]) -> String {
    cards.iter().map(Card::to_display).collect::<Vec<_>>().join(" ")
}

pub fn round(response: &RoundResponse) -> String {
    let mut dealer = cards(&response.dealer_cards);
    if response.phase != Phase::Finished && !response.dealer_cards.is_empty() {
        dealer.push_str(" ??");
    }

    let mut out = format!(
        "Your hand: {} ({})\nDealer:    {} ({})\n",
        cards(&response.player_cards),
        response.player_value,
        dealer,
        response.dealer_value
    );

    match (response.outcome, response.net_payout) {
        (Some(outcome), Some(net)) => {
            out.push_str(&format!(
                "{outcome}: {net:+} coins. Balance: {}\n",
                response.balance
            ));
        }
        _ => {
            let actions: Vec<String> = response
                .available_actions
                .iter()
                .map(|a| a.to_string())
                .collect();
            out.push_str(&format!("Bet: {} | {}\n", response.bet, actions.join(", ")));
        }
    }
    out
}

pub fn balance(response: &BalanceResponse) -> String {
    if response.in_game {
        format!("Balance: {} (round in progress)", response.balance)
    } else {
        format!("Balance: {}", response.balance)
    }
}

pub fn rules(config: &TableConfig) -> String {
    let rules = &config.rules;
    format!(
        "Decks: {}\nMinimum bet: {}\nBlackjack pays {}:{}\nDealer stands on {}\nReshuffle below {} cards\nSurrender returns half the bet\n",
        rules.num_decks,
        config.min_bet,
        rules.blackjack_payout.numerator,
        rules.blackjack_payout.denominator,
        rules.dealer_stands_on,
        rules.reshuffle_below
    )
}
