use crate::Card;
use serde::{Deserialize, Serialize};

/// Best total not exceeding 21, counting aces as 11 until that would bust.
pub fn calculate_hand_value(cards: &[Card]) -> u8 {
    let mut total: u16 = 0;
    let mut aces = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += card.value() as u16;
    }

    // Adjust for aces
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total.min(u8::MAX as u16) as u8
}

/// Check if a hand is soft (has an ace counted as 11)
pub fn is_soft_hand(cards: &[Card]) -> bool {
    let hard_total: u16 = cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { c.value() as u16 })
        .sum();
    cards.iter().any(|c| c.is_ace()) && hard_total + 10 <= 21
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u8 {
        calculate_hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    /// Two cards totaling 21. Only the opening deal can produce one.
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21
    }
}
