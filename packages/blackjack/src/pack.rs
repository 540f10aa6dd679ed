use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::card::standard_deck;
use crate::{Card, EngineError};

/// A shoe of one or more standard decks, drawn from the front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPack {
    cards: VecDeque<Card>,
    num_decks: u8,
}

impl CardPack {
    /// Builds and shuffles `num_decks` decks using an entropy-seeded ChaCha20 stream.
    pub fn new(num_decks: u8) -> Result<Self, EngineError> {
        Self::shuffled(num_decks, &mut ChaCha20Rng::from_entropy())
    }

    /// Same as [`CardPack::new`] but reproducible from `seed`.
    pub fn seeded(num_decks: u8, seed: u64) -> Result<Self, EngineError> {
        Self::shuffled(num_decks, &mut ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn shuffled<R: Rng + ?Sized>(num_decks: u8, rng: &mut R) -> Result<Self, EngineError> {
        if num_decks == 0 {
            return Err(EngineError::InvalidRules("Pack needs at least one deck".to_string()));
        }
        let mut pack = Self {
            cards: VecDeque::new(),
            num_decks,
        };
        pack.reshuffle(rng);
        Ok(pack)
    }

    /// A stacked pack that deals `cards` in the given order.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let num_decks = cards.len().div_ceil(52).max(1).min(u8::MAX as usize) as u8;
        Self {
            cards: cards.into(),
            num_decks,
        }
    }

    pub fn draw(&mut self) -> Result<Card, EngineError> {
        self.cards.pop_front().ok_or(EngineError::EmptyPack)
    }

    /// Restores the full composition and applies a Fisher-Yates shuffle.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut cards: Vec<Card> = (0..self.num_decks).flat_map(|_| standard_deck()).collect();
        cards.shuffle(rng);
        self.cards = cards.into();
        log::debug!("Reshuffled pack of {} deck(s)", self.num_decks);
    }

    /// Reshuffles ahead of a round when fewer than `min_cards` remain.
    pub fn ensure_capacity<R: Rng + ?Sized>(&mut self, min_cards: usize, rng: &mut R) -> bool {
        if self.cards.len() >= min_cards {
            return false;
        }
        self.reshuffle(rng);
        true
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn num_decks(&self) -> u8 {
        self.num_decks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use std::collections::HashMap;

    #[test]
    fn test_new_pack_has_full_composition() {
        let pack = CardPack::seeded(2, 7).unwrap();
        assert_eq!(pack.remaining(), 104);
        let mut counts: HashMap<Card, usize> = HashMap::new();
        for card in &pack.cards {
            *counts.entry(*card).or_default() += 1;
        }
        assert_eq!(counts.len(), 52);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_zero_decks_rejected() {
        assert!(matches!(CardPack::new(0), Err(EngineError::InvalidRules(_))));
    }

    #[test]
    fn test_draw_removes_front_card() {
        let ace = Card::new(Rank::Ace, Suit::Spades);
        let king = Card::new(Rank::King, Suit::Hearts);
        let mut pack = CardPack::from_cards(vec![ace, king]);
        assert_eq!(pack.draw(), Ok(ace));
        assert_eq!(pack.draw(), Ok(king));
        assert_eq!(pack.draw(), Err(EngineError::EmptyPack));
    }

    #[test]
    fn test_single_deck_never_repeats_a_card() {
        let mut pack = CardPack::new(1).unwrap();
        let mut seen = std::collections::HashSet::new();
        while let Ok(card) = pack.draw() {
            assert!(seen.insert(card), "{card} dealt twice");
        }
        assert_eq!(seen.len(), 52);
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = CardPack::seeded(6, 42).unwrap();
        let b = CardPack::seeded(6, 42).unwrap();
        let c = CardPack::seeded(6, 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_ensure_capacity_reshuffles_only_when_low() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut pack = CardPack::shuffled(1, &mut rng).unwrap();
        assert!(!pack.ensure_capacity(20, &mut rng));
        for _ in 0..40 {
            pack.draw().unwrap();
        }
        assert_eq!(pack.remaining(), 12);
        assert!(pack.ensure_capacity(20, &mut rng));
        assert_eq!(pack.remaining(), 52);
    }
}
