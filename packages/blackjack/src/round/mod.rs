use serde::{Deserialize, Serialize};
use std::fmt;

use crate::hand::calculate_hand_value;
use crate::outcome::resolve;
use crate::{Card, CardPack, EngineError, GameRules, Hand, Outcome};

/// Current phase of the round. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    AwaitingFirstDeal,
    PlayerTurn,
    DealerTurn,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Deal,
    Hit,
    Stand,
    Double,
    Surrender,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Deal => "deal",
            Action::Hit => "hit",
            Action::Stand => "stand",
            Action::Double => "double",
            Action::Surrender => "surrender",
        };
        f.write_str(name)
    }
}

/// One player against the dealer, from the opening deal to settlement.
///
/// The engine owns the pack it draws from. Callers persist the engine between
/// actions (it is serde-serializable) and apply [`RoundEngine::net_payout`] to
/// their own balance store once the round is finished.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundEngine {
    original_bet: u64,
    bet: u64,
    player_hand: Hand,
    dealer_hand: Hand,
    phase: Phase,
    has_doubled: bool,
    history: Vec<Action>,
    outcome: Option<Outcome>,
    rules: GameRules,
    pack: CardPack,
}

impl RoundEngine {
    pub fn new(bet: u64, pack: CardPack, rules: GameRules) -> Result<Self, EngineError> {
        if bet == 0 {
            return Err(EngineError::InvalidBet);
        }
        rules.validate()?;

        Ok(Self {
            original_bet: bet,
            bet,
            player_hand: Hand::new(),
            dealer_hand: Hand::new(),
            phase: Phase::AwaitingFirstDeal,
            has_doubled: false,
            history: Vec::new(),
            outcome: None,
            rules,
            pack,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Current stake, doubled once if the player doubled down.
    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn original_bet(&self) -> u64 {
        self.original_bet
    }

    pub fn has_doubled(&self) -> bool {
        self.has_doubled
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn history(&self) -> &[Action] {
        &self.history
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn cards_remaining(&self) -> usize {
        self.pack.remaining()
    }

    /// Dealer cards the player may see: the up-card only until the round is finished.
    pub fn visible_dealer_cards(&self) -> &[Card] {
        let cards = self.dealer_hand.cards();
        if self.is_finished() {
            cards
        } else {
            &cards[..cards.len().min(1)]
        }
    }

    pub fn visible_dealer_value(&self) -> u8 {
        calculate_hand_value(self.visible_dealer_cards())
    }

    /// Net change to the player's balance. `None` until the round is finished.
    pub fn net_payout(&self) -> Option<i64> {
        self.outcome
            .map(|outcome| outcome.settle(self.original_bet, self.bet, &self.rules))
    }

    pub fn can_double(&self) -> bool {
        self.phase == Phase::PlayerTurn && self.player_hand.len() == 2
    }

    pub fn available_actions(&self) -> Vec<Action> {
        match self.phase {
            Phase::AwaitingFirstDeal => vec![Action::Deal],
            Phase::PlayerTurn if self.can_double() => {
                vec![Action::Hit, Action::Stand, Action::Double, Action::Surrender]
            }
            Phase::PlayerTurn => vec![Action::Hit, Action::Stand, Action::Surrender],
            Phase::DealerTurn | Phase::Finished => Vec::new(),
        }
    }

    /// Hands the pack back so it can be reused for the next round.
    pub fn into_pack(self) -> CardPack {
        self.pack
    }

    pub fn deal(&mut self) -> Result<(), EngineError> {
        self.require(Action::Deal, Phase::AwaitingFirstDeal)?;

        let player = [self.draw()?, self.draw()?];
        let dealer = [self.draw()?, self.draw()?];
        for card in player {
            self.player_hand.add(card);
        }
        for card in dealer {
            self.dealer_hand.add(card);
        }
        self.history.push(Action::Deal);
        log::debug!(
            "Dealt player {} ({}), dealer up-card {}",
            self.player_hand.cards().iter().map(Card::to_display).collect::<Vec<_>>().join(" "),
            self.player_hand.value(),
            dealer[0]
        );

        // Both hands are checked for naturals regardless of the dealer's up-card
        if self.player_hand.is_blackjack() || self.dealer_hand.is_blackjack() {
            let outcome = resolve(&self.player_hand, &self.dealer_hand, &self.history);
            self.finish(outcome);
        } else {
            self.transition(Phase::PlayerTurn);
        }
        Ok(())
    }

    pub fn hit(&mut self) -> Result<(), EngineError> {
        self.require(Action::Hit, Phase::PlayerTurn)?;

        let card = self.draw()?;
        self.player_hand.add(card);
        self.history.push(Action::Hit);
        log::debug!("Player hits {card}, total {}", self.player_hand.value());

        if self.player_hand.is_bust() {
            self.finish(Outcome::PlayerBust);
        }
        Ok(())
    }

    pub fn stand(&mut self) -> Result<(), EngineError> {
        self.require(Action::Stand, Phase::PlayerTurn)?;
        self.history.push(Action::Stand);
        self.play_dealer()
    }

    /// Doubles the stake, takes exactly one card, then stands unless that card busts.
    pub fn double(&mut self) -> Result<(), EngineError> {
        self.require(Action::Double, Phase::PlayerTurn)?;
        if self.player_hand.len() != 2 {
            return Err(self.reject(Action::Double));
        }

        let card = self.draw()?;
        self.bet = self.original_bet.saturating_mul(2);
        self.has_doubled = true;
        self.player_hand.add(card);
        self.history.push(Action::Double);
        log::debug!("Player doubles to {} and draws {card}", self.bet);

        if self.player_hand.is_bust() {
            self.finish(Outcome::PlayerBust);
            return Ok(());
        }
        self.play_dealer()
    }

    pub fn surrender(&mut self) -> Result<(), EngineError> {
        self.require(Action::Surrender, Phase::PlayerTurn)?;
        self.history.push(Action::Surrender);
        self.finish(Outcome::Surrender);
        Ok(())
    }

    fn play_dealer(&mut self) -> Result<(), EngineError> {
        self.transition(Phase::DealerTurn);
        while self.dealer_hand.value() < self.rules.dealer_stands_on {
            let card = self.draw()?;
            self.dealer_hand.add(card);
        }
        log::debug!("Dealer stands at {}", self.dealer_hand.value());

        let outcome = resolve(&self.player_hand, &self.dealer_hand, &self.history);
        self.finish(outcome);
        Ok(())
    }

    fn draw(&mut self) -> Result<Card, EngineError> {
        self.pack.draw().inspect_err(|_| {
            log::error!("Pack exhausted during {:?}", self.phase);
        })
    }

    fn require(&self, action: Action, phase: Phase) -> Result<(), EngineError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(self.reject(action))
        }
    }

    fn reject(&self, action: Action) -> EngineError {
        log::warn!("Rejected {action} during {:?}", self.phase);
        EngineError::InvalidAction {
            action,
            phase: self.phase,
        }
    }

    fn transition(&mut self, next: Phase) {
        debug_assert!(next > self.phase, "phase moved from {:?} to {next:?}", self.phase);
        log::debug!("Round phase {:?} -> {next:?}", self.phase);
        self.phase = next;
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        self.transition(Phase::Finished);
        log::debug!("Round finished: {outcome:?}, net {:?}", self.net_payout());
    }
}
