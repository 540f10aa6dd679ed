pub mod execute;
pub mod query;

use std::collections::HashMap;

use blackjack::{CardPack, GameRules, RoundEngine};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::error::TableError;
use crate::state::{BalanceStore, GuildId, SeatKey, TableConfig};

/// Active rounds for every seat, keyed per (guild, player).
///
/// All methods take `&mut self`, so a host serving several players from
/// multiple threads wraps the table in one `Mutex` and every action is
/// serialized. Each seat keeps its own shoe; no pack is ever drawn from by
/// two rounds.
pub struct Table<S: BalanceStore> {
    store: S,
    configs: HashMap<GuildId, TableConfig>,
    default_config: TableConfig,
    rounds: HashMap<SeatKey, RoundEngine>,
    shoes: HashMap<SeatKey, CardPack>,
    rng: ChaCha20Rng,
}

impl<S: BalanceStore> Table<S> {
    pub fn new(store: S) -> Self {
        Self::with_rng(store, ChaCha20Rng::from_entropy())
    }

    /// Reproducible shuffles, for replays and tests.
    pub fn seeded(store: S, seed: u64) -> Self {
        Self::with_rng(store, ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_rng(store: S, rng: ChaCha20Rng) -> Self {
        Self {
            store,
            configs: HashMap::new(),
            default_config: TableConfig::default(),
            rounds: HashMap::new(),
            shoes: HashMap::new(),
            rng,
        }
    }

    /// Config for guilds that were never configured.
    pub fn set_default_config(&mut self, config: TableConfig) -> Result<(), TableError> {
        config.rules.validate()?;
        self.default_config = config;
        Ok(())
    }

    pub fn configure(&mut self, guild: GuildId, config: TableConfig) -> Result<(), TableError> {
        config.rules.validate()?;
        log::info!("Guild {guild}: min bet {}, {} deck(s)", config.min_bet, config.rules.num_decks);
        self.configs.insert(guild, config);
        Ok(())
    }

    pub fn config(&self, guild: GuildId) -> &TableConfig {
        self.configs.get(&guild).unwrap_or(&self.default_config)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn active_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_in_game(&self, seat: SeatKey) -> bool {
        self.rounds.contains_key(&seat)
    }

    /// Drops an unfinished round without settling it. Returns whether one existed.
    pub fn abandon(&mut self, seat: SeatKey) -> bool {
        match self.rounds.remove(&seat) {
            Some(round) => {
                log::info!(
                    "Abandoned round for player {} in guild {} at {:?}",
                    seat.player,
                    seat.guild,
                    round.phase()
                );
                self.shoes.insert(seat, round.into_pack());
                true
            }
            None => false,
        }
    }

    /// The seat's shoe from its last round, reshuffled if running low, or a new one.
    fn take_pack(&mut self, seat: SeatKey, rules: &GameRules) -> Result<CardPack, TableError> {
        match self.shoes.remove(&seat) {
            Some(mut pack) if pack.num_decks() == rules.num_decks => {
                if pack.ensure_capacity(rules.reshuffle_below, &mut self.rng) {
                    log::debug!("Reshuffled shoe for player {}", seat.player);
                }
                Ok(pack)
            }
            _ => Ok(CardPack::shuffled(rules.num_decks, &mut self.rng)?),
        }
    }
}
