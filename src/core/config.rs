//! Game configuration.
//!
//! A duel is configured once at construction:
//! - `PlayerSetup`: hero, hero power and deck list for one player
//! - `ZoneCapacities`: size limits for bounded zones
//! - `GameConfig`: everything else (seed, starting hands, mana cap, logging,
//!   reaction depth limit)
//!
//! ```
//! use ccg_duel::cards::CardId;
//! use ccg_duel::core::{GameConfig, PlayerId, PlayerSetup};
//!
//! let setup = PlayerSetup::new(CardId::new(1), CardId::new(2))
//!     .with_deck(vec![CardId::new(10); 30]);
//!
//! let config = GameConfig::new(setup.clone(), setup)
//!     .with_seed(7)
//!     .with_starting_hand(PlayerId::SECOND, 4)
//!     .with_logging(false);
//!
//! assert_eq!(config.seed, 7);
//! assert_eq!(config.starting_hand[PlayerId::FIRST], 3);
//! assert_eq!(config.capacities.board, 7);
//! ```

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerMap};
use crate::cards::CardId;
use crate::zones::Zone;

/// Size limits for bounded zones. Other zones are unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCapacities {
    pub deck: usize,
    pub hand: usize,
    pub board: usize,
    pub secret: usize,
}

impl Default for ZoneCapacities {
    fn default() -> Self {
        Self {
            deck: 60,
            hand: 10,
            board: 7,
            secret: 5,
        }
    }
}

impl ZoneCapacities {
    /// Limit for a zone kind; `None` when unbounded.
    #[must_use]
    pub fn capacity(&self, zone: Zone) -> Option<usize> {
        match zone {
            Zone::Deck => Some(self.deck),
            Zone::Hand => Some(self.hand),
            Zone::Board => Some(self.board),
            Zone::Secret => Some(self.secret),
            Zone::Play | Zone::Graveyard | Zone::Setaside | Zone::Invalid => None,
        }
    }
}

/// One participant's starting material.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub hero: CardId,
    pub hero_power: CardId,
    /// Deck list; the last card is on top before shuffling.
    pub deck: Vec<CardId>,
}

impl PlayerSetup {
    #[must_use]
    pub fn new(hero: CardId, hero_power: CardId) -> Self {
        Self {
            hero,
            hero_power,
            deck: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_deck(mut self, deck: Vec<CardId>) -> Self {
        self.deck = deck;
        self
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub players: PlayerMap<PlayerSetup>,

    /// Seed for the game's RNG.
    pub seed: u64,

    /// Shuffle decks during setup.
    pub shuffle_decks: bool,

    /// Cards drawn before the first turn.
    pub starting_hand: PlayerMap<usize>,

    /// Who takes the first turn.
    pub first_player: PlayerId,

    /// Mana crystal cap.
    pub max_mana: i32,

    pub capacities: ZoneCapacities,

    /// Send engine logs to `tracing`. When off, a null sink is installed.
    pub logging: bool,

    /// Maximum nesting of reaction sequences before the engine gives up.
    pub max_reaction_depth: usize,

    /// Draw starting hands and begin the first turn during construction.
    pub auto_start: bool,
}

impl GameConfig {
    /// Configuration with the default rules for the given players.
    #[must_use]
    pub fn new(first: PlayerSetup, second: PlayerSetup) -> Self {
        Self {
            players: PlayerMap::from_pair(first, second),
            seed: 0,
            shuffle_decks: true,
            starting_hand: PlayerMap::from_pair(3, 4),
            first_player: PlayerId::FIRST,
            max_mana: 10,
            capacities: ZoneCapacities::default(),
            logging: true,
            max_reaction_depth: 64,
            auto_start: true,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle_decks = shuffle;
        self
    }

    #[must_use]
    pub fn with_starting_hand(mut self, player: PlayerId, cards: usize) -> Self {
        self.starting_hand[player] = cards;
        self
    }

    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = player;
        self
    }

    #[must_use]
    pub fn with_max_mana(mut self, max_mana: i32) -> Self {
        self.max_mana = max_mana;
        self
    }

    #[must_use]
    pub fn with_capacities(mut self, capacities: ZoneCapacities) -> Self {
        self.capacities = capacities;
        self
    }

    #[must_use]
    pub fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }

    #[must_use]
    pub fn with_max_reaction_depth(mut self, depth: usize) -> Self {
        self.max_reaction_depth = depth;
        self
    }

    /// Leave the game in its pre-game state; the caller starts it with
    /// `Game::start`.
    #[must_use]
    pub fn without_auto_start(mut self) -> Self {
        self.auto_start = false;
        self
    }
}
