//! # ccg-duel
//!
//! A deterministic rules engine for two-player trading-card duels, built to
//! be cloned and replayed by search clients.
//!
//! ## Design Principles
//!
//! 1. **Tag-Indexed State**: every game object is an entity with a map from
//!    [`GameTag`] to integer. Heroes, minions, spells, weapons and hero
//!    powers share one representation.
//!
//! 2. **Effects as Data**: card effects are ordered lists of [`Task`]s run
//!    against an explicit context. Reactions are queued as events and drained
//!    between tasks, in order of play.
//!
//! 3. **Non-Destructive Buffs**: enchantments and auras are folded into
//!    derived reads; the raw tags of an entity are never overwritten by them.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so a search
//!   branch is a plain `clone()`.
//!
//! - **Explicit RNG**: each game owns a seeded ChaCha8 generator. Clones
//!   replay identically; `Game::branch` forks a diverging stream.
//!
//! ## Modules
//!
//! - `core`: ids, players, tags, configuration, controllers, game state,
//!   actions and snapshots
//! - `zones`: ordered per-player containers with capacities
//! - `cards`: card templates, the card database, entities and typed views
//! - `enchants`: enchantments, auras and the derived-value overlay
//! - `triggers`: lifecycle events, trigger conditions and registration
//! - `tasks`: the task catalog and the sequence/reaction engine
//! - `rules`: rule blocks, targeting, validation and the action surface
//! - `logging`: pluggable log sinks
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use ccg_duel::{Action, CardDatabase, CardId, CardTemplate, Game, GameConfig, PlayerId, PlayerSetup};
//!
//! let mut db = CardDatabase::new();
//! db.register(CardTemplate::hero(CardId::new(1), "Hero", 30)).unwrap();
//! db.register(CardTemplate::hero_power(CardId::new(2), "Power", 2)).unwrap();
//! db.register(CardTemplate::minion(CardId::new(3), "Wisp", 0, 1, 1)).unwrap();
//!
//! let setup = PlayerSetup::new(CardId::new(1), CardId::new(2)).with_deck(vec![CardId::new(3); 10]);
//! let config = GameConfig::new(setup.clone(), setup).with_logging(false);
//! let mut game = Game::new(config, Arc::new(db)).unwrap();
//!
//! let first = game.legal_actions(PlayerId::FIRST).next().unwrap();
//! assert!(game.apply_action(PlayerId::FIRST, &first).unwrap().is_applied());
//! ```

pub mod cards;
pub mod core;
pub mod enchants;
pub mod error;
pub mod logging;
pub mod rules;
pub mod tasks;
pub mod triggers;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionOutcome, ActionRecord, Controller, EntityId, Game, GameConfig, GameResult, GameRng,
    GameRngState, GameStatus, GameTag, PlayerId, PlayerMap, PlayerSetup, Snapshot, TagStore, ZoneCapacities,
};

pub use crate::zones::{Zone, ZoneKey, ZoneManager, ZonePosition};

pub use crate::cards::{CardDatabase, CardId, CardTemplate, CardType, Character, Entity, EntityKind, PlayReq, Playable, PowerActivation};

pub use crate::enchants::{AuraDef, AuraScope, EnchantDef, Enchantment, EnchantmentActivation, RemovalPolicy};

pub use crate::triggers::{EventKind, GameEvent, TriggerCondition, TriggerDef, TriggerManager};

pub use crate::tasks::{Amount, EntityType, SelfCondition, Task, TaskContext, TaskStack, TaskState};

pub use crate::error::{EngineError, IllegalReason, Legality, Result};
pub use crate::logging::{LogLevel, LogSink, NullSink, RecordingSink, TracingSink};
