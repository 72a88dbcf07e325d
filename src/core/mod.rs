//! Core engine types: ids, players, tags, configuration, controllers,
//! actions, the game state itself and its snapshots.
//!
//! Everything above this module (zones, cards, enchantments, triggers, tasks
//! and rules) reads and mutates state through [`Game`].

pub mod action;
pub mod config;
pub mod controller;
pub mod entity;
pub mod player;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod tags;

pub use action::{Action, ActionOutcome, ActionRecord};
pub use config::{GameConfig, PlayerSetup, ZoneCapacities};
pub use controller::Controller;
pub use entity::EntityId;
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use snapshot::{EntitySnapshot, Snapshot, ZoneSnapshot};
pub use state::{Game, GameResult, GameStatus};
pub use tags::{GameTag, TagStore};
