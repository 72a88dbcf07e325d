//! Error types for the duel engine.
//!
//! Two distinct families live here:
//!
//! - [`EngineError`]: fatal, internal errors. These indicate a malformed card
//!   definition, a corrupted state, or a programming error. They are returned
//!   as `Err` and the game state is not rolled back.
//! - [`IllegalReason`]: why a requested action was rejected. An illegal action
//!   is an expected outcome, never an `Err`, and never mutates state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{CardId, PlayReq};
use crate::core::{EntityId, PlayerId};
use crate::tasks::EntityType;
use crate::zones::Zone;

/// Fatal engine error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown card id: {0}")]
    UnknownCard(CardId),

    #[error("card {0} is registered twice")]
    DuplicateCard(CardId),

    #[error("card {0} has no enchantment definition")]
    NotAnEnchantment(CardId),

    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("{entity} is not a {expected}")]
    WrongKind {
        entity: EntityId,
        expected: &'static str,
    },

    #[error("entity selector {0:?} cannot be resolved")]
    UnknownEntityType(EntityType),

    #[error("task stack was read before any task populated it")]
    MalformedStack,

    #[error("play requirement code {0} is not handled")]
    UnhandledPlayRequirement(u32),

    #[error("{zone:?} zone of {player} is full (capacity {capacity})")]
    ZoneFull {
        player: PlayerId,
        zone: Zone,
        capacity: usize,
    },

    #[error("{0} is already placed in a zone")]
    AlreadyPlaced(EntityId),

    #[error("{0} is not placed in any zone")]
    NotPlaced(EntityId),

    #[error("reaction depth limit of {0} exceeded")]
    ReactionDepthExceeded(usize),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Why an action was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IllegalReason {
    #[error("the game is over")]
    GameOver,

    #[error("it is not this player's turn")]
    NotActivePlayer,

    #[error("the entity belongs to the other player")]
    NotOwner,

    #[error("the entity is not in a zone it can be played from")]
    WrongZone,

    #[error("this kind of entity cannot be played")]
    NotPlayable,

    #[error("not enough mana (cost {cost}, available {available})")]
    NotEnoughMana { cost: i32, available: i32 },

    #[error("the board is full")]
    BoardFull,

    #[error("a copy of this secret is already active")]
    SecretAlreadyActive,

    #[error("the hero power was already used this turn")]
    HeroPowerUsed,

    #[error("a target is required")]
    MissingTarget,

    #[error("the chosen target is not valid")]
    InvalidTarget,

    #[error("play requirement {0:?} is not met")]
    RequirementNotMet(PlayReq),

    #[error("this character cannot attack")]
    CannotAttack,
}

/// Outcome of a legality check: `Ok(())` when permitted.
pub type Legality = std::result::Result<(), IllegalReason>;
