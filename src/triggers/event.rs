//! Lifecycle events.
//!
//! Mutation primitives never run reactions inline. They enqueue a
//! `GameEvent` on the game, and the task engine drains the queue between
//! top-level tasks, matching each event against registered triggers.
//!
//! ## Event Data
//!
//! - `kind`: what happened
//! - `entity`: the entity it happened to (the dying minion, the damaged
//!   character, the card played)
//! - `player`: controller of `entity` at the time of the event
//! - `order_of_play`: `entity`'s order of play, used to order reactions
//! - `amount`: damage or healing dealt, zero otherwise
//! - `source`: entity that caused it, if any
//! - `from` / `to`: zones for zone changes and deaths

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};
use crate::zones::Zone;

/// Kinds of lifecycle events triggers can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Death,
    EquipWeapon,
    Damage,
    Heal,
    Play,
    TurnStart,
    TurnEnd,
    ZoneChange,
}

/// One lifecycle event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,
    pub entity: EntityId,
    pub player: PlayerId,
    pub order_of_play: i32,
    pub amount: i32,
    pub source: Option<EntityId>,
    pub from: Zone,
    pub to: Zone,
}

impl GameEvent {
    /// Create an event with no amount, source or zones.
    #[must_use]
    pub fn new(kind: EventKind, entity: EntityId, player: PlayerId) -> Self {
        Self {
            kind,
            entity,
            player,
            order_of_play: 0,
            amount: 0,
            source: None,
            from: Zone::Invalid,
            to: Zone::Invalid,
        }
    }

    /// Set the amount (builder pattern).
    #[must_use]
    pub fn with_amount(mut self, amount: i32) -> Self {
        self.amount = amount;
        self
    }

    /// Set the causing entity (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the zones moved between (builder pattern).
    #[must_use]
    pub fn with_zones(mut self, from: Zone, to: Zone) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    #[must_use]
    pub fn with_order_of_play(mut self, order_of_play: i32) -> Self {
        self.order_of_play = order_of_play;
        self
    }
}
