//! Player actions.
//!
//! An `Action` is one decision a player submits: play a card, attack, use
//! the hero power, or end the turn. Applying an action yields an
//! [`ActionOutcome`]; an illegal action is reported, not raised, and leaves
//! the game untouched.
//!
//! ## Example
//!
//! ```
//! use ccg_duel::core::{Action, EntityId};
//!
//! let play = Action::play(EntityId(12)).with_target(EntityId(3));
//! assert_eq!(play.source(), Some(EntityId(12)));
//! assert_eq!(play.target(), Some(EntityId(3)));
//!
//! assert_eq!(Action::EndTurn.source(), None);
//! ```

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;
use crate::error::IllegalReason;

/// A player decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from hand. `position` is the board slot for minions.
    PlayCard {
        source: EntityId,
        target: Option<EntityId>,
        position: Option<usize>,
    },
    Attack {
        attacker: EntityId,
        defender: EntityId,
    },
    HeroPower {
        target: Option<EntityId>,
    },
    EndTurn,
}

impl Action {
    /// Play a card with no target at the rightmost slot.
    #[must_use]
    pub const fn play(source: EntityId) -> Self {
        Action::PlayCard {
            source,
            target: None,
            position: None,
        }
    }

    #[must_use]
    pub const fn attack(attacker: EntityId, defender: EntityId) -> Self {
        Action::Attack { attacker, defender }
    }

    #[must_use]
    pub const fn hero_power(target: Option<EntityId>) -> Self {
        Action::HeroPower { target }
    }

    /// Set the target of a play or hero power action (builder pattern).
    #[must_use]
    pub fn with_target(mut self, new_target: EntityId) -> Self {
        match &mut self {
            Action::PlayCard { target, .. } | Action::HeroPower { target } => {
                *target = Some(new_target);
            }
            Action::Attack { .. } | Action::EndTurn => {}
        }
        self
    }

    /// Set the board slot of a play action (builder pattern).
    #[must_use]
    pub fn at_position(mut self, slot: usize) -> Self {
        if let Action::PlayCard { position, .. } = &mut self {
            *position = Some(slot);
        }
        self
    }

    /// The acting entity (card played or attacker), if any.
    #[must_use]
    pub fn source(&self) -> Option<EntityId> {
        match *self {
            Action::PlayCard { source, .. } => Some(source),
            Action::Attack { attacker, .. } => Some(attacker),
            Action::HeroPower { .. } | Action::EndTurn => None,
        }
    }

    /// The chosen target, if any.
    #[must_use]
    pub fn target(&self) -> Option<EntityId> {
        match *self {
            Action::PlayCard { target, .. } | Action::HeroPower { target } => target,
            Action::Attack { defender, .. } => Some(defender),
            Action::EndTurn => None,
        }
    }
}

/// Result of applying an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Applied,
    Illegal(IllegalReason),
}

impl ActionOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied)
    }
}

/// An applied action in the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: Action,
    pub turn: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32) -> Self {
        Self { player, action, turn }
    }
}
