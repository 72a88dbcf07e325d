//! Auras.
//!
//! An aura is declared on a card template and is active while an entity made
//! from that card sits in the aura's zone and is not silenced. Contributions
//! are never stored: every derived read scans the active aura sources and
//! asks each whether the entity being read is in scope. When a source leaves
//! its zone, the next read simply stops seeing it.

use serde::{Deserialize, Serialize};

use super::enchantment::{fold_effects, TagEffect};
use crate::cards::{CardType, Entity};
use crate::core::entity::EntityId;
use crate::core::tags::GameTag;
use crate::zones::Zone;

/// Which entities an aura reaches, relative to its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuraScope {
    FriendlyMinions,
    OtherFriendlyMinions,
    /// Friendly minions directly left or right of the source.
    AdjacentMinions,
    EnemyMinions,
    AllMinions,
    FriendlyHero,
    FriendlyWeapon,
    /// Cards in the source controller's hand.
    FriendlyHand,
}

/// Aura declared on a card template.
///
/// ```
/// use ccg_duel::core::GameTag;
/// use ccg_duel::enchants::{AuraDef, AuraScope};
/// use ccg_duel::zones::Zone;
///
/// let raid_leader = AuraDef::new(AuraScope::OtherFriendlyMinions).add(GameTag::Atk, 1);
/// assert_eq!(raid_leader.zone, Zone::Board);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuraDef {
    /// Zone the source must be in for the aura to be active.
    pub zone: Zone,
    pub scope: AuraScope,
    /// Only entities of this card type are affected.
    pub card_type: Option<CardType>,
    pub effects: Vec<TagEffect>,
}

impl AuraDef {
    #[must_use]
    pub fn new(scope: AuraScope) -> Self {
        Self {
            zone: Zone::Board,
            scope,
            card_type: None,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn in_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    #[must_use]
    pub fn for_card_type(mut self, card_type: CardType) -> Self {
        self.card_type = Some(card_type);
        self
    }

    #[must_use]
    pub fn add(mut self, tag: GameTag, value: i32) -> Self {
        self.effects.push(TagEffect::add(tag, value));
        self
    }

    #[must_use]
    pub fn set(mut self, tag: GameTag, value: i32) -> Self {
        self.effects.push(TagEffect::set(tag, value));
        self
    }

    /// Whether `source` currently projects this aura.
    #[must_use]
    pub fn is_active(&self, source: &Entity) -> bool {
        source.zone() == self.zone && !source.is_silenced()
    }

    /// Whether `target` is in scope of this aura projected by `source`.
    ///
    /// `hero` and `weapon` are the source controller's hero and equipped
    /// weapon, if any. Only raw tags are read, so scope checks never recurse
    /// into derived values.
    #[must_use]
    pub fn reaches(
        &self,
        source: &Entity,
        target: &Entity,
        hero: Option<EntityId>,
        weapon: Option<EntityId>,
    ) -> bool {
        if let Some(card_type) = self.card_type {
            if target.card().card_type != card_type {
                return false;
            }
        }

        let friendly = source.controller == target.controller;
        let on_board = target.is_minion() && target.zone() == Zone::Board;

        match self.scope {
            AuraScope::FriendlyMinions => friendly && on_board,
            AuraScope::OtherFriendlyMinions => friendly && on_board && source.id != target.id,
            AuraScope::AdjacentMinions => {
                friendly
                    && on_board
                    && source.zone() == Zone::Board
                    && source.zone_position().abs_diff(target.zone_position()) == 1
            }
            AuraScope::EnemyMinions => !friendly && on_board,
            AuraScope::AllMinions => on_board,
            AuraScope::FriendlyHero => Some(target.id) == hero,
            AuraScope::FriendlyWeapon => Some(target.id) == weapon,
            AuraScope::FriendlyHand => friendly && target.zone() == Zone::Hand,
        }
    }

    /// Contribution of this aura to a read of `tag`.
    #[must_use]
    pub fn apply(&self, tag: GameTag, value: i32) -> i32 {
        fold_effects(&self.effects, tag, value, 1)
    }
}
