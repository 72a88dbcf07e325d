//! Entities - mutable game objects.
//!
//! An `Entity` is one instance of a card template in a game: a hero, a
//! minion, a spell in hand, an equipped weapon, the proxy created by a ritual.
//! It carries its own [`TagStore`] (seeded from the template's base tags) and
//! the enchantments attached to it.
//!
//! Cross-entity links (the hero's weapon, an enchantment's source) are stored
//! as ids and resolved through the game's arena, so cloning an entity never
//! aliases another one.

use serde::{Deserialize, Serialize};

use super::definition::{CardId, CardRef, CardType};
use crate::core::entity::EntityId;
use crate::core::player::PlayerId;
use crate::core::tags::{GameTag, TagStore};
use crate::enchants::Enchantment;
use crate::zones::Zone;

/// Closed set of entity kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Hero,
    Minion,
    Spell,
    Secret,
    Weapon,
    HeroPower,
    Enchantment,
}

impl EntityKind {
    /// Heroes and minions: things with health that can attack and be attacked.
    #[must_use]
    pub const fn is_character(self) -> bool {
        matches!(self, EntityKind::Hero | EntityKind::Minion)
    }

    /// Things with a cost and an order of play.
    #[must_use]
    pub const fn is_playable(self) -> bool {
        matches!(
            self,
            EntityKind::Minion
                | EntityKind::Spell
                | EntityKind::Secret
                | EntityKind::Weapon
                | EntityKind::HeroPower
        )
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EntityKind::Hero => "hero",
            EntityKind::Minion => "minion",
            EntityKind::Spell => "spell",
            EntityKind::Secret => "secret",
            EntityKind::Weapon => "weapon",
            EntityKind::HeroPower => "hero power",
            EntityKind::Enchantment => "enchantment",
        }
    }
}

/// A game object.
#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub controller: PlayerId,
    card: CardRef,
    pub tags: TagStore,
    pub enchantments: Vec<Enchantment>,
}

impl Entity {
    /// Create an unplaced entity from a template. Base tags are copied so the
    /// entity's own store is authoritative from the start.
    #[must_use]
    pub fn new(id: EntityId, controller: PlayerId, card: CardRef) -> Self {
        let tags = card.tags.clone();
        Self {
            id,
            controller,
            card,
            tags,
            enchantments: Vec::new(),
        }
    }

    #[must_use]
    pub fn card(&self) -> &CardRef {
        &self.card
    }

    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.card.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.card.name
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self.card.card_type {
            CardType::Hero => EntityKind::Hero,
            CardType::Minion => EntityKind::Minion,
            CardType::Spell if self.tags.flag(GameTag::Secret) => EntityKind::Secret,
            CardType::Spell => EntityKind::Spell,
            CardType::Weapon => EntityKind::Weapon,
            CardType::HeroPower => EntityKind::HeroPower,
            CardType::Enchantment => EntityKind::Enchantment,
        }
    }

    #[must_use]
    pub fn is_character(&self) -> bool {
        self.kind().is_character()
    }

    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.kind().is_playable()
    }

    #[must_use]
    pub fn is_minion(&self) -> bool {
        self.kind() == EntityKind::Minion
    }

    /// Raw tag read, without enchantment or aura contributions.
    #[must_use]
    pub fn get(&self, tag: GameTag) -> i32 {
        self.tags.get(tag)
    }

    #[must_use]
    pub fn zone(&self) -> Zone {
        Zone::from_tag(self.tags.get(GameTag::Zone))
    }

    #[must_use]
    pub fn zone_position(&self) -> usize {
        self.tags.get(GameTag::ZonePosition).max(0) as usize
    }

    /// Order of play, or 0 if the entity never entered play.
    #[must_use]
    pub fn order_of_play(&self) -> i32 {
        self.tags.get(GameTag::OrderOfPlay)
    }

    #[must_use]
    pub fn is_silenced(&self) -> bool {
        self.tags.flag(GameTag::Silenced)
    }

    #[must_use]
    pub fn is_to_be_destroyed(&self) -> bool {
        self.tags.flag(GameTag::ToBeDestroyed)
    }

    /// Deathrattle that would fire if the entity died now.
    #[must_use]
    pub fn has_active_deathrattle(&self) -> bool {
        !self.is_silenced() && self.card.has_power(super::PowerActivation::Deathrattle)
    }

    /// Attached ongoing enchantment made from `card`.
    #[must_use]
    pub fn ongoing_enchantment(&self, card: CardId) -> Option<&Enchantment> {
        self.enchantments
            .iter()
            .find(|e| e.card == card && e.is_ongoing())
    }

    pub fn ongoing_enchantment_mut(&mut self, card: CardId) -> Option<&mut Enchantment> {
        self.enchantments
            .iter_mut()
            .find(|e| e.card == card && e.is_ongoing())
    }
}
