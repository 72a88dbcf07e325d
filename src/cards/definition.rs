//! Card templates - static card data.
//!
//! A `CardTemplate` holds the immutable properties of a card: its base tags,
//! play requirements, effect task lists keyed by activation, and optional
//! enchantment, aura and trigger definitions. Templates are shared by every
//! entity created from them and never change during a game.
//!
//! Instance-specific data (damage taken, zone, order of play, attached
//! enchantments) lives on the `Entity`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::requirement::PlayReq;
use crate::core::tags::{GameTag, TagStore};
use crate::enchants::{AuraDef, EnchantDef};
use crate::tasks::{Task, TaskList};
use crate::triggers::TriggerDef;

/// Unique identifier for a card template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Printed card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Hero,
    Minion,
    /// Spells, including secrets (marked with the `Secret` tag).
    Spell,
    Weapon,
    HeroPower,
    Enchantment,
}

/// When a task list on a template runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerActivation {
    /// Minion or weapon played from hand.
    Battlecry,
    /// Spell cast.
    Spell,
    /// The entity died.
    Deathrattle,
    /// Hero power used.
    HeroPower,
    /// An enchantment made from this card fired at its activation point.
    Enchant,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use ccg_duel::cards::{CardId, CardTemplate, PlayReq, PowerActivation};
/// use ccg_duel::core::GameTag;
/// use ccg_duel::tasks::{EntityType, Task};
///
/// let bolt = CardTemplate::spell(CardId::new(1), "Bolt", 1)
///     .with_requirement(PlayReq::TargetToPlay, 0)
///     .with_power(PowerActivation::Spell, vec![Task::damage(3, EntityType::Target)]);
///
/// assert_eq!(bolt.base(GameTag::Cost), 1);
/// assert!(bolt.takes_target());
/// assert_eq!(bolt.power(PowerActivation::Spell).map(|t| t.len()), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct CardTemplate {
    pub id: CardId,
    pub name: String,
    pub card_type: CardType,
    /// Base tags copied onto every entity created from this card.
    pub tags: TagStore,
    pub requirements: Vec<(PlayReq, i32)>,
    pub entourage: Vec<CardId>,
    pub powers: Vec<(PowerActivation, TaskList)>,
    pub enchant: Option<EnchantDef>,
    pub aura: Option<AuraDef>,
    pub triggers: Vec<TriggerDef>,
}

impl CardTemplate {
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            name: name.into(),
            card_type,
            tags: TagStore::new(),
            requirements: Vec::new(),
            entourage: Vec::new(),
            powers: Vec::new(),
            enchant: None,
            aura: None,
            triggers: Vec::new(),
        }
    }

    #[must_use]
    pub fn minion(id: CardId, name: impl Into<String>, cost: i32, atk: i32, health: i32) -> Self {
        Self::new(id, name, CardType::Minion)
            .with_tag(GameTag::Cost, cost)
            .with_tag(GameTag::Atk, atk)
            .with_tag(GameTag::Health, health)
    }

    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>, cost: i32) -> Self {
        Self::new(id, name, CardType::Spell).with_tag(GameTag::Cost, cost)
    }

    #[must_use]
    pub fn secret(id: CardId, name: impl Into<String>, cost: i32) -> Self {
        Self::spell(id, name, cost).with_tag(GameTag::Secret, 1)
    }

    #[must_use]
    pub fn weapon(id: CardId, name: impl Into<String>, cost: i32, atk: i32, durability: i32) -> Self {
        Self::new(id, name, CardType::Weapon)
            .with_tag(GameTag::Cost, cost)
            .with_tag(GameTag::Atk, atk)
            .with_tag(GameTag::Durability, durability)
    }

    #[must_use]
    pub fn hero(id: CardId, name: impl Into<String>, health: i32) -> Self {
        Self::new(id, name, CardType::Hero).with_tag(GameTag::Health, health)
    }

    #[must_use]
    pub fn hero_power(id: CardId, name: impl Into<String>, cost: i32) -> Self {
        Self::new(id, name, CardType::HeroPower).with_tag(GameTag::Cost, cost)
    }

    #[must_use]
    pub fn enchantment(id: CardId, name: impl Into<String>, def: EnchantDef) -> Self {
        let mut card = Self::new(id, name, CardType::Enchantment);
        card.enchant = Some(def);
        card
    }

    /// Set a base tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: GameTag, value: i32) -> Self {
        self.tags.set(tag, value);
        self
    }

    /// Append a play requirement (builder pattern).
    #[must_use]
    pub fn with_requirement(mut self, req: PlayReq, param: i32) -> Self {
        self.requirements.push((req, param));
        self
    }

    #[must_use]
    pub fn with_entourage(mut self, cards: Vec<CardId>) -> Self {
        self.entourage = cards;
        self
    }

    /// Attach a task list for an activation, replacing any previous one.
    #[must_use]
    pub fn with_power(mut self, activation: PowerActivation, tasks: Vec<Task>) -> Self {
        self.powers.retain(|(a, _)| *a != activation);
        self.powers.push((activation, TaskList::from(tasks)));
        self
    }

    #[must_use]
    pub fn with_aura(mut self, aura: AuraDef) -> Self {
        self.aura = Some(aura);
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerDef) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Base value of a tag.
    #[must_use]
    pub fn base(&self, tag: GameTag) -> i32 {
        self.tags.get(tag)
    }

    /// Task list for an activation.
    #[must_use]
    pub fn power(&self, activation: PowerActivation) -> Option<&TaskList> {
        self.powers
            .iter()
            .find(|(a, _)| *a == activation)
            .map(|(_, tasks)| tasks)
    }

    #[must_use]
    pub fn has_power(&self, activation: PowerActivation) -> bool {
        self.power(activation).is_some()
    }

    /// Parameter of a declared requirement.
    #[must_use]
    pub fn requirement(&self, req: PlayReq) -> Option<i32> {
        self.requirements
            .iter()
            .find(|(r, _)| *r == req)
            .map(|&(_, param)| param)
    }

    #[must_use]
    pub fn has_requirement(&self, req: PlayReq) -> bool {
        self.requirement(req).is_some()
    }

    /// Whether playing this card involves choosing a target at all.
    #[must_use]
    pub fn takes_target(&self) -> bool {
        self.has_requirement(PlayReq::TargetToPlay) || self.has_requirement(PlayReq::TargetIfAvailable)
    }

    #[must_use]
    pub fn is_secret(&self) -> bool {
        self.card_type == CardType::Spell && self.tags.flag(GameTag::Secret)
    }
}

/// Shared handle to a template.
pub type CardRef = Arc<CardTemplate>;
