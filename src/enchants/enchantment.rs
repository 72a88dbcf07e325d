//! Enchantments attached to entities.
//!
//! An enchantment is made from an enchantment card's [`EnchantDef`] and
//! attached to exactly one target. What it does depends on its activation:
//!
//! - `Ongoing`: contributes its tag effects (times its stack count) to every
//!   derived read of the target while attached. Nothing is written to the
//!   target's tags, so removing the enchantment removes the contribution.
//! - `TurnStart`, `TurnEnd`, `Damage`: fires at that point, applying its tag
//!   effects to the target once and running the enchantment card's `Enchant`
//!   task list. With `remove_after_activation` it detaches after firing.
//!
//! Effect values may refer to the two numbers on the task stack of the task
//! that created the enchantment; they are resolved at attach time.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::entity::EntityId;
use crate::core::tags::GameTag;

/// When an enchantment does its work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnchantmentActivation {
    Ongoing,
    TurnStart,
    TurnEnd,
    Damage,
}

/// When an enchantment goes away on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalPolicy {
    /// Dropped when the target leaves play.
    #[default]
    LeavePlay,
    /// Dropped at the end of the current turn (and when leaving play).
    EndOfTurn,
    /// Survives zone changes.
    Persist,
}

/// How an effect combines with the running value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectOp {
    Add,
    Set,
}

/// Source of an effect's value in a definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectValue {
    Fixed(i32),
    /// First number of the creating task's stack.
    Number,
    /// Second number of the creating task's stack.
    Number1,
}

impl EffectValue {
    #[must_use]
    pub fn resolve(self, numbers: (i32, i32)) -> i32 {
        match self {
            EffectValue::Fixed(v) => v,
            EffectValue::Number => numbers.0,
            EffectValue::Number1 => numbers.1,
        }
    }
}

/// A resolved tag modification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagEffect {
    pub tag: GameTag,
    pub op: EffectOp,
    pub value: i32,
}

impl TagEffect {
    #[must_use]
    pub const fn add(tag: GameTag, value: i32) -> Self {
        Self { tag, op: EffectOp::Add, value }
    }

    #[must_use]
    pub const fn set(tag: GameTag, value: i32) -> Self {
        Self { tag, op: EffectOp::Set, value }
    }

    /// Fold this effect, applied `count` times, into `current`.
    #[must_use]
    pub fn apply(&self, current: i32, count: i32) -> i32 {
        match self.op {
            EffectOp::Add => current + self.value * count,
            EffectOp::Set => self.value,
        }
    }
}

/// Fold every effect on `tag` into `value`.
#[must_use]
pub fn fold_effects(effects: &[TagEffect], tag: GameTag, value: i32, count: i32) -> i32 {
    effects
        .iter()
        .filter(|e| e.tag == tag)
        .fold(value, |acc, e| e.apply(acc, count))
}

/// Unresolved effect in an enchantment card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTemplate {
    pub tag: GameTag,
    pub op: EffectOp,
    pub value: EffectValue,
}

/// What an enchantment card does when attached.
///
/// ```
/// use ccg_duel::core::GameTag;
/// use ccg_duel::enchants::{EnchantDef, EnchantmentActivation, RemovalPolicy};
///
/// let buff = EnchantDef::ongoing().add(GameTag::Atk, 2).add(GameTag::Health, 2);
/// assert_eq!(buff.activation, EnchantmentActivation::Ongoing);
///
/// let rage = EnchantDef::ongoing().add(GameTag::Atk, 4).until_end_of_turn();
/// assert_eq!(rage.removal, RemovalPolicy::EndOfTurn);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnchantDef {
    pub activation: EnchantmentActivation,
    pub effects: Vec<EffectTemplate>,
    pub remove_after_activation: bool,
    pub removal: RemovalPolicy,
}

impl EnchantDef {
    #[must_use]
    pub fn on(activation: EnchantmentActivation) -> Self {
        Self {
            activation,
            effects: Vec::new(),
            remove_after_activation: false,
            removal: RemovalPolicy::default(),
        }
    }

    #[must_use]
    pub fn ongoing() -> Self {
        Self::on(EnchantmentActivation::Ongoing)
    }

    #[must_use]
    pub fn add(mut self, tag: GameTag, value: i32) -> Self {
        self.effects.push(EffectTemplate { tag, op: EffectOp::Add, value: EffectValue::Fixed(value) });
        self
    }

    #[must_use]
    pub fn set(mut self, tag: GameTag, value: i32) -> Self {
        self.effects.push(EffectTemplate { tag, op: EffectOp::Set, value: EffectValue::Fixed(value) });
        self
    }

    /// Add an effect whose value comes from the creating task's stack.
    #[must_use]
    pub fn add_from(mut self, tag: GameTag, value: EffectValue) -> Self {
        self.effects.push(EffectTemplate { tag, op: EffectOp::Add, value });
        self
    }

    #[must_use]
    pub fn remove_after_activation(mut self) -> Self {
        self.remove_after_activation = true;
        self
    }

    #[must_use]
    pub fn until_end_of_turn(mut self) -> Self {
        self.removal = RemovalPolicy::EndOfTurn;
        self
    }

    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.removal = RemovalPolicy::Persist;
        self
    }
}

/// An enchantment attached to an entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enchantment {
    /// Enchantment card this was made from.
    pub card: CardId,
    /// Entity that created it.
    pub source: EntityId,
    pub activation: EnchantmentActivation,
    pub effects: Vec<TagEffect>,
    /// Stack count for ongoing enchantments applied more than once.
    pub count: i32,
    pub remove_after_activation: bool,
    pub removal: RemovalPolicy,
}

impl Enchantment {
    /// Instantiate a definition, resolving stack-number effects.
    #[must_use]
    pub fn from_def(card: CardId, source: EntityId, def: &EnchantDef, numbers: (i32, i32)) -> Self {
        Self {
            card,
            source,
            activation: def.activation,
            effects: def
                .effects
                .iter()
                .map(|e| TagEffect { tag: e.tag, op: e.op, value: e.value.resolve(numbers) })
                .collect(),
            count: 1,
            remove_after_activation: def.remove_after_activation,
            removal: def.removal,
        }
    }

    #[must_use]
    pub fn is_ongoing(&self) -> bool {
        self.activation == EnchantmentActivation::Ongoing
    }

    /// Contribution of this enchantment to a derived read of `tag`.
    #[must_use]
    pub fn apply(&self, tag: GameTag, value: i32) -> i32 {
        fold_effects(&self.effects, tag, value, self.count)
    }

    /// Whether the enchantment stays when its target leaves play.
    #[must_use]
    pub fn survives_leaving_play(&self) -> bool {
        self.removal == RemovalPolicy::Persist
    }
}
