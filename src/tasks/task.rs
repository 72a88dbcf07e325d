//! Task definitions.
//!
//! A task is one atomic step of a card effect. Card powers, triggers and
//! enchantments are ordered lists of tasks sharing one [`TaskStack`].
//!
//! ## Failure semantics
//!
//! A task whose preconditions do not hold completes without effect (or
//! returns `Stop` for guard tasks): healing for less than 1, destroying an
//! entity already marked for destruction, summoning onto a full board. Only
//! contract violations (an `Invalid` selector, reading the stack before it
//! was populated, an unknown card) return `Err`.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{Game, GameTag, PlayerId};
use crate::error::{EngineError, Result};
use crate::zones::Zone;

use super::condition::SelfCondition;
use super::ritual::RitualTask;
use super::selector::EntityType;
use super::stack::{Selection, TaskContext, TaskStack, TaskState};

/// Shared, immutable task sequence.
pub type TaskList = Arc<[Task]>;

/// A numeric task parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Amount {
    Fixed(i32),
    /// The stack's first number.
    Number,
    /// The stack's second number.
    Number1,
}

impl Amount {
    #[must_use]
    pub fn resolve(self, stack: &TaskStack) -> i32 {
        match self {
            Amount::Fixed(v) => v,
            Amount::Number => stack.number,
            Amount::Number1 => stack.number1,
        }
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Amount::Fixed(value)
    }
}

/// Which stack number a task writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberSlot {
    Number,
    Number1,
}

/// Side of the board, relative to the task's controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Friendly,
    Enemy,
}

impl Side {
    fn player(self, ctx: &TaskContext) -> PlayerId {
        match self {
            Side::Friendly => ctx.controller,
            Side::Enemy => ctx.opponent(),
        }
    }
}

/// Signature of a custom task body.
pub type TaskFn = dyn Fn(&mut Game, &TaskContext, &mut TaskStack) -> Result<TaskState> + Send + Sync;

/// A task implemented in code, for effects the built-in set cannot express.
#[derive(Clone)]
pub struct CustomTask {
    pub name: &'static str,
    pub func: Arc<TaskFn>,
}

impl fmt::Debug for CustomTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomTask").field(&self.name).finish()
    }
}

/// An atomic effect step.
#[derive(Clone, Debug)]
pub enum Task {
    // === Combat ===

    /// Deal damage. With `spell_damage` the controller's spell power is added.
    Damage {
        amount: Amount,
        entity_type: EntityType,
        spell_damage: bool,
    },

    /// Restore health. Stops the sequence when the amount is below 1.
    Heal { amount: Amount, entity_type: EntityType },

    /// Mark for destruction; deaths are processed after the task.
    Destroy { entity_type: EntityType },

    Freeze { entity_type: EntityType },

    // === Enchantments ===

    /// Attach an enchantment card to every placed selected entity. Its
    /// values may read the stack numbers.
    AddEnchantment { card: CardId, entity_type: EntityType },

    RemoveEnchantment { card: CardId, entity_type: EntityType },

    Silence { entity_type: EntityType },

    // === Tags and stack ===

    /// Overwrite a raw tag.
    SetTag {
        tag: GameTag,
        value: Amount,
        entity_type: EntityType,
    },

    /// Read the derived tag of the first selected entity into a stack number.
    /// A character's `Atk` is its attack value, weapon included.
    GetTag {
        tag: GameTag,
        entity_type: EntityType,
        slot: NumberSlot,
    },

    /// Put the selected entities on the stack.
    Include { entity_type: EntityType },

    /// Keep only stack entities matching the condition.
    Filter { condition: SelfCondition },

    /// Set the stack flag to whether every selected entity matches.
    Flag {
        condition: SelfCondition,
        entity_type: EntityType,
    },

    /// Continue only if the stack flag equals `flag`.
    StopUnless { flag: bool },

    // === Zones ===

    /// Summon a minion at the right of the board. Does nothing if full.
    Summon { card: CardId, side: Side },

    Draw { count: usize },

    /// Create a card in the controller's hand. Does nothing if full.
    AddToHand { card: CardId },

    /// Move the selected entities into their controller's `zone`, skipping
    /// any that would not fit.
    MoveTo { zone: Zone, entity_type: EntityType },

    // === Resources ===

    AddMana { amount: Amount, temporary: bool },

    Ritual(RitualTask),

    Custom(CustomTask),
}

impl Task {
    #[must_use]
    pub fn damage(amount: i32, entity_type: EntityType) -> Self {
        Task::Damage {
            amount: Amount::Fixed(amount),
            entity_type,
            spell_damage: false,
        }
    }

    /// Damage boosted by spell power.
    #[must_use]
    pub fn spell_damage(amount: i32, entity_type: EntityType) -> Self {
        Task::Damage {
            amount: Amount::Fixed(amount),
            entity_type,
            spell_damage: true,
        }
    }

    #[must_use]
    pub fn heal(amount: impl Into<Amount>, entity_type: EntityType) -> Self {
        Task::Heal {
            amount: amount.into(),
            entity_type,
        }
    }

    #[must_use]
    pub fn destroy(entity_type: EntityType) -> Self {
        Task::Destroy { entity_type }
    }

    #[must_use]
    pub fn freeze(entity_type: EntityType) -> Self {
        Task::Freeze { entity_type }
    }

    #[must_use]
    pub fn enchant(card: CardId, entity_type: EntityType) -> Self {
        Task::AddEnchantment { card, entity_type }
    }

    #[must_use]
    pub fn silence(entity_type: EntityType) -> Self {
        Task::Silence { entity_type }
    }

    #[must_use]
    pub fn set_tag(tag: GameTag, value: i32, entity_type: EntityType) -> Self {
        Task::SetTag {
            tag,
            value: Amount::Fixed(value),
            entity_type,
        }
    }

    #[must_use]
    pub fn get_tag(tag: GameTag, entity_type: EntityType, slot: NumberSlot) -> Self {
        Task::GetTag {
            tag,
            entity_type,
            slot,
        }
    }

    #[must_use]
    pub fn include(entity_type: EntityType) -> Self {
        Task::Include { entity_type }
    }

    #[must_use]
    pub fn filter(condition: SelfCondition) -> Self {
        Task::Filter { condition }
    }

    #[must_use]
    pub fn flag(condition: SelfCondition, entity_type: EntityType) -> Self {
        Task::Flag {
            condition,
            entity_type,
        }
    }

    #[must_use]
    pub fn summon(card: CardId) -> Self {
        Task::Summon {
            card,
            side: Side::Friendly,
        }
    }

    #[must_use]
    pub fn draw(count: usize) -> Self {
        Task::Draw { count }
    }

    #[must_use]
    pub fn custom(
        name: &'static str,
        func: impl Fn(&mut Game, &TaskContext, &mut TaskStack) -> Result<TaskState> + Send + Sync + 'static,
    ) -> Self {
        Task::Custom(CustomTask {
            name,
            func: Arc::new(func),
        })
    }

    /// Run this task.
    pub fn process(&self, game: &mut Game, ctx: &TaskContext, stack: &mut TaskStack) -> Result<TaskState> {
        match self {
            Task::Damage {
                amount,
                entity_type,
                spell_damage,
            } => {
                let mut amount = amount.resolve(stack);
                if *spell_damage {
                    amount += game.spell_power(ctx.controller);
                }
                if amount <= 0 {
                    return Ok(TaskState::Complete);
                }
                for id in game.resolve_entities(ctx, stack, *entity_type)? {
                    game.deal_damage(ctx.source, id, amount)?;
                }
            }

            Task::Heal { amount, entity_type } => {
                let amount = amount.resolve(stack);
                if amount < 1 {
                    return Ok(TaskState::Stop);
                }
                for id in game.resolve_entities(ctx, stack, *entity_type)? {
                    game.heal(ctx.source, id, amount)?;
                }
            }

            Task::Destroy { entity_type } => {
                for id in game.resolve_entities(ctx, stack, *entity_type)? {
                    let entity = game.entity_mut(id)?;
                    if !entity.is_to_be_destroyed() {
                        entity.tags.set(GameTag::ToBeDestroyed, 1);
                    }
                }
            }

            Task::Freeze { entity_type } => {
                for id in game.resolve_entities(ctx, stack, *entity_type)? {
                    game.set_tag(id, GameTag::Frozen, 1)?;
                }
            }

            Task::AddEnchantment { card, entity_type } => {
                for id in game.resolve_entities(ctx, stack, *entity_type)? {
                    if !game.zones().contains(id) {
                        continue;
                    }
                    game.attach_enchantment(id, *card, ctx.source, (stack.number, stack.number1))?;
                }
            }

            Task::RemoveEnchantment { card, entity_type } => {
                for id in game.resolve_entities(ctx, stack, *entity_type)? {
                    game.remove_enchantments_of(id, *card)?;
                }
            }

            Task::Silence { entity_type } => {
                for id in game.resolve_entities(ctx, stack, *entity_type)? {
                    game.silence(id)?;
                }
            }

            Task::SetTag {
                tag,
                value,
                entity_type,
            } => {
                let value = value.resolve(stack);
                for id in game.resolve_entities(ctx, stack, *entity_type)? {
                    game.set_tag(id, *tag, value)?;
                }
            }

            Task::GetTag {
                tag,
                entity_type,
                slot,
            } => {
                let selected = game.resolve_entities(ctx, stack, *entity_type)?;
                let value = match selected.first() {
                    Some(&id) if *tag == GameTag::Atk && game.entity(id)?.is_character() => {
                        game.character(id)?.attack()
                    }
                    Some(&id) => game.tag(id, *tag)?,
                    None => 0,
                };
                match slot {
                    NumberSlot::Number => stack.number = value,
                    NumberSlot::Number1 => stack.number1 = value,
                }
            }

            Task::Include { entity_type } => {
                stack.playables = Some(game.resolve_entities(ctx, stack, *entity_type)?);
            }

            Task::Filter { condition } => {
                let playables = stack.playables.take().ok_or(EngineError::MalformedStack)?;
                let mut kept = Selection::new();
                for id in playables {
                    if condition.eval(game, ctx, id)? {
                        kept.push(id);
                    }
                }
                stack.playables = Some(kept);
            }

            Task::Flag {
                condition,
                entity_type,
            } => {
                let selected = game.resolve_entities(ctx, stack, *entity_type)?;
                let mut flag = !selected.is_empty();
                for id in selected {
                    flag = flag && condition.eval(game, ctx, id)?;
                }
                stack.flag = flag;
            }

            Task::StopUnless { flag } => {
                if stack.flag != *flag {
                    return Ok(TaskState::Stop);
                }
            }

            Task::Summon { card, side } => {
                let player = side.player(ctx);
                if game.is_zone_full(player, Zone::Board) {
                    return Ok(TaskState::Complete);
                }
                let id = game.summon(player, *card, None)?;
                stack.playables = Some(Selection::from_slice(&[id]));
            }

            Task::Draw { count } => {
                let mut drawn = Selection::new();
                for _ in 0..*count {
                    if let Some(id) = game.draw_card(ctx.controller)? {
                        drawn.push(id);
                    }
                }
                stack.playables = Some(drawn);
            }

            Task::AddToHand { card } => {
                if game.is_zone_full(ctx.controller, Zone::Hand) {
                    return Ok(TaskState::Complete);
                }
                let id = game.spawn(ctx.controller, *card, Zone::Hand, None)?;
                stack.playables = Some(Selection::from_slice(&[id]));
            }

            Task::MoveTo { zone, entity_type } => {
                for id in game.resolve_entities(ctx, stack, *entity_type)? {
                    let owner = game.entity(id)?.controller;
                    if game.is_zone_full(owner, *zone) {
                        continue;
                    }
                    game.move_entity(id, *zone, None)?;
                }
            }

            Task::AddMana { amount, temporary } => {
                let amount = amount.resolve(stack);
                let max_mana = game.config().max_mana;
                let controller = game.controller_mut(ctx.controller);
                if *temporary {
                    controller.tags.add(GameTag::TempResources, amount);
                } else {
                    let base = (controller.base_mana() + amount).clamp(0, max_mana);
                    controller.set_base_mana(base);
                }
            }

            Task::Ritual(ritual) => return ritual.process(game, ctx, stack),

            Task::Custom(custom) => return (custom.func)(game, ctx, stack),
        }
        Ok(TaskState::Complete)
    }
}
