//! Trigger registry.
//!
//! Card templates declare [`TriggerDef`]s. When an entity enters the zone a
//! definition names, the game registers a [`Trigger`] binding that definition
//! to the entity; when the entity leaves (or is silenced) its triggers are
//! unregistered. The manager indexes triggers by event kind, and
//! [`TriggerManager::matching`] turns an event into the ordered list of
//! [`Reaction`]s the task engine should run.

use rustc_hash::FxHashMap;

use crate::core::{EntityId, Game, PlayerId};
use crate::tasks::{Task, TaskList};
use crate::zones::Zone;

use super::condition::{ConditionContext, ConditionEvaluator, TriggerCondition};
use super::event::{EventKind, GameEvent};

/// A trigger declared on a card template.
///
/// ```
/// use ccg_duel::tasks::{EntityType, Task};
/// use ccg_duel::triggers::{EventKind, TriggerCondition, TriggerDef};
/// use ccg_duel::zones::Zone;
///
/// // "Whenever a friendly minion dies, deal 1 damage to the enemy hero."
/// let def = TriggerDef::new(EventKind::Death, vec![Task::damage(1, EntityType::EnemyHero)])
///     .with_condition(TriggerCondition::FriendlyTriggering);
///
/// assert_eq!(def.zone, Zone::Board);
/// ```
#[derive(Clone, Debug)]
pub struct TriggerDef {
    pub event: EventKind,
    /// Zone the owner must be in for the trigger to be live.
    pub zone: Zone,
    pub condition: TriggerCondition,
    pub tasks: TaskList,
}

impl TriggerDef {
    #[must_use]
    pub fn new(event: EventKind, tasks: Vec<Task>) -> Self {
        Self {
            event,
            zone: Zone::Board,
            condition: TriggerCondition::Always,
            tasks: TaskList::from(tasks),
        }
    }

    /// Set the zone the trigger is live in (builder pattern).
    #[must_use]
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Set the condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: TriggerCondition) -> Self {
        self.condition = condition;
        self
    }
}

/// A live trigger bound to its owning entity.
#[derive(Clone, Debug)]
pub struct Trigger {
    pub owner: EntityId,
    pub controller: PlayerId,
    /// Index of the definition in the owner's card.
    pub index: usize,
    pub def: TriggerDef,
}

impl Trigger {
    #[must_use]
    pub fn new(owner: EntityId, controller: PlayerId, index: usize, def: TriggerDef) -> Self {
        Self {
            owner,
            controller,
            index,
            def,
        }
    }
}

/// A task sequence scheduled by a trigger or deathrattle.
///
/// Tasks run with `owner` as source and the triggering entity as target.
#[derive(Clone, Debug)]
pub struct Reaction {
    pub owner: EntityId,
    pub controller: PlayerId,
    pub target: EntityId,
    pub tasks: TaskList,
}

/// Registry of live triggers, indexed by event kind.
#[derive(Clone, Debug, Default)]
pub struct TriggerManager {
    by_event: FxHashMap<EventKind, Vec<Trigger>>,
}

impl TriggerManager {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger.
    pub fn register(&mut self, trigger: Trigger) {
        self.by_event
            .entry(trigger.def.event)
            .or_default()
            .push(trigger);
    }

    /// Remove every trigger owned by an entity. Returns how many went.
    pub fn unregister(&mut self, owner: EntityId) -> usize {
        let mut removed = 0;
        for list in self.by_event.values_mut() {
            let before = list.len();
            list.retain(|t| t.owner != owner);
            removed += before - list.len();
        }
        self.by_event.retain(|_, list| !list.is_empty());
        removed
    }

    #[must_use]
    pub fn is_registered(&self, owner: EntityId) -> bool {
        self.by_event
            .values()
            .any(|list| list.iter().any(|t| t.owner == owner))
    }

    /// Get total trigger count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_event.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_event.is_empty()
    }

    /// Reactions to an event, ordered by the owners' order of play and then
    /// by declaration order on the card.
    #[must_use]
    pub fn matching(&self, event: &GameEvent, game: &Game) -> Vec<Reaction> {
        let Some(triggers) = self.by_event.get(&event.kind) else {
            return Vec::new();
        };

        let mut fired: Vec<(i32, EntityId, usize, Reaction)> = triggers
            .iter()
            .filter(|t| {
                let ctx = ConditionContext::new(game, event, t.owner, t.controller);
                ConditionEvaluator::evaluate(&t.def.condition, &ctx)
            })
            .map(|t| {
                let order = game.get_entity(t.owner).map_or(0, |e| e.order_of_play());
                let reaction = Reaction {
                    owner: t.owner,
                    controller: t.controller,
                    target: event.entity,
                    tasks: TaskList::clone(&t.def.tasks),
                };
                (order, t.owner, t.index, reaction)
            })
            .collect();

        fired.sort_by(|a, b| (a.0, a.1, a.2).cmp(&(b.0, b.1, b.2)));
        fired.into_iter().map(|(_, _, _, r)| r).collect()
    }
}
