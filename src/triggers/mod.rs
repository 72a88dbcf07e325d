//! Trigger system for event-driven abilities.
//!
//! Triggers let cards respond to lifecycle events: deaths, weapon equips,
//! damage, healing, cards being played, turn boundaries and zone changes.
//!
//! ## Key Components
//!
//! - [`EventKind`]: the closed set of lifecycle events
//! - [`GameEvent`]: an event that occurred, with its entity and amount
//! - [`TriggerCondition`]: rules for when a trigger fires
//! - [`TriggerDef`]: a trigger declared on a card template
//! - [`TriggerManager`]: live triggers, indexed by event kind
//!
//! ## Ordering
//!
//! Reactions never fire inline. Events are queued and drained by the task
//! engine between tasks; events are taken in order of play of the entity they
//! concern, and the reactions to one event in order of play of the trigger
//! owners. Registration order never matters, so replays are reproducible.
//!
//! ## Example Usage
//!
//! ```
//! use ccg_duel::core::{EntityId, PlayerId};
//! use ccg_duel::tasks::{EntityType, Task};
//! use ccg_duel::triggers::{EventKind, Trigger, TriggerDef, TriggerManager};
//!
//! let mut manager = TriggerManager::new();
//!
//! let def = TriggerDef::new(EventKind::TurnEnd, vec![Task::damage(1, EntityType::EnemyHero)]);
//! manager.register(Trigger::new(EntityId(10), PlayerId::FIRST, 0, def));
//!
//! assert!(manager.is_registered(EntityId(10)));
//! assert_eq!(manager.unregister(EntityId(10)), 1);
//! ```

mod condition;
mod event;
mod registry;

pub use condition::{ConditionContext, ConditionEvaluator, TriggerCondition};
pub use event::{EventKind, GameEvent};
pub use registry::{Reaction, Trigger, TriggerDef, TriggerManager};
