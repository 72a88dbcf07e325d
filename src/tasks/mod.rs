//! Task execution engine.
//!
//! Every card effect is an ordered list of [`Task`]s run against a
//! [`TaskContext`] (controller, source, target) and a shared [`TaskStack`].
//! The engine (`Game::run_tasks`) runs a list in order and drains deaths and
//! triggered reactions after each task.
//!
//! ```
//! use ccg_duel::tasks::{Amount, EntityType, Task};
//!
//! let fireball = vec![Task::spell_damage(6, EntityType::Target)];
//! let heal = Task::heal(Amount::Number, EntityType::Hero);
//!
//! assert_eq!(fireball.len(), 1);
//! assert!(matches!(heal, Task::Heal { amount: Amount::Number, .. }));
//! ```

pub mod condition;
pub mod engine;
pub mod ritual;
pub mod selector;
pub mod stack;
pub mod task;

pub use condition::SelfCondition;
pub use ritual::{RitualKind, RitualTask};
pub use selector::EntityType;
pub use stack::{Selection, TaskContext, TaskStack, TaskState};
pub use task::{Amount, CustomTask, NumberSlot, Side, Task, TaskFn, TaskList};
