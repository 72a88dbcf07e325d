//! Execution context threaded through a task sequence.
//!
//! - `TaskContext`: who is acting (controller, source, target). Fixed for the
//!   whole sequence.
//! - `TaskStack`: transient values passed between tasks of one sequence:
//!   an entity list produced by a previous task, two numbers, and a flag.
//!   A fresh stack is created for every sequence and dropped when it ends.

use smallvec::SmallVec;

use crate::core::{EntityId, PlayerId};

/// Entity list produced by selectors and tasks.
pub type Selection = SmallVec<[EntityId; 8]>;

/// Outcome of a single task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// Continue with the next task.
    Complete,
    /// Skip the rest of the sequence.
    Stop,
}

/// Who a sequence runs on behalf of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskContext {
    pub controller: PlayerId,
    pub source: EntityId,
    pub target: Option<EntityId>,
}

impl TaskContext {
    #[must_use]
    pub fn new(controller: PlayerId, source: EntityId, target: Option<EntityId>) -> Self {
        Self {
            controller,
            source,
            target,
        }
    }

    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.controller.opponent()
    }
}

/// Values shared by the tasks of one sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskStack {
    /// Entities produced by a previous task. `None` until a task sets it.
    pub playables: Option<Selection>,
    pub number: i32,
    pub number1: i32,
    pub flag: bool,
}

impl TaskStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
