//! Task execution on [`Game`].
//!
//! ## Causality
//!
//! A sequence runs its tasks strictly in order, each seeing every mutation
//! of the ones before it. After each task the engine drains reactions to
//! quiescence before the next task starts:
//!
//! 1. characters and weapons that died are moved to the graveyard, in order
//!    of play (this enqueues their death events)
//! 2. pending events are taken in order of play of the entity they concern
//! 3. each event fires its damage enchantments, then its deathrattle, then
//!    every matching trigger; each reaction is itself a sequence and drains
//!    its own reactions the same way
//! 4. repeat until no deaths and no events remain
//!
//! Nesting is bounded by `GameConfig::max_reaction_depth`.

use crate::cards::PowerActivation;
use crate::core::{EntityId, Game, GameResult, GameTag, PlayerId};
use crate::enchants::EnchantmentActivation;
use crate::error::{EngineError, Result};
use crate::logging::LogLevel;
use crate::triggers::{EventKind, GameEvent, Reaction};
use crate::zones::Zone;

use super::stack::{TaskContext, TaskStack, TaskState};
use super::task::{Task, TaskList};

impl Game {
    /// Run a task sequence with a fresh stack, draining reactions after
    /// every task.
    pub fn run_tasks(
        &mut self,
        controller: PlayerId,
        source: EntityId,
        target: Option<EntityId>,
        tasks: &[Task],
    ) -> Result<TaskState> {
        let ctx = TaskContext::new(controller, source, target);
        self.depth += 1;
        let result = self.run_sequence(&ctx, tasks);
        self.depth -= 1;
        result
    }

    fn run_sequence(&mut self, ctx: &TaskContext, tasks: &[Task]) -> Result<TaskState> {
        let limit = self.config.max_reaction_depth;
        if self.depth > limit {
            return Err(EngineError::ReactionDepthExceeded(limit));
        }

        let mut stack = TaskStack::new();
        for task in tasks {
            if self.is_over() {
                return Ok(TaskState::Stop);
            }
            let state = task.process(self, ctx, &mut stack)?;
            self.drain()?;
            if state == TaskState::Stop {
                self.log(LogLevel::Debug, "Task", || {
                    format!("sequence of {} stopped at {task:?}", ctx.source)
                });
                return Ok(TaskState::Stop);
            }
        }
        Ok(TaskState::Complete)
    }

    /// Process deaths and pending events until nothing is left.
    pub fn drain(&mut self) -> Result<()> {
        loop {
            self.process_deaths()?;
            if self.events.is_empty() {
                return Ok(());
            }
            let mut events = self.take_events();
            events.sort_by_key(|e| e.order_of_play);
            for event in &events {
                self.dispatch(event)?;
            }
        }
    }

    fn dispatch(&mut self, event: &GameEvent) -> Result<()> {
        if self.is_over() {
            return Ok(());
        }

        if event.kind == EventKind::Damage {
            if let Some(zone) = self.get_entity(event.entity).map(|e| e.zone()) {
                self.apply_enchantments(event.entity, EnchantmentActivation::Damage, zone, event.source)?;
            }
        }

        let mut reactions: Vec<Reaction> = Vec::new();
        if event.kind == EventKind::Death {
            if let Some(dead) = self.get_entity(event.entity) {
                if !dead.is_silenced() {
                    if let Some(tasks) = dead.card().power(PowerActivation::Deathrattle) {
                        reactions.push(Reaction {
                            owner: dead.id,
                            controller: dead.controller,
                            target: dead.id,
                            tasks: TaskList::clone(tasks),
                        });
                    }
                }
            }
        }
        reactions.extend(self.triggers.matching(event, self));

        for reaction in reactions {
            if self.is_over() {
                break;
            }
            self.log(LogLevel::Verbose, "Trigger", || {
                format!("{} reacts to {:?} of {}", reaction.owner, event.kind, event.entity)
            });
            self.run_tasks(reaction.controller, reaction.owner, Some(reaction.target), &reaction.tasks)?;
        }
        Ok(())
    }

    /// Move dead minions and broken weapons to the graveyard and end the game
    /// if a hero died.
    pub(crate) fn process_deaths(&mut self) -> Result<()> {
        let mut dying: Vec<(i32, EntityId)> = Vec::new();
        let mut dead_heroes: Vec<PlayerId> = Vec::new();

        for player in PlayerId::both() {
            for &id in self.board(player) {
                let entity = self.entity(id)?;
                let health = self.effective(entity, GameTag::Health) - entity.get(GameTag::Damage);
                if health <= 0 || entity.is_to_be_destroyed() {
                    dying.push((entity.order_of_play(), id));
                }
            }
            if let Some(weapon) = self.weapon_of(player) {
                let entity = self.entity(weapon)?;
                if self.effective(entity, GameTag::Durability) <= 0 || entity.is_to_be_destroyed() {
                    dying.push((entity.order_of_play(), weapon));
                }
            }
            if self.character(self.hero(player))?.is_dead() {
                dead_heroes.push(player);
            }
        }

        dying.sort_unstable();
        for (_, id) in dying {
            self.log(LogLevel::Info, "Death", || format!("{id} died"));
            self.move_entity(id, Zone::Graveyard, None)?;
        }

        match dead_heroes.as_slice() {
            [] => {}
            [loser] => self.finish(GameResult::Winner(loser.opponent())),
            _ => self.finish(GameResult::Draw),
        }
        Ok(())
    }
}
