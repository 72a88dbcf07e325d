//! Symbolic entity selectors.
//!
//! Tasks name the entities they act on by an [`EntityType`] rather than by
//! id. Selectors are resolved against the current board every time a task
//! runs, never cached, since membership changes between tasks of the same
//! sequence.

use serde::{Deserialize, Serialize};

use crate::core::{Game, PlayerId};
use crate::error::{EngineError, Result};
use crate::zones::Zone;

use super::stack::{Selection, TaskContext, TaskStack};

/// Which entities a task acts on, relative to its context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Source,
    Target,
    Hero,
    EnemyHero,
    /// The controller's minions on board.
    Minions,
    EnemyMinions,
    AllMinions,
    /// Controller's hero and minions.
    Friends,
    /// Opponent's hero and minions.
    Enemies,
    /// Every character, friendly side first.
    All,
    Weapon,
    EnemyWeapon,
    Hand,
    /// Entities produced by a previous task in this sequence.
    Stack,
    /// Placeholder in malformed card data. Resolving it is an error.
    Invalid,
}

impl Game {
    /// Resolve a selector to the entities it currently denotes.
    pub fn resolve_entities(
        &self,
        ctx: &TaskContext,
        stack: &TaskStack,
        entity_type: EntityType,
    ) -> Result<Selection> {
        let me = ctx.controller;
        let them = ctx.opponent();
        let mut out = Selection::new();

        match entity_type {
            EntityType::Source => out.push(ctx.source),
            EntityType::Target => out.extend(ctx.target),
            EntityType::Hero => out.push(self.hero(me)),
            EntityType::EnemyHero => out.push(self.hero(them)),
            EntityType::Minions => out.extend_from_slice(self.board(me)),
            EntityType::EnemyMinions => out.extend_from_slice(self.board(them)),
            EntityType::AllMinions => {
                out.extend_from_slice(self.board(me));
                out.extend_from_slice(self.board(them));
            }
            EntityType::Friends => self.push_side(&mut out, me),
            EntityType::Enemies => self.push_side(&mut out, them),
            EntityType::All => {
                self.push_side(&mut out, me);
                self.push_side(&mut out, them);
            }
            EntityType::Weapon => out.extend(self.weapon_of(me)),
            EntityType::EnemyWeapon => out.extend(self.weapon_of(them)),
            EntityType::Hand => out.extend_from_slice(self.members(me, Zone::Hand)),
            EntityType::Stack => {
                let playables = stack.playables.as_ref().ok_or(EngineError::MalformedStack)?;
                out.extend_from_slice(playables);
            }
            EntityType::Invalid => return Err(EngineError::UnknownEntityType(entity_type)),
        }
        Ok(out)
    }

    fn push_side(&self, out: &mut Selection, player: PlayerId) {
        out.push(self.hero(player));
        out.extend_from_slice(self.board(player));
    }
}
