//! Per-entity predicates used by `Filter` and `Flag` tasks.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, EntityKind};
use crate::core::{EntityId, Game, GameTag};
use crate::error::Result;
use crate::zones::Zone;

use super::stack::TaskContext;

/// Predicate over one entity, evaluated relative to a task context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelfCondition {
    IsMinion,
    IsHero,
    IsWeapon,
    IsSpell,
    IsFriendly,
    IsDamaged,
    IsUndamaged,
    IsFrozen,
    IsSilenced,
    HasTaunt,
    HasDeathrattle,
    IsInZone(Zone),
    IsCard(CardId),
    /// Derived tag value is at least N.
    TagAtLeast(GameTag, i32),
    /// Derived tag value is at most N.
    TagAtMost(GameTag, i32),
    /// Entity is not the task's source.
    NotSource,
    Not(Box<SelfCondition>),
}

impl SelfCondition {
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Evaluate against one entity.
    pub fn eval(&self, game: &Game, ctx: &TaskContext, id: EntityId) -> Result<bool> {
        let entity = game.entity(id)?;
        let damage = || entity.get(GameTag::Damage);
        Ok(match self {
            SelfCondition::IsMinion => entity.kind() == EntityKind::Minion,
            SelfCondition::IsHero => entity.kind() == EntityKind::Hero,
            SelfCondition::IsWeapon => entity.kind() == EntityKind::Weapon,
            SelfCondition::IsSpell => matches!(entity.kind(), EntityKind::Spell | EntityKind::Secret),
            SelfCondition::IsFriendly => entity.controller == ctx.controller,
            SelfCondition::IsDamaged => damage() > 0,
            SelfCondition::IsUndamaged => damage() == 0,
            SelfCondition::IsFrozen => game.effective(entity, GameTag::Frozen) > 0,
            SelfCondition::IsSilenced => entity.is_silenced(),
            SelfCondition::HasTaunt => game.effective(entity, GameTag::Taunt) > 0,
            SelfCondition::HasDeathrattle => entity.has_active_deathrattle(),
            SelfCondition::IsInZone(zone) => entity.zone() == *zone,
            SelfCondition::IsCard(card) => entity.card_id() == *card,
            SelfCondition::TagAtLeast(tag, n) => game.effective(entity, *tag) >= *n,
            SelfCondition::TagAtMost(tag, n) => game.effective(entity, *tag) <= *n,
            SelfCondition::NotSource => id != ctx.source,
            SelfCondition::Not(inner) => !inner.eval(game, ctx, id)?,
        })
    }
}
