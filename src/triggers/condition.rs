//! Trigger conditions.
//!
//! A trigger already filters on its event kind and on the zone its owner
//! must be in. Conditions narrow it further, relative to the trigger's owner
//! ("a friendly minion died", "during your turn", "3 or more damage").

use serde::{Deserialize, Serialize};

use crate::cards::CardType;
use crate::core::{EntityId, Game, PlayerId};

use super::event::GameEvent;

/// A condition that must hold for a trigger to fire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerCondition {
    // === Triggering Entity ===

    /// The event is about the trigger's owner itself.
    SelfIsTriggering,

    /// The event is about some other entity.
    OtherThanSelf,

    /// The triggering entity is controlled by the owner's controller.
    FriendlyTriggering,

    /// The triggering entity is controlled by the opponent.
    EnemyTriggering,

    TriggeringIsMinion,

    TriggeringIsHero,

    TriggeringIsType(CardType),

    // === Turn ===

    DuringOwnerTurn,

    DuringOpponentTurn,

    // === Value ===

    /// The event amount is at least N.
    MinAmount(i32),

    // === Combinators ===

    /// All conditions must be true.
    All(Vec<TriggerCondition>),

    /// At least one condition must be true.
    Any(Vec<TriggerCondition>),

    /// Condition must be false.
    Not(Box<TriggerCondition>),

    // === Special ===

    /// Always matches (no filter).
    Always,

    /// Never matches (disabled trigger).
    Never,
}

impl TriggerCondition {
    /// Create an AND condition.
    pub fn all(conditions: impl IntoIterator<Item = TriggerCondition>) -> Self {
        Self::All(conditions.into_iter().collect())
    }

    /// Create an OR condition.
    pub fn any(conditions: impl IntoIterator<Item = TriggerCondition>) -> Self {
        Self::Any(conditions.into_iter().collect())
    }

    /// Negate this condition.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Add another condition with AND.
    #[must_use]
    pub fn and(self, other: TriggerCondition) -> Self {
        match self {
            Self::All(mut conditions) => {
                conditions.push(other);
                Self::All(conditions)
            }
            Self::Always => other,
            _ => Self::All(vec![self, other]),
        }
    }
}

/// Context for evaluating trigger conditions.
pub struct ConditionContext<'a> {
    pub game: &'a Game,
    pub event: &'a GameEvent,
    /// Entity the trigger belongs to.
    pub owner: EntityId,
    /// Controller of the trigger's owner.
    pub controller: PlayerId,
}

impl<'a> ConditionContext<'a> {
    pub fn new(game: &'a Game, event: &'a GameEvent, owner: EntityId, controller: PlayerId) -> Self {
        Self {
            game,
            event,
            owner,
            controller,
        }
    }
}

/// Evaluator for trigger conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if a condition is satisfied.
    pub fn evaluate(condition: &TriggerCondition, ctx: &ConditionContext) -> bool {
        let event = ctx.event;
        match condition {
            TriggerCondition::SelfIsTriggering => event.entity == ctx.owner,

            TriggerCondition::OtherThanSelf => event.entity != ctx.owner,

            TriggerCondition::FriendlyTriggering => event.player == ctx.controller,

            TriggerCondition::EnemyTriggering => event.player != ctx.controller,

            TriggerCondition::TriggeringIsMinion => Self::card_type(ctx) == Some(CardType::Minion),

            TriggerCondition::TriggeringIsHero => Self::card_type(ctx) == Some(CardType::Hero),

            TriggerCondition::TriggeringIsType(card_type) => Self::card_type(ctx) == Some(*card_type),

            TriggerCondition::DuringOwnerTurn => ctx.game.current_player() == ctx.controller,

            TriggerCondition::DuringOpponentTurn => ctx.game.current_player() != ctx.controller,

            TriggerCondition::MinAmount(min) => event.amount >= *min,

            TriggerCondition::All(conditions) => conditions.iter().all(|c| Self::evaluate(c, ctx)),

            TriggerCondition::Any(conditions) => conditions.iter().any(|c| Self::evaluate(c, ctx)),

            TriggerCondition::Not(inner) => !Self::evaluate(inner, ctx),

            TriggerCondition::Always => true,

            TriggerCondition::Never => false,
        }
    }

    fn card_type(ctx: &ConditionContext) -> Option<CardType> {
        ctx.game
            .get_entity(ctx.event.entity)
            .map(|e| e.card().card_type)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{CardDatabase, CardId, CardTemplate};
    use crate::core::{GameConfig, PlayerSetup};
    use crate::triggers::EventKind;
    use crate::zones::Zone;

    fn game() -> Game {
        let mut db = CardDatabase::new();
        db.register(CardTemplate::hero(CardId(1), "Hero", 30)).unwrap();
        db.register(CardTemplate::hero_power(CardId(2), "Power", 2)).unwrap();
        db.register(CardTemplate::minion(CardId(3), "Wisp", 0, 1, 1)).unwrap();
        let setup = PlayerSetup::new(CardId(1), CardId(2));
        let config = GameConfig::new(setup.clone(), setup)
            .with_logging(false)
            .without_auto_start();
        Game::new(config, Arc::new(db)).unwrap()
    }

    #[test]
    fn test_entity_conditions() {
        let mut game = game();
        let owner = game.spawn(PlayerId::FIRST, CardId(3), Zone::Board, None).unwrap();
        let enemy = game.spawn(PlayerId::SECOND, CardId(3), Zone::Board, None).unwrap();

        let event = GameEvent::new(EventKind::Death, enemy, PlayerId::SECOND);
        let ctx = ConditionContext::new(&game, &event, owner, PlayerId::FIRST);

        assert!(ConditionEvaluator::evaluate(&TriggerCondition::OtherThanSelf, &ctx));
        assert!(!ConditionEvaluator::evaluate(&TriggerCondition::SelfIsTriggering, &ctx));
        assert!(ConditionEvaluator::evaluate(&TriggerCondition::EnemyTriggering, &ctx));
        assert!(!ConditionEvaluator::evaluate(&TriggerCondition::FriendlyTriggering, &ctx));
        assert!(ConditionEvaluator::evaluate(&TriggerCondition::TriggeringIsMinion, &ctx));
        assert!(!ConditionEvaluator::evaluate(&TriggerCondition::TriggeringIsHero, &ctx));
    }

    #[test]
    fn test_turn_conditions() {
        let game = game();
        let hero = game.hero(PlayerId::FIRST);
        let event = GameEvent::new(EventKind::TurnStart, hero, PlayerId::FIRST);

        let mine = ConditionContext::new(&game, &event, hero, PlayerId::FIRST);
        assert!(ConditionEvaluator::evaluate(&TriggerCondition::DuringOwnerTurn, &mine));

        let theirs = ConditionContext::new(&game, &event, hero, PlayerId::SECOND);
        assert!(ConditionEvaluator::evaluate(&TriggerCondition::DuringOpponentTurn, &theirs));
    }

    #[test]
    fn test_combinators() {
        let game = game();
        let hero = game.hero(PlayerId::FIRST);
        let event = GameEvent::new(EventKind::Damage, hero, PlayerId::FIRST).with_amount(3);
        let ctx = ConditionContext::new(&game, &event, hero, PlayerId::FIRST);

        let big_hit = TriggerCondition::SelfIsTriggering.and(TriggerCondition::MinAmount(3));
        assert!(ConditionEvaluator::evaluate(&big_hit, &ctx));

        let bigger = TriggerCondition::all([TriggerCondition::MinAmount(4), TriggerCondition::Always]);
        assert!(!ConditionEvaluator::evaluate(&bigger, &ctx));

        let either = TriggerCondition::any([TriggerCondition::Never, TriggerCondition::TriggeringIsHero]);
        assert!(ConditionEvaluator::evaluate(&either, &ctx));
        assert!(!ConditionEvaluator::evaluate(&either.negate(), &ctx));
    }

    #[test]
    fn test_and_with_always_collapses() {
        let cond = TriggerCondition::Always.and(TriggerCondition::MinAmount(2));
        assert_eq!(cond, TriggerCondition::MinAmount(2));
    }
}
