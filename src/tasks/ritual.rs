//! Ritual tasks.
//!
//! A ritual builds up a tracked card across the whole game, even before that
//! card is drawn. The first ritual a player performs creates a hidden proxy
//! of the tracked card in their setaside zone and links it from the
//! controller. Every ritual then enchants the proxy together with every copy
//! of the tracked card on the player's board and in their hand, so the
//! proxy always carries the accumulated total.

use crate::cards::CardId;
use crate::core::{EntityId, Game, GameTag};
use crate::error::Result;
use crate::logging::LogLevel;
use crate::zones::Zone;

use super::stack::{Selection, TaskContext, TaskStack, TaskState};

/// What a ritual does to the tracked card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RitualKind {
    /// Only make sure the proxy exists.
    Check,
    /// Stack an ongoing buff `amount` more times.
    Buff { enchantment: CardId, amount: i32 },
    /// Grant taunt, once.
    Taunt { enchantment: CardId },
    /// Attach an enchantment whose values come from the task stack numbers.
    Blade { enchantment: CardId },
}

/// Ritual task definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RitualTask {
    pub kind: RitualKind,
    /// Card the hidden proxy is created from.
    pub proxy_card: CardId,
    /// Card whose copies receive the ritual.
    pub tracked_card: CardId,
}

impl RitualTask {
    #[must_use]
    pub fn new(kind: RitualKind, proxy_card: CardId, tracked_card: CardId) -> Self {
        Self {
            kind,
            proxy_card,
            tracked_card,
        }
    }

    pub fn process(&self, game: &mut Game, ctx: &TaskContext, stack: &mut TaskStack) -> Result<TaskState> {
        let proxy = self.proxy(game, ctx)?;

        let mut entities = Selection::new();
        entities.push(proxy);
        for zone in [Zone::Board, Zone::Hand] {
            for &id in game.members(ctx.controller, zone) {
                if game.entity(id)?.card_id() == self.tracked_card {
                    entities.push(id);
                }
            }
        }

        match self.kind {
            RitualKind::Check => {}
            RitualKind::Buff { enchantment, amount } => {
                if amount > 0 {
                    for &id in &entities {
                        game.attach_enchantment(id, enchantment, ctx.source, (0, 0))?;
                        if let Some(existing) = game.entity_mut(id)?.ongoing_enchantment_mut(enchantment) {
                            existing.count += amount - 1;
                        }
                    }
                }
            }
            RitualKind::Taunt { enchantment } => {
                if game.tag(proxy, GameTag::Taunt)? == 0 {
                    for &id in &entities {
                        game.attach_enchantment(id, enchantment, ctx.source, (0, 0))?;
                    }
                }
            }
            RitualKind::Blade { enchantment } => {
                for &id in &entities {
                    game.attach_enchantment(id, enchantment, ctx.source, (stack.number, stack.number1))?;
                }
            }
        }

        game.log(LogLevel::Verbose, "Ritual", || {
            format!("{:?} applied to {} copies of {}", self.kind, entities.len(), self.tracked_card)
        });
        stack.playables = Some(entities);
        Ok(TaskState::Complete)
    }

    /// The controller's proxy, created on first use.
    fn proxy(&self, game: &mut Game, ctx: &TaskContext) -> Result<EntityId> {
        let controller = game.controller(ctx.controller);
        if controller.has_seen_proxy() {
            if let Some(proxy) = controller.proxy() {
                return Ok(proxy);
            }
        }

        let proxy = game.spawn(ctx.controller, self.proxy_card, Zone::Setaside, None)?;
        game.set_tag(proxy, GameTag::Revealed, 1)?;
        game.controller_mut(ctx.controller).set_proxy(proxy);
        Ok(proxy)
    }
}
