//! Derived tag values and enchantment bookkeeping on [`Game`].
//!
//! A derived read folds three layers, in this order:
//!
//! 1. the entity's raw tag
//! 2. its ongoing enchantments, in attach order
//! 3. every active aura that reaches it, in order of play of the aura sources
//!
//! Nothing in layers 2 and 3 is ever written back to the tag store, so
//! detaching an enchantment or moving an aura source takes effect on the very
//! next read.
//!
//! ```
//! use std::sync::Arc;
//!
//! use ccg_duel::cards::{CardDatabase, CardId, CardTemplate};
//! use ccg_duel::core::{Game, GameConfig, GameTag, PlayerId, PlayerSetup};
//! use ccg_duel::enchants::EnchantDef;
//! use ccg_duel::zones::Zone;
//!
//! let mut db = CardDatabase::new();
//! db.register(CardTemplate::hero(CardId::new(1), "Hero", 30)).unwrap();
//! db.register(CardTemplate::hero_power(CardId::new(2), "Power", 2)).unwrap();
//! db.register(CardTemplate::minion(CardId::new(3), "Wisp", 0, 1, 1)).unwrap();
//! db.register(CardTemplate::enchantment(
//!     CardId::new(4),
//!     "Blessing",
//!     EnchantDef::ongoing().add(GameTag::Atk, 3),
//! ))
//! .unwrap();
//!
//! let setup = PlayerSetup::new(CardId::new(1), CardId::new(2));
//! let config = GameConfig::new(setup.clone(), setup).with_logging(false);
//! let mut game = Game::new(config, Arc::new(db)).unwrap();
//!
//! let wisp = game.spawn(PlayerId::FIRST, CardId::new(3), Zone::Board, None).unwrap();
//! let hero = game.hero(PlayerId::FIRST);
//! game.attach_enchantment(wisp, CardId::new(4), hero, (0, 0)).unwrap();
//!
//! assert_eq!(game.raw_tag(wisp, GameTag::Atk).unwrap(), 1);
//! assert_eq!(game.tag(wisp, GameTag::Atk).unwrap(), 4);
//! ```

use smallvec::SmallVec;

use super::aura::AuraDef;
use super::enchantment::{Enchantment, EnchantmentActivation, RemovalPolicy};
use crate::cards::{CardId, Entity, PowerActivation};
use crate::core::{EntityId, Game, GameTag, PlayerId};
use crate::error::{EngineError, Result};
use crate::logging::LogLevel;
use crate::zones::Zone;

const AURA_ZONES: [Zone; 3] = [Zone::Play, Zone::Board, Zone::Secret];

impl Game {
    /// Effective value of a tag, including enchantments and auras.
    pub fn tag(&self, id: EntityId, tag: GameTag) -> Result<i32> {
        Ok(self.effective(self.entity(id)?, tag))
    }

    pub(crate) fn effective(&self, entity: &Entity, tag: GameTag) -> i32 {
        let mut value = entity
            .enchantments
            .iter()
            .filter(|e| e.is_ongoing())
            .fold(entity.get(tag), |acc, e| e.apply(tag, acc));

        for (source, aura) in self.active_auras() {
            let owner = source.controller;
            if aura.reaches(source, entity, Some(self.hero(owner)), self.weapon_of(owner)) {
                value = aura.apply(tag, value);
            }
        }
        value
    }

    /// Aura sources currently projecting, ordered by order of play.
    pub(crate) fn active_auras(&self) -> SmallVec<[(&Entity, &AuraDef); 4]> {
        let mut auras: SmallVec<[(&Entity, &AuraDef); 4]> = SmallVec::new();
        for player in PlayerId::both() {
            for zone in AURA_ZONES {
                for id in self.members(player, zone) {
                    let Some(source) = self.get_entity(*id) else { continue };
                    if let Some(aura) = source.card().aura.as_ref() {
                        if aura.is_active(source) {
                            auras.push((source, aura));
                        }
                    }
                }
            }
        }
        auras.sort_by_key(|(source, _)| source.order_of_play());
        auras
    }

    /// Attach an enchantment made from `card` to `target`.
    ///
    /// An identical ongoing enchantment that is already attached gains one
    /// stack instead of being duplicated.
    pub fn attach_enchantment(
        &mut self,
        target: EntityId,
        card: CardId,
        source: EntityId,
        numbers: (i32, i32),
    ) -> Result<()> {
        let template = self.cards.lookup(card)?;
        let def = template
            .enchant
            .as_ref()
            .ok_or(EngineError::NotAnEnchantment(card))?;
        let enchantment = Enchantment::from_def(card, source, def, numbers);

        let entity = self.entity_mut(target)?;
        let stacked = match entity.ongoing_enchantment_mut(card) {
            Some(existing)
                if enchantment.is_ongoing()
                    && existing.effects == enchantment.effects
                    && existing.removal == enchantment.removal =>
            {
                existing.count += 1;
                true
            }
            _ => false,
        };
        if !stacked {
            entity.enchantments.push(enchantment);
        }

        self.log(LogLevel::Verbose, "Enchant", || {
            format!("{} enchanted {target} with {}", source, template.name)
        });
        Ok(())
    }

    /// Detach every enchantment made from `card`. Returns how many went.
    pub fn remove_enchantments_of(&mut self, target: EntityId, card: CardId) -> Result<usize> {
        let entity = self.entity_mut(target)?;
        let before = entity.enchantments.len();
        entity.enchantments.retain(|e| e.card != card);
        Ok(before - entity.enchantments.len())
    }

    /// Fire `owner`'s enchantments for `activation` if it is in `zone`.
    ///
    /// Each matching enchantment applies its tag effects to `owner` once.
    /// Enchantments flagged to go after activation are detached once the
    /// whole firing pass is done, and only then do the enchantment cards'
    /// `Enchant` tasks run, with `owner` as source. Returns how many fired.
    pub fn apply_enchantments(
        &mut self,
        owner: EntityId,
        activation: EnchantmentActivation,
        zone: Zone,
        target: Option<EntityId>,
    ) -> Result<usize> {
        let (controller, matching) = {
            let entity = self.entity(owner)?;
            if entity.zone() != zone {
                return Ok(0);
            }
            let matching: Vec<Enchantment> = entity
                .enchantments
                .iter()
                .filter(|e| e.activation == activation)
                .cloned()
                .collect();
            (entity.controller, matching)
        };
        if matching.is_empty() {
            return Ok(0);
        }

        {
            let entity = self.entity_mut(owner)?;
            for enchantment in &matching {
                for effect in &enchantment.effects {
                    let current = entity.tags.get(effect.tag);
                    entity.tags.set(effect.tag, effect.apply(current, enchantment.count));
                }
            }
            for fired in matching.iter().filter(|e| e.remove_after_activation) {
                if let Some(index) = entity.enchantments.iter().position(|e| e == fired) {
                    entity.enchantments.remove(index);
                }
            }
        }

        for enchantment in &matching {
            let card = self.cards.lookup(enchantment.card)?;
            if let Some(tasks) = card.power(PowerActivation::Enchant) {
                self.run_tasks(controller, owner, target, tasks)?;
            }
        }

        self.log(LogLevel::Debug, "Enchant", || {
            format!("{owner} fired {} {activation:?} enchantments", matching.len())
        });
        Ok(matching.len())
    }

    /// Detach every enchantment that lasts until end of turn.
    pub(crate) fn expire_end_of_turn(&mut self) {
        let expiring: Vec<EntityId> = self
            .entities
            .values()
            .filter(|e| e.enchantments.iter().any(|en| en.removal == RemovalPolicy::EndOfTurn))
            .map(|e| e.id)
            .collect();
        for id in expiring {
            if let Some(entity) = self.entities.get_mut(&id) {
                entity.enchantments.retain(|en| en.removal != RemovalPolicy::EndOfTurn);
            }
        }
    }

    /// Silence an entity: drop its enchantments, keywords and triggers.
    pub fn silence(&mut self, id: EntityId) -> Result<()> {
        let entity = self.entity_mut(id)?;
        entity.enchantments.clear();
        for tag in [
            GameTag::Taunt,
            GameTag::Charge,
            GameTag::Windfury,
            GameTag::DivineShield,
            GameTag::Lifesteal,
            GameTag::Frozen,
            GameTag::SpellPower,
        ] {
            entity.tags.set(tag, 0);
        }
        entity.tags.set(GameTag::Silenced, 1);
        self.triggers.unregister(id);
        self.log(LogLevel::Verbose, "Enchant", || format!("{id} was silenced"));
        Ok(())
    }
}
