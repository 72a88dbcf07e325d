//! Typed views over entities.
//!
//! Entities are stored uniformly; the character and playable capabilities are
//! borrowed views checked once at construction. Every value a view returns
//! is derived (raw tag, then enchantments, then auras), so it is always
//! consistent with the current board.
//!
//! ```
//! use std::sync::Arc;
//!
//! use ccg_duel::cards::{CardDatabase, CardId, CardTemplate};
//! use ccg_duel::core::{Game, GameConfig, GameTag, PlayerId, PlayerSetup};
//! use ccg_duel::zones::Zone;
//!
//! let mut db = CardDatabase::new();
//! db.register(CardTemplate::hero(CardId::new(1), "Hero", 30)).unwrap();
//! db.register(CardTemplate::hero_power(CardId::new(2), "Power", 2)).unwrap();
//! db.register(CardTemplate::minion(CardId::new(3), "Yeti", 4, 4, 5)).unwrap();
//!
//! let setup = PlayerSetup::new(CardId::new(1), CardId::new(2));
//! let config = GameConfig::new(setup.clone(), setup).with_logging(false);
//! let mut game = Game::new(config, Arc::new(db)).unwrap();
//!
//! let yeti = game.spawn(PlayerId::FIRST, CardId::new(3), Zone::Board, None).unwrap();
//! game.set_tag(yeti, GameTag::Damage, 2).unwrap();
//!
//! let view = game.character(yeti).unwrap();
//! assert_eq!(view.health(), 3);
//! assert!(view.is_damaged());
//! assert_eq!(game.playable(yeti).unwrap().cost(), 4);
//! ```

use crate::core::{EntityId, Game, GameTag, PlayerId};
use crate::enchants::Enchantment;
use crate::error::{EngineError, Result};
use crate::zones::Zone;

use super::definition::CardType;
use super::instance::{Entity, EntityKind};

/// Heroes and minions.
#[derive(Clone, Copy)]
pub struct Character<'a> {
    game: &'a Game,
    entity: &'a Entity,
}

impl<'a> Character<'a> {
    fn value(&self, tag: GameTag) -> i32 {
        self.game.effective(self.entity, tag)
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.entity.id
    }

    #[must_use]
    pub fn entity(&self) -> &'a Entity {
        self.entity
    }

    #[must_use]
    pub fn controller(&self) -> PlayerId {
        self.entity.controller
    }

    #[must_use]
    pub fn is_hero(&self) -> bool {
        self.entity.kind() == EntityKind::Hero
    }

    /// Weapon equipped by this character, if it is a hero.
    #[must_use]
    pub fn weapon(&self) -> Option<&'a Entity> {
        if !self.is_hero() {
            return None;
        }
        let game: &'a Game = self.game;
        game.weapon_of(self.controller()).and_then(|w| game.get_entity(w))
    }

    /// Own keyword, or the equipped weapon's for a hero.
    fn keyword(&self, tag: GameTag) -> bool {
        self.value(tag) > 0 || self.weapon().is_some_and(|w| self.game.effective(w, tag) > 0)
    }

    /// Attack value. A hero adds its weapon's attack during its own turn.
    #[must_use]
    pub fn attack(&self) -> i32 {
        let mut attack = self.value(GameTag::Atk);
        if self.game.current_player() == self.controller() {
            if let Some(weapon) = self.weapon() {
                attack += self.game.effective(weapon, GameTag::Atk);
            }
        }
        attack.max(0)
    }

    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.value(GameTag::Health)
    }

    /// Damage taken so far.
    #[must_use]
    pub fn damage(&self) -> i32 {
        self.entity.get(GameTag::Damage)
    }

    #[must_use]
    pub fn health(&self) -> i32 {
        self.max_health() - self.damage()
    }

    #[must_use]
    pub fn is_damaged(&self) -> bool {
        self.damage() > 0
    }

    #[must_use]
    pub fn armor(&self) -> i32 {
        self.value(GameTag::Armor)
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health() <= 0 || self.entity.is_to_be_destroyed()
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.value(GameTag::Frozen) > 0
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.value(GameTag::Exhausted) > 0
    }

    #[must_use]
    pub fn is_silenced(&self) -> bool {
        self.entity.is_silenced()
    }

    #[must_use]
    pub fn has_taunt(&self) -> bool {
        self.value(GameTag::Taunt) > 0
    }

    #[must_use]
    pub fn has_charge(&self) -> bool {
        self.value(GameTag::Charge) > 0
    }

    #[must_use]
    pub fn has_windfury(&self) -> bool {
        self.keyword(GameTag::Windfury)
    }

    #[must_use]
    pub fn has_divine_shield(&self) -> bool {
        self.value(GameTag::DivineShield) > 0
    }

    #[must_use]
    pub fn has_lifesteal(&self) -> bool {
        self.keyword(GameTag::Lifesteal)
    }

    #[must_use]
    pub fn has_deathrattle(&self) -> bool {
        self.entity.has_active_deathrattle()
    }

    #[must_use]
    pub fn num_attacks(&self) -> i32 {
        self.entity.get(GameTag::NumAttacksThisTurn)
    }
}

/// Minions, spells, secrets, weapons and hero powers.
#[derive(Clone, Copy)]
pub struct Playable<'a> {
    game: &'a Game,
    entity: &'a Entity,
}

impl<'a> Playable<'a> {
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.entity.id
    }

    #[must_use]
    pub fn entity(&self) -> &'a Entity {
        self.entity
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.entity.card().card_type
    }

    /// Current cost, never below zero.
    #[must_use]
    pub fn cost(&self) -> i32 {
        self.game.effective(self.entity, GameTag::Cost).max(0)
    }

    #[must_use]
    pub fn overload(&self) -> i32 {
        self.game.effective(self.entity, GameTag::Overload)
    }

    #[must_use]
    pub fn order_of_play(&self) -> i32 {
        self.entity.order_of_play()
    }

    #[must_use]
    pub fn zone(&self) -> Zone {
        self.entity.zone()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.entity.zone_position()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.game.effective(self.entity, GameTag::Exhausted) > 0
    }

    #[must_use]
    pub fn enchantments(&self) -> &'a [Enchantment] {
        &self.entity.enchantments
    }
}

impl Game {
    /// Character view of an entity.
    pub fn character(&self, id: EntityId) -> Result<Character<'_>> {
        let entity = self.entity(id)?;
        if !entity.is_character() {
            return Err(EngineError::WrongKind {
                entity: id,
                expected: "character",
            });
        }
        Ok(Character { game: self, entity })
    }

    /// Playable view of an entity.
    pub fn playable(&self, id: EntityId) -> Result<Playable<'_>> {
        let entity = self.entity(id)?;
        if !entity.is_playable() {
            return Err(EngineError::WrongKind {
                entity: id,
                expected: "playable",
            });
        }
        Ok(Playable { game: self, entity })
    }
}
