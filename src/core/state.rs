//! The game aggregate.
//!
//! `Game` owns every piece of mutable state in a duel:
//! - the entity arena (`im::OrdMap`, so clones share structure until written)
//! - both controllers
//! - the zone manager
//! - registered triggers and the pending event queue
//! - the injected RNG
//!
//! Cross-entity links are ids resolved through the arena, so `clone()` yields
//! a fully independent game. Card templates, configuration and the log sink
//! are immutable and shared behind `Arc`.
//!
//! ## Zone movement
//!
//! [`Game::move_entity`] is the only way an entity enters or leaves a zone.
//! It applies zone exit and entry effects (dropping enchantments when leaving
//! play, assigning an order of play when entering it, re-registering
//! triggers) and enqueues the lifecycle events reactions are driven from.

use std::fmt;
use std::sync::Arc;

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::GameConfig;
use super::controller::Controller;
use super::entity::EntityId;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use super::tags::GameTag;
use crate::cards::{CardDatabase, CardId, CardType, Entity, EntityKind};
use crate::error::{EngineError, Result};
use crate::logging::{LogLevel, LogSink, NullSink, TracingSink};
use crate::triggers::{EventKind, GameEvent, Trigger, TriggerManager};
use crate::zones::{Zone, ZoneKey, ZoneManager, ZonePosition};

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Heroes and decks are placed but the first turn has not begun.
    Setup,
    Running,
    Over(GameResult),
}

/// Complete state of one duel.
#[derive(Clone)]
pub struct Game {
    pub(crate) config: Arc<GameConfig>,
    pub(crate) cards: Arc<CardDatabase>,
    pub(crate) log_sink: Arc<dyn LogSink>,

    pub(crate) entities: OrdMap<EntityId, Entity>,
    pub(crate) controllers: PlayerMap<Controller>,
    pub(crate) zones: ZoneManager,
    pub(crate) triggers: TriggerManager,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: GameRng,

    pub(crate) next_entity_id: u32,
    pub(crate) next_order_of_play: i32,
    pub(crate) turn: u32,
    pub(crate) current_player: PlayerId,
    pub(crate) status: GameStatus,
    pub(crate) history: Vector<ActionRecord>,
    /// Nesting level of running task sequences.
    pub(crate) depth: usize,
}

impl Game {
    /// Create a game, logging through `tracing` unless disabled in the config.
    ///
    /// Heroes, hero powers and decks are placed immediately. With
    /// `auto_start` (the default) starting hands are drawn and the first turn
    /// begins before this returns.
    pub fn new(config: GameConfig, cards: Arc<CardDatabase>) -> Result<Self> {
        let sink: Arc<dyn LogSink> = if config.logging {
            Arc::new(TracingSink)
        } else {
            Arc::new(NullSink)
        };
        Self::with_sink(config, cards, sink)
    }

    /// Create a game that logs to a custom sink.
    pub fn with_sink(config: GameConfig, cards: Arc<CardDatabase>, sink: Arc<dyn LogSink>) -> Result<Self> {
        let auto_start = config.auto_start;
        let mut game = Self::empty(Arc::new(config), cards, sink);
        game.setup()?;
        if auto_start {
            game.start()?;
        }
        Ok(game)
    }

    /// Bare game with no entities. Used by setup and snapshot restore.
    pub(crate) fn empty(config: Arc<GameConfig>, cards: Arc<CardDatabase>, sink: Arc<dyn LogSink>) -> Self {
        let rng = GameRng::new(config.seed);
        let zones = ZoneManager::new(config.capacities);
        let first = config.first_player;
        Self {
            config,
            cards,
            log_sink: sink,
            entities: OrdMap::new(),
            controllers: PlayerMap::new(|p| Controller::new(p, EntityId(0), EntityId(0))),
            zones,
            triggers: TriggerManager::new(),
            events: Vec::new(),
            rng,
            next_entity_id: EntityId::FIRST.raw(),
            next_order_of_play: 1,
            turn: 0,
            current_player: first,
            status: GameStatus::Setup,
            history: Vector::new(),
            depth: 0,
        }
    }

    fn setup(&mut self) -> Result<()> {
        for player in PlayerId::both() {
            let setup = self.config.players[player].clone();

            let hero = self.spawn(player, setup.hero, Zone::Play, None)?;
            self.expect_type(hero, CardType::Hero, "hero")?;
            let power = self.spawn(player, setup.hero_power, Zone::Play, None)?;
            self.expect_type(power, CardType::HeroPower, "hero power")?;

            let controller = &mut self.controllers[player];
            controller.hero = hero;
            controller.hero_power = power;

            for card in setup.deck {
                self.spawn(player, card, Zone::Deck, None)?;
            }
            if self.config.shuffle_decks {
                let key = ZoneKey::new(player, Zone::Deck);
                self.zones.shuffle(key, &mut self.rng);
                self.restamp(key);
            }
        }
        self.events.clear();
        self.log(LogLevel::Info, "Game", || {
            format!("setup complete, {} entities", self.entities.len())
        });
        Ok(())
    }

    fn expect_type(&self, id: EntityId, card_type: CardType, expected: &'static str) -> Result<()> {
        if self.entity(id)?.card().card_type == card_type {
            Ok(())
        } else {
            Err(EngineError::WrongKind { entity: id, expected })
        }
    }

    /// Independent copy with its own forked RNG stream.
    ///
    /// A plain `clone()` replays identically to the original; a branch
    /// diverges on the next random draw.
    pub fn branch(&mut self) -> Self {
        let mut copy = self.clone();
        copy.rng = self.rng.fork();
        copy
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn cards(&self) -> &Arc<CardDatabase> {
        &self.cards
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Over(_))
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.status {
            GameStatus::Over(result) => Some(result),
            GameStatus::Setup | GameStatus::Running => None,
        }
    }

    /// Applied actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    #[must_use]
    pub fn triggers(&self) -> &TriggerManager {
        &self.triggers
    }

    /// Events enqueued but not yet drained.
    #[must_use]
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Order of play the next entity entering play will receive.
    #[must_use]
    pub fn peek_order_of_play(&self) -> i32 {
        self.next_order_of_play
    }

    pub fn entity(&self, id: EntityId) -> Result<&Entity> {
        self.entities.get(&id).ok_or(EngineError::EntityNotFound(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        self.entities.get_mut(&id).ok_or(EngineError::EntityNotFound(id))
    }

    #[must_use]
    pub fn get_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// All entities in id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn controller(&self, player: PlayerId) -> &Controller {
        &self.controllers[player]
    }

    pub fn controller_mut(&mut self, player: PlayerId) -> &mut Controller {
        &mut self.controllers[player]
    }

    #[must_use]
    pub fn hero(&self, player: PlayerId) -> EntityId {
        self.controllers[player].hero
    }

    #[must_use]
    pub fn hero_power(&self, player: PlayerId) -> EntityId {
        self.controllers[player].hero_power
    }

    /// Weapon equipped by a player's hero.
    #[must_use]
    pub fn weapon_of(&self, player: PlayerId) -> Option<EntityId> {
        let hero = self.entities.get(&self.hero(player))?;
        EntityId::from_tag_value(hero.get(GameTag::Weapon))
    }

    /// Members of one of a player's zones, in order.
    #[must_use]
    pub fn members(&self, player: PlayerId, zone: Zone) -> &[EntityId] {
        self.zones.members(ZoneKey::new(player, zone))
    }

    #[must_use]
    pub fn board(&self, player: PlayerId) -> &[EntityId] {
        self.members(player, Zone::Board)
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[EntityId] {
        self.members(player, Zone::Hand)
    }

    #[must_use]
    pub fn is_zone_full(&self, player: PlayerId, zone: Zone) -> bool {
        self.zones.is_full(ZoneKey::new(player, zone))
    }

    /// Raw tag value, without enchantments or auras.
    pub fn raw_tag(&self, id: EntityId, tag: GameTag) -> Result<i32> {
        Ok(self.entity(id)?.get(tag))
    }

    /// Overwrite a raw tag.
    pub fn set_tag(&mut self, id: EntityId, tag: GameTag, value: i32) -> Result<()> {
        self.entity_mut(id)?.tags.set(tag, value);
        Ok(())
    }

    // === Entity lifecycle ===

    /// Create an unplaced entity. Callers must place it with
    /// [`Game::move_entity`] before the next action.
    pub(crate) fn create_entity(&mut self, player: PlayerId, card: CardId) -> Result<EntityId> {
        let template = self.cards.lookup(card)?;
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;

        let mut entity = Entity::new(id, player, template);
        entity.tags.set(GameTag::Controller, i32::from(player.0));
        self.entities.insert(id, entity);
        Ok(id)
    }

    /// Create an entity from `card` and place it in one of `player`'s zones.
    ///
    /// The zone is checked for room first, so a failed spawn leaves no
    /// orphaned entity behind.
    pub fn spawn(
        &mut self,
        player: PlayerId,
        card: CardId,
        zone: Zone,
        position: Option<ZonePosition>,
    ) -> Result<EntityId> {
        let key = ZoneKey::new(player, zone);
        if let Some(capacity) = self.zones.capacity(zone) {
            if self.zones.count(key) >= capacity {
                return Err(EngineError::ZoneFull {
                    player,
                    zone,
                    capacity,
                });
            }
        }
        let id = self.create_entity(player, card)?;
        self.move_entity(id, zone, position)?;
        Ok(id)
    }

    /// Move an entity into one of its controller's zones.
    ///
    /// Fails with `ZoneFull` when the destination is at capacity; nothing is
    /// changed in that case.
    pub fn move_entity(&mut self, id: EntityId, zone: Zone, position: Option<ZonePosition>) -> Result<()> {
        let (player, from) = {
            let entity = self.entity(id)?;
            (entity.controller, entity.zone())
        };
        let key = ZoneKey::new(player, zone);

        let moved = if self.zones.contains(id) {
            self.zones.move_to(id, key, position)?
        } else {
            let index = self.zones.add(id, key, position)?;
            crate::zones::ZoneMove {
                from: None,
                to: key,
                index,
            }
        };

        if moved.from == Some(key) {
            self.restamp(key);
            return Ok(());
        }

        self.triggers.unregister(id);

        let leaving_play = from.is_in_play() && !zone.is_in_play();
        let entering_play = zone.is_in_play() && !from.is_in_play();

        if leaving_play {
            self.on_leave_play(id, player, from, zone)?;
        }

        if let Some(old) = moved.from {
            self.restamp(old);
        }
        self.restamp(key);

        if entering_play {
            self.assign_order_of_play(id)?;
        }

        self.register_triggers(id, zone)?;

        let oop = self.entity(id)?.order_of_play();
        self.enqueue(
            GameEvent::new(EventKind::ZoneChange, id, player)
                .with_zones(from, zone)
                .with_order_of_play(oop),
        );
        if zone == Zone::Play && self.entity(id)?.kind() == EntityKind::Weapon {
            self.enqueue(
                GameEvent::new(EventKind::EquipWeapon, id, player)
                    .with_zones(from, zone)
                    .with_order_of_play(oop),
            );
        }
        if matches!(from, Zone::Board | Zone::Play) && zone == Zone::Graveyard {
            if self.entity(id)?.is_minion() {
                self.controllers[player].tags.add(GameTag::NumFriendlyMinionsDied, 1);
            }
            self.enqueue(
                GameEvent::new(EventKind::Death, id, player)
                    .with_zones(from, zone)
                    .with_order_of_play(oop),
            );
        }

        self.log(LogLevel::Debug, "Zone", || {
            format!("{id} moved {from:?} -> {zone:?} of {player}")
        });
        Ok(())
    }

    fn on_leave_play(&mut self, id: EntityId, player: PlayerId, from: Zone, to: Zone) -> Result<()> {
        let hero = self.hero(player);
        if self.weapon_of(player) == Some(id) {
            self.set_tag(hero, GameTag::Weapon, 0)?;
        }

        let entity = self.entity_mut(id)?;
        if !entity.tags.flag(GameTag::KeepEnchantments) {
            entity.enchantments.retain(|e| e.survives_leaving_play());
        }

        if matches!(to, Zone::Hand | Zone::Deck) {
            let base = entity.card().tags.clone();
            entity.tags = base;
            entity.tags.set(GameTag::Controller, i32::from(player.0));
        }

        self.log(LogLevel::Verbose, "Zone", || format!("{id} left play from {from:?}"));
        Ok(())
    }

    /// Stamp a fresh order of play on an entity.
    pub(crate) fn assign_order_of_play(&mut self, id: EntityId) -> Result<i32> {
        let oop = self.next_order_of_play;
        self.next_order_of_play += 1;
        self.set_tag(id, GameTag::OrderOfPlay, oop)?;
        Ok(oop)
    }

    /// Register the triggers of `id`'s card that are live in `zone`.
    pub(crate) fn register_triggers(&mut self, id: EntityId, zone: Zone) -> Result<()> {
        let entity = self.entity(id)?;
        if entity.is_silenced() {
            return Ok(());
        }
        let controller = entity.controller;
        let card = Arc::clone(entity.card());
        for (index, def) in card.triggers.iter().enumerate() {
            if def.zone == zone {
                self.triggers.register(Trigger::new(id, controller, index, def.clone()));
            }
        }
        Ok(())
    }

    /// Rewrite `Zone` and `ZonePosition` tags from a zone's current order.
    pub(crate) fn restamp(&mut self, key: ZoneKey) {
        let members = self.zones.members(key).to_vec();
        for (index, id) in members.into_iter().enumerate() {
            if let Some(entity) = self.entities.get_mut(&id) {
                entity.tags.set(GameTag::Zone, key.zone.to_tag());
                entity.tags.set(GameTag::ZonePosition, index as i32);
            }
        }
    }

    /// Queue a lifecycle event for the next drain.
    pub fn enqueue(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Log a message, formatting it only if the sink wants it.
    pub fn log(&self, level: LogLevel, category: &str, message: impl FnOnce() -> String) {
        if self.log_sink.enabled(level) {
            self.log_sink.log(level, category, &message());
        }
    }

    /// Mark the game finished.
    pub(crate) fn finish(&mut self, result: GameResult) {
        if self.is_over() {
            return;
        }
        self.status = GameStatus::Over(result);
        self.log(LogLevel::Info, "Game", || format!("game over: {result:?}"));
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("turn", &self.turn)
            .field("current_player", &self.current_player)
            .field("status", &self.status)
            .field("entities", &self.entities.len())
            .field("next_order_of_play", &self.next_order_of_play)
            .finish_non_exhaustive()
    }
}
