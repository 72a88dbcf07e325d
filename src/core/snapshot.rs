//! Flat, serializable game snapshots.
//!
//! A [`Snapshot`] holds everything that changes during play: counters, the
//! RNG position, controllers, every entity's tags and enchantments, and the
//! ordered members of every zone. Card templates and the configuration are
//! not included; `Game::restore` takes them back from the caller, and
//! registered triggers are rebuilt from the card templates.
//!
//! Entities and zones are written in id and key order, so two games in the
//! same state produce byte-identical snapshots.
//!
//! ```
//! use std::sync::Arc;
//!
//! use ccg_duel::cards::{CardDatabase, CardId, CardTemplate};
//! use ccg_duel::core::{Game, GameConfig, PlayerSetup, Snapshot};
//!
//! let mut db = CardDatabase::new();
//! db.register(CardTemplate::hero(CardId::new(1), "Hero", 30)).unwrap();
//! db.register(CardTemplate::hero_power(CardId::new(2), "Power", 2)).unwrap();
//! let db = Arc::new(db);
//!
//! let setup = PlayerSetup::new(CardId::new(1), CardId::new(2));
//! let config = GameConfig::new(setup.clone(), setup).with_logging(false);
//! let game = Game::new(config.clone(), Arc::clone(&db)).unwrap();
//!
//! let bytes = game.snapshot().to_bytes().unwrap();
//! let restored = Game::restore(Snapshot::from_bytes(&bytes).unwrap(), db, config).unwrap();
//! assert_eq!(restored.snapshot(), game.snapshot());
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::GameConfig;
use super::controller::Controller;
use super::entity::EntityId;
use super::player::{PlayerId, PlayerMap};
use super::rng::{GameRng, GameRngState};
use super::state::{Game, GameStatus};
use super::tags::{GameTag, TagStore};
use crate::cards::{CardDatabase, CardId, Entity};
use crate::enchants::Enchantment;
use crate::error::{EngineError, Result};
use crate::logging::{LogSink, NullSink, TracingSink};
use crate::triggers::GameEvent;
use crate::zones::ZoneKey;

/// One entity in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub card: CardId,
    pub controller: PlayerId,
    pub tags: Vec<(GameTag, i32)>,
    pub enchantments: Vec<Enchantment>,
}

/// One zone in a snapshot, members in zone order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSnapshot {
    pub key: ZoneKey,
    pub members: Vec<EntityId>,
}

/// Complete mutable state of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub turn: u32,
    pub current_player: PlayerId,
    pub status: GameStatus,
    pub next_entity_id: u32,
    pub next_order_of_play: i32,
    pub rng: GameRngState,
    pub controllers: PlayerMap<Controller>,
    pub entities: Vec<EntitySnapshot>,
    pub zones: Vec<ZoneSnapshot>,
    pub pending_events: Vec<GameEvent>,
    pub history: Vec<ActionRecord>,
}

impl Snapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| EngineError::Serialization(e.to_string()))
    }

    /// Decode bytes produced by [`Snapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| EngineError::Serialization(e.to_string()))
    }
}

impl Game {
    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let entities = self
            .entities
            .values()
            .map(|entity| EntitySnapshot {
                id: entity.id,
                card: entity.card_id(),
                controller: entity.controller,
                tags: entity.tags.iter().collect(),
                enchantments: entity.enchantments.clone(),
            })
            .collect();

        let zones = self
            .zones
            .occupied()
            .into_iter()
            .map(|key| ZoneSnapshot {
                key,
                members: self.zones.members(key).to_vec(),
            })
            .collect();

        Snapshot {
            turn: self.turn,
            current_player: self.current_player,
            status: self.status,
            next_entity_id: self.next_entity_id,
            next_order_of_play: self.next_order_of_play,
            rng: self.rng.state(),
            controllers: self.controllers.clone(),
            entities,
            zones,
            pending_events: self.events.clone(),
            history: self.history.iter().cloned().collect(),
        }
    }

    /// Rebuild a game from a snapshot, the card database it was taken with
    /// and its configuration.
    pub fn restore(snapshot: Snapshot, cards: Arc<CardDatabase>, config: GameConfig) -> Result<Self> {
        let sink: Arc<dyn LogSink> = if config.logging {
            Arc::new(TracingSink)
        } else {
            Arc::new(NullSink)
        };
        let mut game = Self::empty(Arc::new(config), cards, sink);

        for saved in snapshot.entities {
            if saved.id.raw() >= snapshot.next_entity_id {
                return Err(EngineError::InvalidSnapshot(format!(
                    "{} is not below the next entity id {}",
                    saved.id, snapshot.next_entity_id
                )));
            }
            let card = game.cards.lookup(saved.card)?;
            let mut entity = Entity::new(saved.id, saved.controller, card);
            entity.tags = saved.tags.into_iter().collect::<TagStore>();
            entity.enchantments = saved.enchantments;
            game.entities.insert(saved.id, entity);
        }

        for zone in &snapshot.zones {
            for &id in &zone.members {
                if !game.entities.contains_key(&id) {
                    return Err(EngineError::InvalidSnapshot(format!(
                        "{id} is listed in {:?} but has no entity",
                        zone.key
                    )));
                }
                game.zones.add(id, zone.key, None)?;
            }
            for &id in &zone.members {
                game.register_triggers(id, zone.key.zone)?;
            }
        }

        for (_, controller) in snapshot.controllers.iter() {
            for id in [controller.hero, controller.hero_power] {
                if !game.entities.contains_key(&id) {
                    return Err(EngineError::InvalidSnapshot(format!(
                        "{} references missing {id}",
                        controller.id
                    )));
                }
            }
        }

        game.controllers = snapshot.controllers;
        game.turn = snapshot.turn;
        game.current_player = snapshot.current_player;
        game.status = snapshot.status;
        game.next_entity_id = snapshot.next_entity_id;
        game.next_order_of_play = snapshot.next_order_of_play;
        game.rng = GameRng::from_state(&snapshot.rng);
        game.events = snapshot.pending_events;
        game.history = snapshot.history.into_iter().collect();
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardTemplate;
    use crate::core::{Action, PlayerSetup};
    use crate::zones::Zone;

    const HERO: CardId = CardId(1);
    const POWER: CardId = CardId(2);
    const WISP: CardId = CardId(3);

    fn database() -> Arc<CardDatabase> {
        let mut db = CardDatabase::new();
        db.register(CardTemplate::hero(HERO, "Hero", 30)).unwrap();
        db.register(CardTemplate::hero_power(POWER, "Power", 2)).unwrap();
        db.register(CardTemplate::minion(WISP, "Wisp", 0, 1, 1)).unwrap();
        Arc::new(db)
    }

    fn config() -> GameConfig {
        let setup = PlayerSetup::new(HERO, POWER).with_deck(vec![WISP; 8]);
        GameConfig::new(setup.clone(), setup).with_logging(false).with_seed(9)
    }

    #[test]
    fn test_restore_matches_original() {
        let db = database();
        let mut game = Game::new(config(), Arc::clone(&db)).unwrap();
        let wisp = game.hand(PlayerId::FIRST)[0];
        game.apply_action(PlayerId::FIRST, &Action::play(wisp)).unwrap();

        let restored = Game::restore(game.snapshot(), db, config()).unwrap();
        assert_eq!(restored.snapshot(), game.snapshot());
        assert_eq!(restored.board(PlayerId::FIRST), &[wisp]);
        assert_eq!(restored.history().len(), 1);
    }

    #[test]
    fn test_restored_game_plays_on_identically() {
        let db = database();
        let mut game = Game::new(config(), Arc::clone(&db)).unwrap();
        let mut restored = Game::restore(game.snapshot(), db, config()).unwrap();

        for g in [&mut game, &mut restored] {
            g.apply_action(PlayerId::FIRST, &Action::EndTurn).unwrap();
            g.apply_action(PlayerId::SECOND, &Action::EndTurn).unwrap();
        }
        assert_eq!(restored.snapshot(), game.snapshot());
    }

    #[test]
    fn test_bytes_round_trip() {
        let game = Game::new(config(), database()).unwrap();
        let snapshot = game.snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(Snapshot::from_bytes(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn test_dangling_zone_member_rejected() {
        let game = Game::new(config(), database()).unwrap();
        let mut snapshot = game.snapshot();
        snapshot.zones.push(ZoneSnapshot {
            key: ZoneKey::new(PlayerId::FIRST, Zone::Graveyard),
            members: vec![EntityId(999)],
        });

        let err = Game::restore(snapshot, database(), config()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSnapshot(_)));
    }
}
