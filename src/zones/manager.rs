//! Zone manager for entity locations and movement.
//!
//! Every placed entity belongs to exactly one `(player, zone)` container.
//! Containers are ordered; index 0 is the leftmost board slot, the first card
//! in hand, and the bottom of the deck (the top of the deck is the last
//! element). Removal compacts the remaining entries so positions are always
//! contiguous and 0-based.
//!
//! Capacity is enforced before anything changes: a move into a full zone
//! fails with [`EngineError::ZoneFull`] and leaves both zones untouched.
//!
//! The manager only tracks membership. Mirroring membership into the `Zone`
//! and `ZonePosition` tags, and the side effects of entering or leaving play,
//! belong to `Game::move_entity`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::ZoneCapacities;
use crate::core::entity::EntityId;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::error::{EngineError, Result};

/// Kind of container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Not placed anywhere yet.
    Invalid,
    /// Hero, hero power and the equipped weapon.
    Play,
    Deck,
    Hand,
    Graveyard,
    Setaside,
    Secret,
    /// Minions in play.
    Board,
}

impl Zone {
    /// Every real zone, in snapshot order.
    pub const ALL: [Zone; 7] = [
        Zone::Play,
        Zone::Deck,
        Zone::Hand,
        Zone::Graveyard,
        Zone::Setaside,
        Zone::Secret,
        Zone::Board,
    ];

    /// Value stored in the `Zone` tag.
    #[must_use]
    pub const fn to_tag(self) -> i32 {
        match self {
            Zone::Invalid => 0,
            Zone::Play => 1,
            Zone::Deck => 2,
            Zone::Hand => 3,
            Zone::Graveyard => 4,
            Zone::Setaside => 5,
            Zone::Secret => 6,
            Zone::Board => 7,
        }
    }

    /// Inverse of [`Zone::to_tag`]; unknown values map to `Invalid`.
    #[must_use]
    pub const fn from_tag(value: i32) -> Self {
        match value {
            1 => Zone::Play,
            2 => Zone::Deck,
            3 => Zone::Hand,
            4 => Zone::Graveyard,
            5 => Zone::Setaside,
            6 => Zone::Secret,
            7 => Zone::Board,
            _ => Zone::Invalid,
        }
    }

    /// Zones whose members are "in play": they get an order of play on entry
    /// and lose their temporary state on exit.
    #[must_use]
    pub const fn is_in_play(self) -> bool {
        matches!(self, Zone::Play | Zone::Board | Zone::Secret)
    }
}

/// One player's container of a given kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ZoneKey {
    pub player: PlayerId,
    pub zone: Zone,
}

impl ZoneKey {
    #[must_use]
    pub const fn new(player: PlayerId, zone: Zone) -> Self {
        Self { player, zone }
    }
}

/// Position for inserting into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// After the last element (rightmost slot, top of deck).
    Top,
    /// Before the first element.
    Bottom,
    /// At a specific index, clamped to the current length.
    Index(usize),
}

/// Result of a successful move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneMove {
    pub from: Option<ZoneKey>,
    pub to: ZoneKey,
    pub index: usize,
}

/// Tracks which container every placed entity is in.
///
/// ## Usage
///
/// ```
/// use ccg_duel::core::{EntityId, PlayerId, ZoneCapacities};
/// use ccg_duel::zones::{Zone, ZoneKey, ZoneManager, ZonePosition};
///
/// let mut zones = ZoneManager::new(ZoneCapacities::default());
/// let board = ZoneKey::new(PlayerId::FIRST, Zone::Board);
///
/// zones.add(EntityId(10), board, None).unwrap();
/// zones.add(EntityId(11), board, Some(ZonePosition::Bottom)).unwrap();
///
/// assert_eq!(zones.members(board), &[EntityId(11), EntityId(10)]);
/// assert_eq!(zones.position_of(EntityId(10)), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct ZoneManager {
    locations: FxHashMap<EntityId, ZoneKey>,
    members: FxHashMap<ZoneKey, Vec<EntityId>>,
    capacities: ZoneCapacities,
}

impl ZoneManager {
    /// Create an empty manager with the given capacity limits.
    #[must_use]
    pub fn new(capacities: ZoneCapacities) -> Self {
        Self {
            locations: FxHashMap::default(),
            members: FxHashMap::default(),
            capacities,
        }
    }

    /// Capacity limit of a zone kind; `None` is unbounded.
    #[must_use]
    pub fn capacity(&self, zone: Zone) -> Option<usize> {
        self.capacities.capacity(zone)
    }

    /// Place an entity that is not yet in any zone.
    ///
    /// Returns the index it was inserted at.
    pub fn add(&mut self, entity: EntityId, key: ZoneKey, position: Option<ZonePosition>) -> Result<usize> {
        if self.locations.contains_key(&entity) {
            return Err(EngineError::AlreadyPlaced(entity));
        }
        self.ensure_room(key)?;
        Ok(self.insert(entity, key, position))
    }

    /// Move a placed entity to another zone (or another position in the same
    /// zone).
    pub fn move_to(&mut self, entity: EntityId, key: ZoneKey, position: Option<ZonePosition>) -> Result<ZoneMove> {
        let from = *self
            .locations
            .get(&entity)
            .ok_or(EngineError::NotPlaced(entity))?;

        if from != key {
            self.ensure_room(key)?;
        }

        self.detach(entity, from);
        let index = self.insert(entity, key, position);
        Ok(ZoneMove {
            from: Some(from),
            to: key,
            index,
        })
    }

    /// Remove an entity from its zone entirely.
    ///
    /// Returns the zone and index it occupied.
    pub fn remove(&mut self, entity: EntityId) -> Result<(ZoneKey, usize)> {
        let key = self
            .locations
            .remove(&entity)
            .ok_or(EngineError::NotPlaced(entity))?;
        let index = self.detach(entity, key);
        Ok((key, index))
    }

    /// Members of a zone, in order.
    #[must_use]
    pub fn members(&self, key: ZoneKey) -> &[EntityId] {
        self.members.get(&key).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn count(&self, key: ZoneKey) -> usize {
        self.members(key).len()
    }

    #[must_use]
    pub fn is_full(&self, key: ZoneKey) -> bool {
        match self.capacity(key.zone) {
            Some(cap) => self.count(key) >= cap,
            None => false,
        }
    }

    /// Zone an entity is in, if placed.
    #[must_use]
    pub fn zone_of(&self, entity: EntityId) -> Option<ZoneKey> {
        self.locations.get(&entity).copied()
    }

    /// Index of an entity within its zone.
    #[must_use]
    pub fn position_of(&self, entity: EntityId) -> Option<usize> {
        let key = self.zone_of(entity)?;
        self.members(key).iter().position(|&e| e == entity)
    }

    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.locations.contains_key(&entity)
    }

    /// Last element of a zone (top of a deck).
    #[must_use]
    pub fn top(&self, key: ZoneKey) -> Option<EntityId> {
        self.members(key).last().copied()
    }

    /// Shuffle a zone's order.
    pub fn shuffle(&mut self, key: ZoneKey, rng: &mut GameRng) {
        if let Some(order) = self.members.get_mut(&key) {
            rng.shuffle(order);
        }
    }

    /// Non-empty zones in key order.
    pub fn occupied(&self) -> Vec<ZoneKey> {
        let mut keys: Vec<ZoneKey> = self
            .members
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(&k, _)| k)
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Total number of placed entities.
    #[must_use]
    pub fn total(&self) -> usize {
        self.locations.len()
    }

    fn ensure_room(&self, key: ZoneKey) -> Result<()> {
        if let Some(capacity) = self.capacity(key.zone) {
            if self.count(key) >= capacity {
                return Err(EngineError::ZoneFull {
                    player: key.player,
                    zone: key.zone,
                    capacity,
                });
            }
        }
        Ok(())
    }

    fn insert(&mut self, entity: EntityId, key: ZoneKey, position: Option<ZonePosition>) -> usize {
        self.locations.insert(entity, key);
        let order = self.members.entry(key).or_default();
        let index = match position.unwrap_or(ZonePosition::Top) {
            ZonePosition::Top => order.len(),
            ZonePosition::Bottom => 0,
            ZonePosition::Index(i) => i.min(order.len()),
        };
        order.insert(index, entity);
        index
    }

    fn detach(&mut self, entity: EntityId, key: ZoneKey) -> usize {
        let Some(order) = self.members.get_mut(&key) else {
            return 0;
        };
        match order.iter().position(|&e| e == entity) {
            Some(index) => {
                order.remove(index);
                index
            }
            None => 0,
        }
    }
}
