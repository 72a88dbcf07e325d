//! Tag-indexed entity state.
//!
//! Every attribute of every game object is an integer stored under a
//! [`GameTag`]. Higher-level properties (health, cost, zone, position, order
//! of play, the hero's weapon link) are accessors over this one store, so
//! cloning and snapshotting need no per-property code.
//!
//! ## Semantics
//!
//! - `get` returns 0 for an unset tag and never fails.
//! - `set` overwrites unconditionally. Setting 0 drops the entry, which keeps
//!   two stores with the same visible values structurally equal.
//! - Entity references are stored with [`EntityId::to_tag_value`].
//!
//! ```
//! use ccg_duel::core::{GameTag, TagStore};
//!
//! let mut tags = TagStore::new();
//! assert_eq!(tags.get(GameTag::Atk), 0);
//!
//! tags.set(GameTag::Atk, 3);
//! tags.add(GameTag::Atk, 2);
//! assert_eq!(tags.get(GameTag::Atk), 5);
//!
//! tags.set(GameTag::Atk, 0);
//! assert!(tags.is_empty());
//! ```
//!
//! [`EntityId::to_tag_value`]: crate::core::EntityId::to_tag_value

use im::OrdMap;
use serde::{Deserialize, Serialize};

/// The closed set of state keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameTag {
    // Location
    Zone,
    ZonePosition,
    Controller,

    // Stats
    Cost,
    Atk,
    Health,
    Damage,
    Durability,
    Armor,
    SpellPower,
    Overload,

    // Keywords
    Taunt,
    Charge,
    Windfury,
    DivineShield,
    Lifesteal,
    Secret,

    // Status
    Exhausted,
    Frozen,
    Silenced,
    ToBeDestroyed,
    JustPlayed,
    NumAttacksThisTurn,
    NumTurnsInPlay,
    KeepEnchantments,
    Revealed,
    OrderOfPlay,
    CardTarget,

    // Hero links
    Weapon,

    // Controller counters
    Resources,
    ResourcesUsed,
    TempResources,
    OverloadOwed,
    OverloadLocked,
    Fatigue,
    NumFriendlyMinionsDied,
    ProxyEntity,
    SeenProxy,
}

/// Mapping from tags to integer values.
///
/// Backed by a persistent ordered map: clone is O(1) and iteration order is
/// deterministic, which keeps snapshots stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStore {
    values: OrdMap<GameTag, i32>,
}

impl TagStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `tag`, or 0 when unset.
    #[must_use]
    pub fn get(&self, tag: GameTag) -> i32 {
        self.values.get(&tag).copied().unwrap_or(0)
    }

    /// Overwrite `tag`.
    pub fn set(&mut self, tag: GameTag, value: i32) {
        if value == 0 {
            self.values.remove(&tag);
        } else {
            self.values.insert(tag, value);
        }
    }

    /// Add `delta` to `tag` and return the new value.
    pub fn add(&mut self, tag: GameTag, delta: i32) -> i32 {
        let value = self.get(tag) + delta;
        self.set(tag, value);
        value
    }

    /// Boolean view of `tag` (non-zero is true).
    #[must_use]
    pub fn flag(&self, tag: GameTag) -> bool {
        self.get(tag) != 0
    }

    pub fn set_flag(&mut self, tag: GameTag, on: bool) {
        self.set(tag, i32::from(on));
    }

    /// Builder form of `set`.
    #[must_use]
    pub fn with(mut self, tag: GameTag, value: i32) -> Self {
        self.set(tag, value);
        self
    }

    /// Non-zero entries in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (GameTag, i32)> + '_ {
        self.values.iter().map(|(&tag, &value)| (tag, value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(GameTag, i32)> for TagStore {
    fn from_iter<I: IntoIterator<Item = (GameTag, i32)>>(iter: I) -> Self {
        let mut store = TagStore::new();
        for (tag, value) in iter {
            store.set(tag, value);
        }
        store
    }
}
