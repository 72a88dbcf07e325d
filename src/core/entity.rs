//! Entity identification.
//!
//! Every game object (hero, hero power, minion, spell, weapon, secret, proxy)
//! has a unique `EntityId`, allocated from a per-game counter that starts at
//! 1 and never reuses values. Id 0 is reserved to mean "no entity" when an id
//! is stored inside an integer tag (for example the hero's weapon link).
//!
//! ## Usage
//!
//! ```
//! use ccg_duel::core::EntityId;
//!
//! let weapon = EntityId::new(12);
//! assert_eq!(weapon.to_tag_value(), 12);
//! assert_eq!(EntityId::from_tag_value(12), Some(weapon));
//! assert_eq!(EntityId::from_tag_value(0), None);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for any game entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The first id handed out by a new game.
    pub const FIRST: EntityId = EntityId(1);

    /// Create an entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Encode for storage in an integer tag.
    #[must_use]
    pub const fn to_tag_value(self) -> i32 {
        self.0 as i32
    }

    /// Decode an id stored in an integer tag. Zero and negative values mean
    /// "no entity".
    #[must_use]
    pub const fn from_tag_value(value: i32) -> Option<Self> {
        if value > 0 {
            Some(Self(value as u32))
        } else {
            None
        }
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_value_round_trip() {
        let id = EntityId::new(42);
        assert_eq!(EntityId::from_tag_value(id.to_tag_value()), Some(id));
    }

    #[test]
    fn test_zero_is_no_entity() {
        assert_eq!(EntityId::from_tag_value(0), None);
        assert_eq!(EntityId::from_tag_value(-3), None);
    }

    #[test]
    fn test_ordering_follows_allocation() {
        assert!(EntityId::FIRST < EntityId(2));
        assert!(EntityId(9) < EntityId(10));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "Entity(42)");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
