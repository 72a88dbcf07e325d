//! Per-player aggregate.
//!
//! A `Controller` is created once per participant and lives for the whole
//! game. It links to the player's hero and hero-power entities by id and
//! keeps the player-level counters (mana, overload, fatigue, ritual proxy)
//! in its own [`TagStore`], so snapshots treat it like any other entity.
//!
//! ## Mana
//!
//! Available mana is `Resources + TempResources - ResourcesUsed`. Paying a
//! cost spends temporary mana first. Overload owed from this turn becomes
//! locked (pre-spent) mana at the start of the next turn.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;
use super::tags::{GameTag, TagStore};

/// One participant's state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    pub id: PlayerId,
    pub hero: EntityId,
    pub hero_power: EntityId,
    pub tags: TagStore,
}

impl Controller {
    #[must_use]
    pub fn new(id: PlayerId, hero: EntityId, hero_power: EntityId) -> Self {
        Self {
            id,
            hero,
            hero_power,
            tags: TagStore::new(),
        }
    }

    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.id.opponent()
    }

    /// Mana crystals this turn.
    #[must_use]
    pub fn base_mana(&self) -> i32 {
        self.tags.get(GameTag::Resources)
    }

    pub fn set_base_mana(&mut self, mana: i32) {
        self.tags.set(GameTag::Resources, mana);
    }

    #[must_use]
    pub fn used_mana(&self) -> i32 {
        self.tags.get(GameTag::ResourcesUsed)
    }

    #[must_use]
    pub fn temp_mana(&self) -> i32 {
        self.tags.get(GameTag::TempResources)
    }

    /// Mana left to spend this turn.
    #[must_use]
    pub fn remaining_mana(&self) -> i32 {
        (self.base_mana() + self.temp_mana() - self.used_mana()).max(0)
    }

    /// Spend `cost`, temporary mana first.
    pub fn pay(&mut self, cost: i32) {
        let cost = cost.max(0);
        let from_temp = cost.min(self.temp_mana());
        self.tags.add(GameTag::TempResources, -from_temp);
        self.tags.add(GameTag::ResourcesUsed, cost - from_temp);
    }

    /// Refill for a new turn: one more crystal up to `max_mana`, then lock
    /// any overload owed.
    pub fn refresh_mana(&mut self, max_mana: i32) {
        let base = (self.base_mana() + 1).min(max_mana);
        self.set_base_mana(base);
        let owed = self.tags.get(GameTag::OverloadOwed);
        self.tags.set(GameTag::OverloadLocked, owed);
        self.tags.set(GameTag::ResourcesUsed, owed);
        self.tags.set(GameTag::OverloadOwed, 0);
        self.tags.set(GameTag::TempResources, 0);
    }

    /// Increment fatigue and return the damage it now deals.
    pub fn next_fatigue(&mut self) -> i32 {
        self.tags.add(GameTag::Fatigue, 1)
    }

    /// Ritual proxy entity, once created.
    #[must_use]
    pub fn proxy(&self) -> Option<EntityId> {
        EntityId::from_tag_value(self.tags.get(GameTag::ProxyEntity))
    }

    #[must_use]
    pub fn has_seen_proxy(&self) -> bool {
        self.tags.flag(GameTag::SeenProxy)
    }

    pub fn set_proxy(&mut self, proxy: EntityId) {
        self.tags.set(GameTag::ProxyEntity, proxy.to_tag_value());
        self.tags.set(GameTag::SeenProxy, 1);
    }

    #[must_use]
    pub fn minions_died(&self) -> i32 {
        self.tags.get(GameTag::NumFriendlyMinionsDied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> Controller {
        Controller::new(PlayerId::FIRST, EntityId(1), EntityId(2))
    }

    #[test]
    fn test_pay_spends_temp_first() {
        let mut c = controller();
        c.set_base_mana(5);
        c.tags.set(GameTag::TempResources, 2);
        assert_eq!(c.remaining_mana(), 7);

        c.pay(3);
        assert_eq!(c.temp_mana(), 0);
        assert_eq!(c.used_mana(), 1);
        assert_eq!(c.remaining_mana(), 4);
    }

    #[test]
    fn test_refresh_caps_and_locks_overload() {
        let mut c = controller();
        c.set_base_mana(9);
        c.tags.set(GameTag::OverloadOwed, 2);
        c.pay(9);

        c.refresh_mana(10);
        assert_eq!(c.base_mana(), 10);
        assert_eq!(c.used_mana(), 2);
        assert_eq!(c.remaining_mana(), 8);

        c.refresh_mana(10);
        assert_eq!(c.base_mana(), 10);
        assert_eq!(c.remaining_mana(), 10);
    }

    #[test]
    fn test_fatigue_increments() {
        let mut c = controller();
        assert_eq!(c.next_fatigue(), 1);
        assert_eq!(c.next_fatigue(), 2);
    }

    #[test]
    fn test_proxy_link() {
        let mut c = controller();
        assert_eq!(c.proxy(), None);
        assert!(!c.has_seen_proxy());

        c.set_proxy(EntityId(40));
        assert_eq!(c.proxy(), Some(EntityId(40)));
        assert!(c.has_seen_proxy());
    }
}
