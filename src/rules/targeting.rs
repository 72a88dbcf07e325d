//! Legal targets for plays and attacks.

use crate::cards::{CardTemplate, PlayReq};
use crate::core::{EntityId, Game, PlayerId};
use crate::error::{EngineError, Result};
use crate::tasks::Selection;

impl Game {
    /// Heroes and minions of both players, first player first.
    pub(crate) fn all_characters(&self) -> Selection {
        let mut characters = Selection::new();
        for player in PlayerId::both() {
            characters.push(self.hero(player));
            characters.extend_from_slice(self.board(player));
        }
        characters
    }

    /// Characters `source` may target when played. Empty when the card does
    /// not take a target.
    pub fn valid_play_targets(&self, source: EntityId) -> Result<Selection> {
        let card = self.entity(source)?.card();
        let mut targets = Selection::new();
        if !card.takes_target() {
            return Ok(targets);
        }
        for candidate in self.all_characters() {
            if self.meets_target_requirements(source, card, candidate)? {
                targets.push(candidate);
            }
        }
        Ok(targets)
    }

    /// Whether `target` satisfies every targeting requirement of `source`.
    pub fn is_valid_play_target(&self, source: EntityId, target: EntityId) -> Result<bool> {
        let card = self.entity(source)?.card();
        if !card.takes_target() || !self.all_characters().contains(&target) {
            return Ok(false);
        }
        self.meets_target_requirements(source, card, target)
    }

    fn meets_target_requirements(&self, source: EntityId, card: &CardTemplate, target: EntityId) -> Result<bool> {
        let controller = self.entity(source)?.controller;
        let character = self.character(target)?;

        for &(req, param) in &card.requirements {
            let met = match req {
                PlayReq::TargetToPlay | PlayReq::TargetIfAvailable => true,
                PlayReq::MinionTarget => !character.is_hero(),
                PlayReq::FriendlyTarget => character.controller() == controller,
                PlayReq::EnemyTarget => character.controller() != controller,
                PlayReq::DamagedTarget => character.is_damaged(),
                PlayReq::UndamagedTarget => !character.is_damaged(),
                PlayReq::FrozenTarget => character.is_frozen(),
                PlayReq::TargetMaxAttack => character.attack() <= param,
                PlayReq::TargetMinAttack => character.attack() >= param,
                PlayReq::NonSelfTarget => target != source,
                PlayReq::MustTargetTaunter => character.has_taunt(),
                PlayReq::TargetWithDeathrattle => character.has_deathrattle(),
                PlayReq::NumMinionSlots
                | PlayReq::EntireEntourageNotInPlay
                | PlayReq::WeaponEquipped
                | PlayReq::MinimumEnemyMinions
                | PlayReq::MinimumTotalMinions
                | PlayReq::FriendlyMinionDiedThisGame
                | PlayReq::RequiresHeroPower => true,
                PlayReq::Other(code) => return Err(EngineError::UnhandledPlayRequirement(code)),
            };
            if !met {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Enemy characters `attacker` may attack. Taunt minions shield the rest.
    pub fn valid_attack_targets(&self, attacker: EntityId) -> Result<Selection> {
        let enemy = self.entity(attacker)?.controller.opponent();

        let mut taunts = Selection::new();
        for &id in self.board(enemy) {
            if self.character(id)?.has_taunt() {
                taunts.push(id);
            }
        }
        if !taunts.is_empty() {
            return Ok(taunts);
        }

        let mut targets = Selection::new();
        targets.push(self.hero(enemy));
        targets.extend_from_slice(self.board(enemy));
        Ok(targets)
    }

    /// Whether `attacker` is able to attack at all right now.
    pub fn can_attack(&self, attacker: EntityId) -> Result<bool> {
        let character = self.character(attacker)?;
        let player = character.controller();
        let placed = if character.is_hero() {
            self.hero(player) == attacker
        } else {
            self.board(player).contains(&attacker)
        };
        Ok(placed
            && character.attack() > 0
            && !character.is_exhausted()
            && !character.is_frozen())
    }
}
