//! Action legality.
//!
//! Each check returns `Ok(Legality)`: `Ok(Ok(()))` when permitted and
//! `Ok(Err(reason))` when the action is illegal. The outer `Err` is reserved
//! for contract violations such as an unknown entity or an unhandled play
//! requirement. None of the checks mutate the game.

use crate::cards::{EntityKind, PlayReq};
use crate::core::{EntityId, Game, PlayerId};
use crate::error::{EngineError, IllegalReason, Legality, Result};
use crate::zones::Zone;

impl Game {
    /// Turn, ownership, zone, mana and board checks for playing `source`.
    pub fn is_playable_by_player(&self, player: PlayerId, source: EntityId) -> Result<Legality> {
        if self.is_over() {
            return Ok(Err(IllegalReason::GameOver));
        }
        if player != self.current_player {
            return Ok(Err(IllegalReason::NotActivePlayer));
        }
        let entity = self.entity(source)?;
        if entity.controller != player {
            return Ok(Err(IllegalReason::NotOwner));
        }

        let kind = entity.kind();
        match kind {
            EntityKind::HeroPower => {
                if entity.zone() != Zone::Play {
                    return Ok(Err(IllegalReason::WrongZone));
                }
                if self.playable(source)?.is_exhausted() {
                    return Ok(Err(IllegalReason::HeroPowerUsed));
                }
            }
            EntityKind::Minion | EntityKind::Spell | EntityKind::Secret | EntityKind::Weapon => {
                if entity.zone() != Zone::Hand {
                    return Ok(Err(IllegalReason::WrongZone));
                }
            }
            EntityKind::Hero | EntityKind::Enchantment => return Ok(Err(IllegalReason::NotPlayable)),
        }

        let cost = self.playable(source)?.cost();
        let available = self.controller(player).remaining_mana();
        if cost > available {
            return Ok(Err(IllegalReason::NotEnoughMana { cost, available }));
        }

        if kind == EntityKind::Minion && self.is_zone_full(player, Zone::Board) {
            return Ok(Err(IllegalReason::BoardFull));
        }

        if kind == EntityKind::Secret {
            let card = entity.card_id();
            let active = self
                .members(player, Zone::Secret)
                .iter()
                .filter_map(|&id| self.get_entity(id))
                .any(|secret| secret.card_id() == card);
            if active {
                return Ok(Err(IllegalReason::SecretAlreadyActive));
            }
        }
        Ok(Ok(()))
    }

    /// Card-level requirements of `source`, independent of the chosen target.
    pub fn is_playable_by_card_req(&self, source: EntityId, target: Option<EntityId>) -> Result<Legality> {
        let entity = self.entity(source)?;
        let card = entity.card();
        let player = entity.controller;

        if target.is_none() {
            if card.has_requirement(PlayReq::TargetToPlay) {
                return Ok(Err(IllegalReason::MissingTarget));
            }
            if card.has_requirement(PlayReq::TargetIfAvailable) && !self.valid_play_targets(source)?.is_empty() {
                return Ok(Err(IllegalReason::MissingTarget));
            }
        }

        for &(req, param) in &card.requirements {
            let met = match req {
                PlayReq::NumMinionSlots => !self.is_zone_full(player, Zone::Board),
                PlayReq::EntireEntourageNotInPlay => {
                    let board: Vec<_> = self
                        .board(player)
                        .iter()
                        .filter_map(|&id| self.get_entity(id))
                        .map(|minion| minion.card_id())
                        .collect();
                    !card.entourage.iter().all(|id| board.contains(id))
                }
                PlayReq::WeaponEquipped => self.weapon_of(player).is_some(),
                PlayReq::MinimumEnemyMinions => self.board(player.opponent()).len() as i32 >= param,
                PlayReq::MinimumTotalMinions => {
                    let total: usize = PlayerId::both().map(|p| self.board(p).len()).sum();
                    total as i32 >= param
                }
                PlayReq::FriendlyMinionDiedThisGame => self.controller(player).minions_died() > 0,
                PlayReq::RequiresHeroPower => {
                    let power = self.entity(self.hero_power(player))?;
                    i64::from(power.card_id().raw()) == i64::from(param)
                }
                PlayReq::TargetToPlay
                | PlayReq::TargetIfAvailable
                | PlayReq::MinionTarget
                | PlayReq::FriendlyTarget
                | PlayReq::EnemyTarget
                | PlayReq::DamagedTarget
                | PlayReq::UndamagedTarget
                | PlayReq::FrozenTarget
                | PlayReq::TargetMaxAttack
                | PlayReq::TargetMinAttack
                | PlayReq::NonSelfTarget
                | PlayReq::MustTargetTaunter
                | PlayReq::TargetWithDeathrattle => true,
                PlayReq::Other(code) => return Err(EngineError::UnhandledPlayRequirement(code)),
            };
            if !met {
                return Ok(Err(IllegalReason::RequirementNotMet(req)));
            }
        }
        Ok(Ok(()))
    }

    /// The chosen target, if any, is one `source` may take.
    pub fn validate_target(&self, source: EntityId, target: Option<EntityId>) -> Result<Legality> {
        match target {
            Some(target) if !self.is_valid_play_target(source, target)? => Ok(Err(IllegalReason::InvalidTarget)),
            _ => Ok(Ok(())),
        }
    }

    /// Every check needed before `player` may play `source` at `target`.
    pub fn is_playable(&self, player: PlayerId, source: EntityId, target: Option<EntityId>) -> Result<Legality> {
        if let Err(reason) = self.is_playable_by_player(player, source)? {
            return Ok(Err(reason));
        }
        if let Err(reason) = self.is_playable_by_card_req(source, target)? {
            return Ok(Err(reason));
        }
        self.validate_target(source, target)
    }

    /// Whether `attacker` may attack `defender` for `player` right now.
    pub fn validate_attack(&self, player: PlayerId, attacker: EntityId, defender: EntityId) -> Result<Legality> {
        if self.is_over() {
            return Ok(Err(IllegalReason::GameOver));
        }
        if player != self.current_player {
            return Ok(Err(IllegalReason::NotActivePlayer));
        }
        let entity = self.entity(attacker)?;
        if entity.controller != player {
            return Ok(Err(IllegalReason::NotOwner));
        }
        if !entity.is_character() || !self.can_attack(attacker)? {
            return Ok(Err(IllegalReason::CannotAttack));
        }
        if !self.valid_attack_targets(attacker)?.contains(&defender) {
            return Ok(Err(IllegalReason::InvalidTarget));
        }
        Ok(Ok(()))
    }
}
