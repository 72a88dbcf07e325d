//! Rule blocks: the multi-step procedures actions and tasks are built from.
//!
//! Every block mutates through the state primitives on [`Game`] and leaves
//! the reaction drain to its caller, except the action-level blocks
//! (`play_card_block`, `attack_block`, `hero_power_block` and the turn
//! blocks), which drain before returning.

use crate::cards::{CardId, EntityKind, PowerActivation};
use crate::core::{EntityId, Game, GameTag, PlayerId};
use crate::enchants::EnchantmentActivation;
use crate::error::{EngineError, Result};
use crate::logging::LogLevel;
use crate::triggers::{EventKind, GameEvent};
use crate::zones::{Zone, ZonePosition};

impl Game {
    /// Total spell power on `player`'s board.
    #[must_use]
    pub fn spell_power(&self, player: PlayerId) -> i32 {
        self.board(player)
            .iter()
            .filter_map(|&id| self.get_entity(id))
            .map(|entity| self.effective(entity, GameTag::SpellPower))
            .sum()
    }

    /// Deal `amount` damage from `source` to the character `target`.
    ///
    /// A divine shield absorbs the whole hit and breaks; armor absorbs what
    /// it can. Returns the damage that landed.
    pub fn deal_damage(&mut self, source: EntityId, target: EntityId, amount: i32) -> Result<i32> {
        if amount <= 0 {
            return Ok(0);
        }
        let (player, shielded, armor, oop) = {
            let character = self.character(target)?;
            (
                character.controller(),
                character.has_divine_shield(),
                character.armor(),
                character.entity().order_of_play(),
            )
        };

        if shielded {
            self.set_tag(target, GameTag::DivineShield, 0)?;
            self.log(LogLevel::Verbose, "Damage", || format!("{target} lost its divine shield"));
            return Ok(0);
        }

        let absorbed = armor.min(amount).max(0);
        let dealt = amount - absorbed;
        {
            let entity = self.entity_mut(target)?;
            if absorbed > 0 {
                entity.tags.add(GameTag::Armor, -absorbed);
            }
            if dealt > 0 {
                entity.tags.add(GameTag::Damage, dealt);
            }
        }
        if dealt == 0 {
            return Ok(0);
        }

        self.log(LogLevel::Info, "Damage", || format!("{source} dealt {dealt} to {target}"));
        self.enqueue(
            GameEvent::new(EventKind::Damage, target, player)
                .with_amount(dealt)
                .with_source(source)
                .with_order_of_play(oop),
        );

        let (lifesteal, owner) = {
            let entity = self.entity(source)?;
            let lifesteal = if entity.is_character() {
                self.character(source)?.has_lifesteal()
            } else {
                self.effective(entity, GameTag::Lifesteal) > 0
            };
            (lifesteal, entity.controller)
        };
        if lifesteal {
            let hero = self.hero(owner);
            self.heal(source, hero, dealt)?;
        }
        Ok(dealt)
    }

    /// Restore up to `amount` health to `target`. Returns the amount healed.
    pub fn heal(&mut self, source: EntityId, target: EntityId, amount: i32) -> Result<i32> {
        let (player, damage, oop) = {
            let character = self.character(target)?;
            (character.controller(), character.damage(), character.entity().order_of_play())
        };
        let healed = amount.min(damage);
        if healed <= 0 {
            return Ok(0);
        }

        self.entity_mut(target)?.tags.add(GameTag::Damage, -healed);
        self.log(LogLevel::Info, "Heal", || format!("{source} healed {target} for {healed}"));
        self.enqueue(
            GameEvent::new(EventKind::Heal, target, player)
                .with_amount(healed)
                .with_source(source)
                .with_order_of_play(oop),
        );
        Ok(healed)
    }

    /// Draw the top card of `player`'s deck.
    ///
    /// An empty deck deals increasing fatigue damage to the hero; a full hand
    /// burns the drawn card. Either way nothing reaches the hand and `None`
    /// is returned.
    pub fn draw_card(&mut self, player: PlayerId) -> Result<Option<EntityId>> {
        let Some(card) = self.members(player, Zone::Deck).last().copied() else {
            let fatigue = self.controller_mut(player).next_fatigue();
            let hero = self.hero(player);
            self.log(LogLevel::Info, "Draw", || format!("{player} takes {fatigue} fatigue"));
            self.deal_damage(hero, hero, fatigue)?;
            return Ok(None);
        };

        if self.is_zone_full(player, Zone::Hand) {
            self.move_entity(card, Zone::Graveyard, None)?;
            self.log(LogLevel::Info, "Draw", || format!("{player} burned {card}, hand is full"));
            return Ok(None);
        }

        self.move_entity(card, Zone::Hand, None)?;
        self.log(LogLevel::Verbose, "Draw", || format!("{player} drew {card}"));
        Ok(Some(card))
    }

    /// Put a new minion made from `card` onto `player`'s board.
    pub fn summon(
        &mut self,
        player: PlayerId,
        card: CardId,
        position: Option<usize>,
    ) -> Result<EntityId> {
        let id = self.spawn(player, card, Zone::Board, position.map(ZonePosition::Index))?;
        self.ready_minion(id)?;
        self.log(LogLevel::Verbose, "Summon", || format!("{player} summoned {id}"));
        Ok(id)
    }

    /// Minions arrive exhausted unless they have charge.
    fn ready_minion(&mut self, id: EntityId) -> Result<()> {
        let charge = self.tag(id, GameTag::Charge)? > 0;
        let entity = self.entity_mut(id)?;
        entity.tags.set(GameTag::Exhausted, i32::from(!charge));
        entity.tags.set(GameTag::NumTurnsInPlay, 0);
        entity.tags.set(GameTag::NumAttacksThisTurn, 0);
        Ok(())
    }

    /// Equip `weapon` for `player`, sending any equipped weapon to the
    /// graveyard first.
    pub fn equip_weapon(&mut self, player: PlayerId, weapon: EntityId) -> Result<()> {
        if let Some(old) = self.weapon_of(player) {
            self.log(LogLevel::Verbose, "Weapon", || format!("{old} is replaced by {weapon}"));
            self.move_entity(old, Zone::Graveyard, None)?;
        }
        self.move_entity(weapon, Zone::Play, None)?;
        let hero = self.hero(player);
        self.set_tag(hero, GameTag::Weapon, weapon.to_tag_value())?;

        // A windfury weapon lets a hero that attacked once swing again.
        let ready_again = {
            let character = self.character(hero)?;
            character.has_windfury()
                && character.entity().get(GameTag::Exhausted) > 0
                && character.num_attacks() == 1
        };
        if ready_again {
            self.set_tag(hero, GameTag::Exhausted, 0)?;
        }
        Ok(())
    }

    /// Play a card from hand: pay for it, put it where it belongs and run
    /// its play power.
    pub(crate) fn play_card_block(
        &mut self,
        player: PlayerId,
        source: EntityId,
        target: Option<EntityId>,
        position: Option<usize>,
    ) -> Result<()> {
        let (cost, overload, kind) = {
            let playable = self.playable(source)?;
            (playable.cost(), playable.overload(), playable.entity().kind())
        };

        {
            let controller = self.controller_mut(player);
            controller.pay(cost);
            if overload > 0 {
                controller.tags.add(GameTag::OverloadOwed, overload);
            }
        }
        if let Some(target) = target {
            self.set_tag(source, GameTag::CardTarget, target.to_tag_value())?;
        }
        self.log(LogLevel::Info, "Play", || {
            format!("{player} plays {source} for {cost} mana, target {target:?}")
        });

        match kind {
            EntityKind::Minion => {
                self.move_entity(source, Zone::Board, position.map(ZonePosition::Index))?;
                self.ready_minion(source)?;
                self.set_tag(source, GameTag::JustPlayed, 1)?;
                self.enqueue_play(source, player)?;
                self.drain()?;
                if self.entity(source)?.zone() == Zone::Board {
                    self.run_power(player, source, target, PowerActivation::Battlecry)?;
                }
            }
            EntityKind::Secret => {
                self.move_entity(source, Zone::Secret, None)?;
                self.enqueue_play(source, player)?;
                self.drain()?;
            }
            EntityKind::Spell => {
                self.move_entity(source, Zone::Setaside, None)?;
                self.assign_order_of_play(source)?;
                self.enqueue_play(source, player)?;
                self.drain()?;
                self.run_power(player, source, target, PowerActivation::Spell)?;
                if self.entity(source)?.zone() == Zone::Setaside {
                    self.move_entity(source, Zone::Graveyard, None)?;
                }
            }
            EntityKind::Weapon => {
                self.equip_weapon(player, source)?;
                self.enqueue_play(source, player)?;
                self.drain()?;
                if self.weapon_of(player) == Some(source) {
                    self.run_power(player, source, target, PowerActivation::Battlecry)?;
                }
            }
            EntityKind::Hero | EntityKind::HeroPower | EntityKind::Enchantment => {
                return Err(EngineError::WrongKind {
                    entity: source,
                    expected: "card playable from hand",
                });
            }
        }
        self.drain()
    }

    fn enqueue_play(&mut self, source: EntityId, player: PlayerId) -> Result<()> {
        let oop = self.entity(source)?.order_of_play();
        self.enqueue(GameEvent::new(EventKind::Play, source, player).with_order_of_play(oop));
        Ok(())
    }

    /// Run one of `source`'s card powers, if it has one.
    fn run_power(
        &mut self,
        player: PlayerId,
        source: EntityId,
        target: Option<EntityId>,
        activation: PowerActivation,
    ) -> Result<()> {
        if self.is_over() {
            return Ok(());
        }
        let tasks = self.entity(source)?.card().power(activation).cloned();
        if let Some(tasks) = tasks {
            self.run_tasks(player, source, target, &tasks)?;
        }
        Ok(())
    }

    /// Resolve combat between `attacker` and `defender`.
    pub(crate) fn attack_block(&mut self, player: PlayerId, attacker: EntityId, defender: EntityId) -> Result<()> {
        let (attack, is_hero, windfury) = {
            let character = self.character(attacker)?;
            (character.attack(), character.is_hero(), character.has_windfury())
        };
        let counter = self.character(defender)?.attack();
        self.log(LogLevel::Info, "Attack", || format!("{attacker} ({attack}) attacks {defender} ({counter})"));

        self.deal_damage(attacker, defender, attack)?;
        self.deal_damage(defender, attacker, counter)?;

        if is_hero {
            if let Some(weapon) = self.weapon_of(player) {
                self.entity_mut(weapon)?.tags.add(GameTag::Durability, -1);
            }
        }

        let entity = self.entity_mut(attacker)?;
        let attacks = entity.tags.add(GameTag::NumAttacksThisTurn, 1);
        if attacks >= if windfury { 2 } else { 1 } {
            entity.tags.set(GameTag::Exhausted, 1);
        }
        self.drain()
    }

    /// Use `player`'s hero power.
    pub(crate) fn hero_power_block(&mut self, player: PlayerId, target: Option<EntityId>) -> Result<()> {
        let power = self.hero_power(player);
        let cost = self.playable(power)?.cost();
        self.controller_mut(player).pay(cost);
        self.set_tag(power, GameTag::Exhausted, 1)?;
        if let Some(target) = target {
            self.set_tag(power, GameTag::CardTarget, target.to_tag_value())?;
        }
        self.log(LogLevel::Info, "HeroPower", || format!("{player} uses {power}, target {target:?}"));

        self.run_power(player, power, target, PowerActivation::HeroPower)?;
        self.drain()
    }

    /// In-play entities of both players, in order of play.
    fn in_play_by_order(&self) -> Vec<(EntityId, Zone)> {
        let mut entities: Vec<(i32, EntityId, Zone)> = Vec::new();
        for player in PlayerId::both() {
            for zone in [Zone::Play, Zone::Board, Zone::Secret] {
                for &id in self.members(player, zone) {
                    if let Some(entity) = self.get_entity(id) {
                        entities.push((entity.order_of_play(), id, zone));
                    }
                }
            }
        }
        entities.sort_unstable();
        entities.into_iter().map(|(_, id, zone)| (id, zone)).collect()
    }

    fn fire_turn_enchantments(&mut self, activation: EnchantmentActivation) -> Result<()> {
        for (id, zone) in self.in_play_by_order() {
            if self.is_over() {
                break;
            }
            self.apply_enchantments(id, activation, zone, None)?;
        }
        Ok(())
    }

    /// End the active player's turn and start the opponent's.
    pub(crate) fn end_turn_block(&mut self) -> Result<()> {
        let player = self.current_player;
        let hero = self.hero(player);
        let oop = self.entity(hero)?.order_of_play();
        self.enqueue(GameEvent::new(EventKind::TurnEnd, hero, player).with_order_of_play(oop));
        self.fire_turn_enchantments(EnchantmentActivation::TurnEnd)?;
        self.drain()?;
        if self.is_over() {
            return Ok(());
        }

        self.expire_end_of_turn();

        let mut characters = vec![hero];
        characters.extend_from_slice(self.board(player));
        for id in characters {
            let entity = self.entity_mut(id)?;
            if entity.get(GameTag::Frozen) > 0 && entity.get(GameTag::NumAttacksThisTurn) == 0 {
                entity.tags.set(GameTag::Frozen, 0);
            }
        }

        self.log(LogLevel::Info, "Turn", || format!("{player} ends turn {}", self.turn));
        self.current_player = player.opponent();
        self.turn += 1;
        self.start_turn_block()
    }

    /// Begin the active player's turn: refresh mana, ready characters, fire
    /// start-of-turn effects and draw.
    pub(crate) fn start_turn_block(&mut self) -> Result<()> {
        let player = self.current_player;
        let max_mana = self.config.max_mana;
        self.controller_mut(player).refresh_mana(max_mana);

        let hero = self.hero(player);
        let mut characters = vec![hero];
        characters.extend_from_slice(self.board(player));
        for id in characters {
            let entity = self.entity_mut(id)?;
            entity.tags.set(GameTag::Exhausted, 0);
            entity.tags.set(GameTag::NumAttacksThisTurn, 0);
            entity.tags.set(GameTag::JustPlayed, 0);
            entity.tags.add(GameTag::NumTurnsInPlay, 1);
        }
        let power = self.hero_power(player);
        self.set_tag(power, GameTag::Exhausted, 0)?;

        self.log(LogLevel::Info, "Turn", || format!("turn {} begins for {player}", self.turn));
        let oop = self.entity(hero)?.order_of_play();
        self.enqueue(GameEvent::new(EventKind::TurnStart, hero, player).with_order_of_play(oop));
        self.fire_turn_enchantments(EnchantmentActivation::TurnStart)?;
        self.drain()?;
        if self.is_over() {
            return Ok(());
        }

        self.draw_card(player)?;
        self.drain()
    }
}
