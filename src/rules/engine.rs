//! The action surface of a game.
//!
//! Clients drive a [`Game`] with three calls:
//! - `legal_actions`: what the player may do now
//! - `apply_action`: do one of them, resolving every reaction before
//!   returning
//! - `result`: whether the game is over
//!
//! `apply_action` is deterministic: the same game and the same action always
//! produce the same state, so a search client can clone a game and replay.

use crate::cards::EntityKind;
use crate::core::{Action, ActionOutcome, ActionRecord, EntityId, Game, GameStatus, PlayerId};
use crate::error::{IllegalReason, Legality, Result};
use crate::logging::LogLevel;
use crate::tasks::Selection;

impl Game {
    /// Draw starting hands and begin the first turn. Does nothing once the
    /// game has started.
    pub fn start(&mut self) -> Result<()> {
        if self.status != GameStatus::Setup {
            return Ok(());
        }
        self.status = GameStatus::Running;
        self.turn = 1;
        self.current_player = self.config.first_player;

        for player in PlayerId::both() {
            for _ in 0..self.config.starting_hand[player] {
                self.draw_card(player)?;
            }
        }
        self.drain()?;
        if self.is_over() {
            return Ok(());
        }

        self.log(LogLevel::Info, "Game", || {
            format!("game starts, {} goes first", self.current_player)
        });
        self.start_turn_block()
    }

    /// Check an action without applying it.
    pub fn validate_action(&self, player: PlayerId, action: &Action) -> Result<Legality> {
        match *action {
            Action::PlayCard { source, target, .. } => {
                if self.entity(source)?.kind() == EntityKind::HeroPower {
                    return Ok(Err(IllegalReason::NotPlayable));
                }
                self.is_playable(player, source, target)
            }
            Action::Attack { attacker, defender } => self.validate_attack(player, attacker, defender),
            Action::HeroPower { target } => self.is_playable(player, self.hero_power(player), target),
            Action::EndTurn => {
                if self.is_over() {
                    Ok(Err(IllegalReason::GameOver))
                } else if player != self.current_player {
                    Ok(Err(IllegalReason::NotActivePlayer))
                } else {
                    Ok(Ok(()))
                }
            }
        }
    }

    /// Apply `action` for `player`.
    ///
    /// An illegal action is reported as [`ActionOutcome::Illegal`] and leaves
    /// the game untouched. `Err` means the engine hit a contract violation
    /// part way through; the game should then be discarded.
    pub fn apply_action(&mut self, player: PlayerId, action: &Action) -> Result<ActionOutcome> {
        if let Err(reason) = self.validate_action(player, action)? {
            self.log(LogLevel::Verbose, "Action", || {
                format!("{player} attempted illegal {action:?}: {reason}")
            });
            return Ok(ActionOutcome::Illegal(reason));
        }

        self.history.push_back(ActionRecord::new(player, *action, self.turn));
        match *action {
            Action::PlayCard {
                source,
                target,
                position,
            } => self.play_card_block(player, source, target, position)?,
            Action::Attack { attacker, defender } => self.attack_block(player, attacker, defender)?,
            Action::HeroPower { target } => self.hero_power_block(player, target)?,
            Action::EndTurn => self.end_turn_block()?,
        }
        Ok(ActionOutcome::Applied)
    }

    /// Legal actions for `player`, generated lazily.
    ///
    /// Plays go to the rightmost board slot. Candidates whose check hits a
    /// contract violation are logged and skipped.
    pub fn legal_actions(&self, player: PlayerId) -> impl Iterator<Item = Action> + '_ {
        let active = !self.is_over() && player == self.current_player;

        let hand: &[EntityId] = if active { self.hand(player) } else { &[] };
        let plays = hand
            .iter()
            .flat_map(move |&source| self.with_targets(Action::play(source), source));

        let power = active
            .then(|| self.with_targets(Action::hero_power(None), self.hero_power(player)))
            .into_iter()
            .flatten();

        let (attackers, defenders) = if active {
            let mut attackers = Selection::new();
            attackers.push(self.hero(player));
            attackers.extend_from_slice(self.board(player));
            let mut defenders = Selection::new();
            defenders.push(self.hero(player.opponent()));
            defenders.extend_from_slice(self.board(player.opponent()));
            (attackers, defenders)
        } else {
            (Selection::new(), Selection::new())
        };
        let attacks = attackers.into_iter().flat_map(move |attacker| {
            defenders
                .clone()
                .into_iter()
                .map(move |defender| Action::attack(attacker, defender))
        });

        let end_turn = active.then_some(Action::EndTurn);

        plays
            .chain(power)
            .chain(attacks)
            .chain(end_turn)
            .filter(move |action| match self.validate_action(player, action) {
                Ok(legality) => legality.is_ok(),
                Err(err) => {
                    self.log(LogLevel::Warning, "Action", || {
                        format!("skipping {action:?} for {player}: {err}")
                    });
                    false
                }
            })
    }

    /// `base` untargeted, followed by `base` at every character when the
    /// source takes a target.
    fn with_targets(&self, base: Action, source: EntityId) -> impl Iterator<Item = Action> {
        let takes_target = self
            .get_entity(source)
            .is_some_and(|entity| entity.card().takes_target());
        let targets = if takes_target {
            self.all_characters()
        } else {
            Selection::new()
        };
        std::iter::once(base).chain(targets.into_iter().map(move |target| base.with_target(target)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{CardDatabase, CardId, CardTemplate, PlayReq, PowerActivation};
    use crate::core::{GameConfig, GameResult, GameTag, PlayerSetup};
    use crate::tasks::{EntityType, Task};
    use crate::zones::Zone;

    const HERO: CardId = CardId(1);
    const POWER: CardId = CardId(2);
    const WISP: CardId = CardId(3);
    const BOLT: CardId = CardId(4);

    fn database() -> Arc<CardDatabase> {
        let mut db = CardDatabase::new();
        for card in [
            CardTemplate::hero(HERO, "Hero", 30),
            CardTemplate::hero_power(POWER, "Fireblast", 2)
                .with_requirement(PlayReq::TargetToPlay, 0)
                .with_power(
                    PowerActivation::HeroPower,
                    vec![Task::damage(1, EntityType::Target)],
                ),
            CardTemplate::minion(WISP, "Wisp", 0, 1, 1),
            CardTemplate::spell(BOLT, "Bolt", 1)
                .with_requirement(PlayReq::TargetToPlay, 0)
                .with_power(
                    PowerActivation::Spell,
                    vec![Task::spell_damage(3, EntityType::Target)],
                ),
        ] {
            db.register(card).unwrap();
        }
        Arc::new(db)
    }

    fn game(deck: Vec<CardId>) -> Game {
        let setup = PlayerSetup::new(HERO, POWER).with_deck(deck);
        let config = GameConfig::new(setup.clone(), setup)
            .with_logging(false)
            .with_shuffle(false);
        Game::new(config, database()).unwrap()
    }

    #[test]
    fn test_start_draws_and_opens_first_turn() {
        let game = game(vec![WISP; 10]);
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.current_player(), PlayerId::FIRST);
        // 3 starting cards plus the turn draw.
        assert_eq!(game.hand(PlayerId::FIRST).len(), 4);
        assert_eq!(game.hand(PlayerId::SECOND).len(), 4);
        assert_eq!(game.controller(PlayerId::FIRST).remaining_mana(), 1);
    }

    #[test]
    fn test_illegal_action_does_not_mutate() {
        let mut game = game(vec![WISP; 10]);
        let wisp = game.hand(PlayerId::SECOND)[0];
        let before = game.clone();

        let outcome = game.apply_action(PlayerId::SECOND, &Action::play(wisp)).unwrap();
        assert_eq!(outcome, ActionOutcome::Illegal(IllegalReason::NotActivePlayer));
        assert_eq!(game.snapshot(), before.snapshot());
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_play_minion_and_end_turn() {
        let mut game = game(vec![WISP; 10]);
        let wisp = game.hand(PlayerId::FIRST)[0];

        let outcome = game.apply_action(PlayerId::FIRST, &Action::play(wisp)).unwrap();
        assert!(outcome.is_applied());
        assert_eq!(game.board(PlayerId::FIRST), &[wisp]);

        game.apply_action(PlayerId::FIRST, &Action::EndTurn).unwrap();
        assert_eq!(game.current_player(), PlayerId::SECOND);
        assert_eq!(game.turn(), 2);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_spell_resolves_and_goes_to_graveyard() {
        let mut game = game(vec![BOLT; 10]);
        let bolt = game.hand(PlayerId::FIRST)[0];
        let enemy = game.hero(PlayerId::SECOND);

        let outcome = game
            .apply_action(PlayerId::FIRST, &Action::play(bolt).with_target(enemy))
            .unwrap();
        assert!(outcome.is_applied());
        assert_eq!(game.character(enemy).unwrap().health(), 27);
        assert_eq!(game.entity(bolt).unwrap().zone(), Zone::Graveyard);
        assert_eq!(game.controller(PlayerId::FIRST).remaining_mana(), 0);
    }

    #[test]
    fn test_hero_power_once_per_turn() {
        let mut game = game(vec![WISP; 10]);
        game.controller_mut(PlayerId::FIRST).set_base_mana(5);
        let enemy = game.hero(PlayerId::SECOND);
        let action = Action::hero_power(Some(enemy));

        assert!(game.apply_action(PlayerId::FIRST, &action).unwrap().is_applied());
        assert_eq!(game.character(enemy).unwrap().damage(), 1);
        assert_eq!(
            game.apply_action(PlayerId::FIRST, &action).unwrap(),
            ActionOutcome::Illegal(IllegalReason::HeroPowerUsed)
        );
    }

    #[test]
    fn test_legal_actions_are_all_applicable() {
        let game = game(vec![WISP, BOLT, WISP, BOLT, WISP, BOLT]);
        let actions: Vec<Action> = game.legal_actions(PlayerId::FIRST).collect();

        assert!(actions.contains(&Action::EndTurn));
        assert!(game.legal_actions(PlayerId::SECOND).next().is_none());
        for action in actions {
            let mut branch = game.clone();
            assert!(branch.apply_action(PlayerId::FIRST, &action).unwrap().is_applied());
        }
    }

    #[test]
    fn test_no_actions_after_game_over() {
        let mut game = game(vec![WISP; 10]);
        let enemy = game.hero(PlayerId::SECOND);
        game.set_tag(enemy, GameTag::Damage, 29).unwrap();
        game.controller_mut(PlayerId::FIRST).set_base_mana(5);

        game.apply_action(PlayerId::FIRST, &Action::hero_power(Some(enemy))).unwrap();
        assert_eq!(game.result(), Some(GameResult::Winner(PlayerId::FIRST)));
        assert_eq!(game.legal_actions(PlayerId::FIRST).count(), 0);
        assert_eq!(
            game.apply_action(PlayerId::FIRST, &Action::EndTurn).unwrap(),
            ActionOutcome::Illegal(IllegalReason::GameOver)
        );
    }
}
