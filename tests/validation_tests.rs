//! Action validation integration tests.
//!
//! Every rejected action must come back as `ActionOutcome::Illegal` with the
//! matching reason and leave the game as it was. Unknown play requirements
//! are the one exception: they are contract violations and surface as `Err`.

use std::sync::Arc;

use ccg_duel::cards::{CardDatabase, CardId, CardTemplate, PlayReq, PowerActivation};
use ccg_duel::core::{Action, ActionOutcome, EntityId, Game, GameConfig, GameTag, PlayerId, PlayerSetup};
use ccg_duel::error::{EngineError, IllegalReason};
use ccg_duel::logging::{LogLevel, RecordingSink};
use ccg_duel::tasks::{EntityType, Task};
use ccg_duel::zones::Zone;

const HERO: CardId = CardId(1);
const POWER: CardId = CardId(2);
const WISP: CardId = CardId(3);
const GUARD: CardId = CardId(4);
const AXE: CardId = CardId(5);
const BOLT: CardId = CardId(10);
const SMITE: CardId = CardId(11);
const MAYBE: CardId = CardId(12);
const HONE: CardId = CardId(13);
const CLEAVE: CardId = CardId(14);
const CALLER: CardId = CardId(15);
const TOTEM_A: CardId = CardId(16);
const TOTEM_B: CardId = CardId(17);
const ECHO: CardId = CardId(18);
const MISMATCH: CardId = CardId(19);
const STRANGE: CardId = CardId(20);

fn database() -> Arc<CardDatabase> {
    let mut db = CardDatabase::new();
    db.register_all([
        CardTemplate::hero(HERO, "Hero", 30),
        CardTemplate::hero_power(POWER, "Power", 2),
        CardTemplate::minion(WISP, "Wisp", 0, 1, 1),
        CardTemplate::minion(GUARD, "Guard", 2, 1, 4).with_tag(GameTag::Taunt, 1),
        CardTemplate::weapon(AXE, "Axe", 2, 3, 2),
        CardTemplate::spell(BOLT, "Bolt", 1)
            .with_requirement(PlayReq::TargetToPlay, 0)
            .with_power(PowerActivation::Spell, vec![Task::spell_damage(3, EntityType::Target)]),
        CardTemplate::spell(SMITE, "Smite", 1)
            .with_requirement(PlayReq::TargetToPlay, 0)
            .with_requirement(PlayReq::MinionTarget, 0),
        CardTemplate::spell(MAYBE, "Maybe", 1)
            .with_requirement(PlayReq::TargetIfAvailable, 0)
            .with_requirement(PlayReq::MinionTarget, 0),
        CardTemplate::spell(HONE, "Hone", 1).with_requirement(PlayReq::WeaponEquipped, 0),
        CardTemplate::spell(CLEAVE, "Cleave", 2).with_requirement(PlayReq::MinimumEnemyMinions, 2),
        CardTemplate::spell(CALLER, "Caller", 1)
            .with_entourage(vec![TOTEM_A, TOTEM_B])
            .with_requirement(PlayReq::EntireEntourageNotInPlay, 0),
        CardTemplate::minion(TOTEM_A, "Totem A", 1, 0, 2),
        CardTemplate::minion(TOTEM_B, "Totem B", 1, 0, 2),
        CardTemplate::spell(ECHO, "Echo", 1).with_requirement(PlayReq::RequiresHeroPower, 2),
        CardTemplate::spell(MISMATCH, "Mismatch", 1).with_requirement(PlayReq::RequiresHeroPower, 9),
        CardTemplate::spell(STRANGE, "Strange", 1).with_requirement(PlayReq::Other(77), 0),
    ])
    .unwrap();
    Arc::new(db)
}

fn config() -> GameConfig {
    let setup = PlayerSetup::new(HERO, POWER);
    GameConfig::new(setup.clone(), setup)
        .with_logging(false)
        .with_starting_hand(PlayerId::FIRST, 0)
        .with_starting_hand(PlayerId::SECOND, 0)
}

fn game() -> Game {
    let mut game = Game::new(config(), database()).unwrap();
    game.controller_mut(PlayerId::FIRST).set_base_mana(10);
    game
}

fn in_hand(game: &mut Game, card: CardId) -> EntityId {
    game.spawn(PlayerId::FIRST, card, Zone::Hand, None).unwrap()
}

fn illegal(reason: IllegalReason) -> ActionOutcome {
    ActionOutcome::Illegal(reason)
}

/// A card that needs a target cannot be played without one.
#[test]
fn test_missing_target() {
    let mut game = game();
    let bolt = in_hand(&mut game, BOLT);
    let before = game.snapshot();

    let outcome = game.apply_action(PlayerId::FIRST, &Action::play(bolt)).unwrap();
    assert_eq!(outcome, illegal(IllegalReason::MissingTarget));
    assert_eq!(game.snapshot(), before);
}

/// A target is only required when one is available.
#[test]
fn test_target_if_available() {
    let mut game = game();
    let first = in_hand(&mut game, MAYBE);
    let second = in_hand(&mut game, MAYBE);
    assert!(game.validate_action(PlayerId::FIRST, &Action::play(first)).unwrap().is_ok());
    assert!(game.apply_action(PlayerId::FIRST, &Action::play(first)).unwrap().is_applied());

    let wisp = game.spawn(PlayerId::SECOND, WISP, Zone::Board, None).unwrap();
    assert_eq!(
        game.apply_action(PlayerId::FIRST, &Action::play(second)).unwrap(),
        illegal(IllegalReason::MissingTarget)
    );
    let targeted = Action::play(second).with_target(wisp);
    assert!(game.apply_action(PlayerId::FIRST, &targeted).unwrap().is_applied());
}

/// Targets must satisfy every targeting requirement and be on the board.
#[test]
fn test_invalid_targets() {
    let mut game = game();
    let smite = in_hand(&mut game, SMITE);
    let held = game.spawn(PlayerId::SECOND, WISP, Zone::Hand, None).unwrap();
    let enemy = game.hero(PlayerId::SECOND);

    for target in [enemy, held] {
        let action = Action::play(smite).with_target(target);
        assert_eq!(
            game.apply_action(PlayerId::FIRST, &action).unwrap(),
            illegal(IllegalReason::InvalidTarget)
        );
    }
    assert!(game.valid_play_targets(smite).unwrap().is_empty());
}

/// Weapon requirements look at the hero's equipped weapon.
#[test]
fn test_weapon_equipped_requirement() {
    let mut game = game();
    let hone = in_hand(&mut game, HONE);
    assert_eq!(
        game.apply_action(PlayerId::FIRST, &Action::play(hone)).unwrap(),
        illegal(IllegalReason::RequirementNotMet(PlayReq::WeaponEquipped))
    );

    let axe = in_hand(&mut game, AXE);
    game.equip_weapon(PlayerId::FIRST, axe).unwrap();
    assert!(game.apply_action(PlayerId::FIRST, &Action::play(hone)).unwrap().is_applied());
}

/// Minimum enemy minions counts the opponent's board.
#[test]
fn test_minimum_enemy_minions() {
    let mut game = game();
    let cleave = in_hand(&mut game, CLEAVE);
    game.spawn(PlayerId::SECOND, WISP, Zone::Board, None).unwrap();
    game.spawn(PlayerId::FIRST, WISP, Zone::Board, None).unwrap();
    assert_eq!(
        game.apply_action(PlayerId::FIRST, &Action::play(cleave)).unwrap(),
        illegal(IllegalReason::RequirementNotMet(PlayReq::MinimumEnemyMinions))
    );

    game.spawn(PlayerId::SECOND, WISP, Zone::Board, None).unwrap();
    assert!(game.apply_action(PlayerId::FIRST, &Action::play(cleave)).unwrap().is_applied());
}

/// Entourage cards are playable while part of the entourage is missing.
#[test]
fn test_entire_entourage_not_in_play() {
    let mut game = game();
    let caller = in_hand(&mut game, CALLER);
    let a = game.spawn(PlayerId::FIRST, TOTEM_A, Zone::Board, None).unwrap();
    game.spawn(PlayerId::FIRST, TOTEM_B, Zone::Board, None).unwrap();
    assert_eq!(
        game.apply_action(PlayerId::FIRST, &Action::play(caller)).unwrap(),
        illegal(IllegalReason::RequirementNotMet(PlayReq::EntireEntourageNotInPlay))
    );

    game.move_entity(a, Zone::Graveyard, None).unwrap();
    assert!(game.apply_action(PlayerId::FIRST, &Action::play(caller)).unwrap().is_applied());
}

/// Hero power requirements compare the raw card id.
#[test]
fn test_requires_hero_power() {
    let mut game = game();
    let echo = in_hand(&mut game, ECHO);
    let mismatch = in_hand(&mut game, MISMATCH);

    assert_eq!(
        game.apply_action(PlayerId::FIRST, &Action::play(mismatch)).unwrap(),
        illegal(IllegalReason::RequirementNotMet(PlayReq::RequiresHeroPower))
    );
    assert!(game.apply_action(PlayerId::FIRST, &Action::play(echo)).unwrap().is_applied());
}

/// Unknown requirement codes are errors for apply_action and are skipped,
/// with a warning, by legal_actions.
#[test]
fn test_unhandled_requirement() {
    let sink = Arc::new(RecordingSink::new());
    let mut game = Game::with_sink(config(), database(), sink.clone()).unwrap();
    let strange = game.spawn(PlayerId::FIRST, STRANGE, Zone::Hand, None).unwrap();

    let err = game.apply_action(PlayerId::FIRST, &Action::play(strange)).unwrap_err();
    assert_eq!(err, EngineError::UnhandledPlayRequirement(77));

    let actions: Vec<Action> = game.legal_actions(PlayerId::FIRST).collect();
    assert!(actions.contains(&Action::EndTurn));
    assert!(actions.iter().all(|a| a.source() != Some(strange)));
    assert!(sink
        .in_category("Action")
        .iter()
        .any(|entry| entry.level == LogLevel::Warning && entry.message.contains("77")));
}

/// Attacks need a ready attacker and must respect taunt.
#[test]
fn test_attack_validation() {
    let mut game = game();
    let wisp = game.summon(PlayerId::FIRST, WISP, None).unwrap();
    let guard = game.spawn(PlayerId::SECOND, GUARD, Zone::Board, None).unwrap();
    let enemy = game.hero(PlayerId::SECOND);

    assert_eq!(
        game.apply_action(PlayerId::FIRST, &Action::attack(wisp, guard)).unwrap(),
        illegal(IllegalReason::CannotAttack)
    );

    game.set_tag(wisp, GameTag::Exhausted, 0).unwrap();
    assert_eq!(
        game.apply_action(PlayerId::FIRST, &Action::attack(wisp, enemy)).unwrap(),
        illegal(IllegalReason::InvalidTarget)
    );
    assert_eq!(
        game.apply_action(PlayerId::SECOND, &Action::attack(guard, enemy)).unwrap(),
        illegal(IllegalReason::NotActivePlayer)
    );

    assert!(game.apply_action(PlayerId::FIRST, &Action::attack(wisp, guard)).unwrap().is_applied());
    assert_eq!(game.entity(wisp).unwrap().zone(), Zone::Graveyard);
    assert_eq!(game.character(guard).unwrap().damage(), 1);
}
