//! Enchantment and aura integration tests.
//!
//! Buffs are layered over raw tags: these tests drive them through tasks,
//! damage and turn changes and check the derived values at each step.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use ccg_duel::cards::{CardDatabase, CardId, CardTemplate, PowerActivation};
use ccg_duel::core::{Action, EntityId, Game, GameConfig, GameTag, PlayerId, PlayerSetup};
use ccg_duel::enchants::{AuraDef, AuraScope, EnchantDef, EnchantmentActivation};
use ccg_duel::tasks::{EntityType, Task, TaskState};
use ccg_duel::zones::Zone;

const HERO: CardId = CardId(1);
const POWER: CardId = CardId(2);
const WISP: CardId = CardId(3);
const LEADER: CardId = CardId(4);
const BLESSING: CardId = CardId(10);
const ENRAGE: CardId = CardId(11);
const BURNING: CardId = CardId(12);
const SHRINK: CardId = CardId(13);
const RAGE: CardId = CardId(14);
const MARK: CardId = CardId(15);

fn database(extra: Vec<CardTemplate>) -> Arc<CardDatabase> {
    let mut db = CardDatabase::new();
    let base = vec![
        CardTemplate::hero(HERO, "Hero", 30),
        CardTemplate::hero_power(POWER, "Power", 2),
        CardTemplate::minion(WISP, "Wisp", 0, 1, 1),
        CardTemplate::minion(LEADER, "Leader", 3, 2, 2)
            .with_aura(AuraDef::new(AuraScope::OtherFriendlyMinions).add(GameTag::Atk, 1)),
        CardTemplate::enchantment(BLESSING, "Blessing", EnchantDef::ongoing().add(GameTag::Atk, 1).add(GameTag::Health, 1)),
        CardTemplate::enchantment(
            ENRAGE,
            "Enrage",
            EnchantDef::on(EnchantmentActivation::Damage)
                .add(GameTag::Atk, 2)
                .remove_after_activation(),
        ),
        CardTemplate::enchantment(BURNING, "Burning", EnchantDef::on(EnchantmentActivation::TurnEnd))
            .with_power(PowerActivation::Enchant, vec![Task::damage(1, EntityType::Source)]),
        CardTemplate::enchantment(SHRINK, "Shrink", EnchantDef::ongoing().set(GameTag::Atk, 1)),
        CardTemplate::enchantment(RAGE, "Rage", EnchantDef::ongoing().add(GameTag::Atk, 3).until_end_of_turn()),
    ];
    for card in base.into_iter().chain(extra) {
        db.register(card).unwrap();
    }
    Arc::new(db)
}

fn game(extra: Vec<CardTemplate>) -> Game {
    let setup = PlayerSetup::new(HERO, POWER);
    let config = GameConfig::new(setup.clone(), setup)
        .with_logging(false)
        .with_starting_hand(PlayerId::FIRST, 0)
        .with_starting_hand(PlayerId::SECOND, 0);
    Game::new(config, database(extra)).unwrap()
}

fn atk(game: &Game, id: EntityId) -> i32 {
    game.tag(id, GameTag::Atk).unwrap()
}

/// An aura follows its source's zone membership within one resolution.
#[test]
fn test_aura_removed_with_its_source() {
    let mut game = game(vec![]);
    let wisp = game.spawn(PlayerId::FIRST, WISP, Zone::Board, None).unwrap();
    let leader = game.spawn(PlayerId::FIRST, LEADER, Zone::Board, None).unwrap();
    assert_eq!(atk(&game, wisp), 2);
    assert_eq!(atk(&game, leader), 2);
    assert_eq!(game.raw_tag(wisp, GameTag::Atk).unwrap(), 1);

    let seen = Arc::new(AtomicI32::new(-1));
    let probe = Arc::clone(&seen);
    let tasks = vec![
        Task::destroy(EntityType::Target),
        Task::custom("probe", move |game, _, _| {
            probe.store(game.tag(wisp, GameTag::Atk)?, Ordering::SeqCst);
            Ok(TaskState::Complete)
        }),
    ];
    let hero = game.hero(PlayerId::FIRST);
    game.run_tasks(PlayerId::FIRST, hero, Some(leader), &tasks).unwrap();

    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(game.entity(leader).unwrap().zone(), Zone::Graveyard);
}

/// A silenced aura source projects nothing.
#[test]
fn test_silenced_aura_source() {
    let mut game = game(vec![]);
    let wisp = game.spawn(PlayerId::FIRST, WISP, Zone::Board, None).unwrap();
    let leader = game.spawn(PlayerId::FIRST, LEADER, Zone::Board, None).unwrap();

    game.silence(leader).unwrap();
    assert_eq!(atk(&game, wisp), 1);
}

/// Ongoing buffs stack by count instead of duplicating.
#[test]
fn test_ongoing_buff_stacks() {
    let mut game = game(vec![]);
    let wisp = game.spawn(PlayerId::FIRST, WISP, Zone::Board, None).unwrap();
    let hero = game.hero(PlayerId::FIRST);
    let tasks = vec![Task::enchant(BLESSING, EntityType::Target), Task::enchant(BLESSING, EntityType::Target)];
    game.run_tasks(PlayerId::FIRST, hero, Some(wisp), &tasks).unwrap();

    let entity = game.entity(wisp).unwrap();
    assert_eq!(entity.enchantments.len(), 1);
    assert_eq!(entity.enchantments[0].count, 2);
    assert_eq!(atk(&game, wisp), 3);
    assert_eq!(game.character(wisp).unwrap().health(), 3);
}

/// A remove-after-activation enchantment fires exactly once.
#[test]
fn test_remove_after_activation_fires_once() {
    let mut game = game(vec![]);
    let yeti = game.spawn(PlayerId::FIRST, LEADER, Zone::Board, None).unwrap();
    game.set_tag(yeti, GameTag::Health, 10).unwrap();
    let hero = game.hero(PlayerId::SECOND);
    game.attach_enchantment(yeti, ENRAGE, hero, (0, 0)).unwrap();

    let hit = vec![Task::damage(1, EntityType::Target)];
    game.run_tasks(PlayerId::SECOND, hero, Some(yeti), &hit).unwrap();
    assert_eq!(game.raw_tag(yeti, GameTag::Atk).unwrap(), 4);
    assert!(game.entity(yeti).unwrap().enchantments.is_empty());

    game.run_tasks(PlayerId::SECOND, hero, Some(yeti), &hit).unwrap();
    assert_eq!(game.raw_tag(yeti, GameTag::Atk).unwrap(), 4);
}

/// Turn-end enchantments run their card's tasks with the bearer as source.
#[test]
fn test_turn_end_enchantment_runs_tasks() {
    let mut game = game(vec![]);
    let leader = game.spawn(PlayerId::FIRST, LEADER, Zone::Board, None).unwrap();
    game.attach_enchantment(leader, BURNING, leader, (0, 0)).unwrap();

    game.apply_action(PlayerId::FIRST, &Action::EndTurn).unwrap();
    assert_eq!(game.character(leader).unwrap().damage(), 1);

    game.apply_action(PlayerId::SECOND, &Action::EndTurn).unwrap();
    game.apply_action(PlayerId::FIRST, &Action::EndTurn).unwrap();
    assert_eq!(game.entity(leader).unwrap().zone(), Zone::Graveyard);
}

/// Derived reads fold raw tag, then enchantments, then auras.
#[test]
fn test_set_then_aura_order() {
    let mut game = game(vec![]);
    let wisp = game.spawn(PlayerId::FIRST, WISP, Zone::Board, None).unwrap();
    let hero = game.hero(PlayerId::FIRST);
    game.set_tag(wisp, GameTag::Atk, 6).unwrap();
    game.attach_enchantment(wisp, SHRINK, hero, (0, 0)).unwrap();
    assert_eq!(atk(&game, wisp), 1);

    game.spawn(PlayerId::FIRST, LEADER, Zone::Board, None).unwrap();
    assert_eq!(atk(&game, wisp), 2);
}

/// End-of-turn buffs expire when the turn ends.
#[test]
fn test_end_of_turn_buff_expires() {
    let mut game = game(vec![]);
    let wisp = game.spawn(PlayerId::FIRST, WISP, Zone::Board, None).unwrap();
    let hero = game.hero(PlayerId::FIRST);
    game.attach_enchantment(wisp, RAGE, hero, (0, 0)).unwrap();
    assert_eq!(atk(&game, wisp), 4);

    game.apply_action(PlayerId::FIRST, &Action::EndTurn).unwrap();
    assert_eq!(atk(&game, wisp), 1);
}

/// Leaving play drops enchantments unless they persist.
#[test]
fn test_leaving_play_drops_enchantments() {
    let mut game = game(vec![CardTemplate::enchantment(
        MARK,
        "Mark",
        EnchantDef::ongoing().add(GameTag::Cost, -1).persistent(),
    )]);
    let wisp = game.spawn(PlayerId::FIRST, WISP, Zone::Board, None).unwrap();
    let hero = game.hero(PlayerId::FIRST);
    game.attach_enchantment(wisp, BLESSING, hero, (0, 0)).unwrap();
    game.attach_enchantment(wisp, MARK, hero, (0, 0)).unwrap();
    assert_eq!(game.entity(wisp).unwrap().enchantments.len(), 2);

    game.move_entity(wisp, Zone::Hand, None).unwrap();
    let entity = game.entity(wisp).unwrap();
    assert_eq!(entity.enchantments.len(), 1);
    assert_eq!(entity.enchantments[0].card, MARK);
    assert_eq!(atk(&game, wisp), 1);
}
