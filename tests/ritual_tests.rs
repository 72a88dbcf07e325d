//! Ritual integration tests.
//!
//! Rituals grow a tracked card for the rest of the game through a hidden
//! proxy kept in the setaside zone. Copies on the board and in hand receive
//! each ritual as it happens; copies still in the deck do not.

use std::sync::Arc;

use ccg_duel::cards::{CardDatabase, CardId, CardTemplate};
use ccg_duel::core::{EntityId, Game, GameConfig, GameTag, PlayerId, PlayerSetup};
use ccg_duel::enchants::{EffectValue, EnchantDef};
use ccg_duel::tasks::{RitualKind, RitualTask, Task, TaskState};
use ccg_duel::zones::Zone;

const HERO: CardId = CardId(1);
const POWER: CardId = CardId(2);
const GOD: CardId = CardId(3);
const EMPOWER: CardId = CardId(10);
const GUARDED: CardId = CardId(11);
const BLADE: CardId = CardId(12);

fn game() -> Game {
    let mut db = CardDatabase::new();
    db.register_all([
        CardTemplate::hero(HERO, "Hero", 30),
        CardTemplate::hero_power(POWER, "Power", 2),
        CardTemplate::minion(GOD, "Old God", 10, 6, 6),
        CardTemplate::enchantment(
            EMPOWER,
            "Empowered",
            EnchantDef::ongoing().add(GameTag::Atk, 1).add(GameTag::Health, 1).persistent(),
        ),
        CardTemplate::enchantment(GUARDED, "Guarded", EnchantDef::ongoing().set(GameTag::Taunt, 1).persistent()),
        CardTemplate::enchantment(
            BLADE,
            "Blade",
            EnchantDef::ongoing().add_from(GameTag::Atk, EffectValue::Number).persistent(),
        ),
    ])
    .unwrap();
    let setup = PlayerSetup::new(HERO, POWER).with_deck(vec![GOD]);
    let config = GameConfig::new(setup.clone(), setup)
        .with_logging(false)
        .with_starting_hand(PlayerId::FIRST, 0)
        .with_starting_hand(PlayerId::SECOND, 0)
        .without_auto_start();
    Game::new(config, Arc::new(db)).unwrap()
}

fn ritual(kind: RitualKind) -> Task {
    Task::Ritual(RitualTask::new(kind, GOD, GOD))
}

fn perform(game: &mut Game, tasks: &[Task]) {
    let hero = game.hero(PlayerId::FIRST);
    game.run_tasks(PlayerId::FIRST, hero, None, tasks).unwrap();
}

fn proxy(game: &Game) -> EntityId {
    game.controller(PlayerId::FIRST).proxy().unwrap()
}

/// The first ritual creates a revealed proxy in setaside.
#[test]
fn test_first_ritual_creates_proxy() {
    let mut game = game();
    assert!(!game.controller(PlayerId::FIRST).has_seen_proxy());

    perform(&mut game, &[ritual(RitualKind::Check)]);

    let proxy = proxy(&game);
    let entity = game.entity(proxy).unwrap();
    assert_eq!(entity.zone(), Zone::Setaside);
    assert_eq!(entity.card_id(), GOD);
    assert_eq!(entity.get(GameTag::Revealed), 1);
    assert!(game.controller(PlayerId::SECOND).proxy().is_none());
}

/// Repeated rituals reuse the same proxy.
#[test]
fn test_proxy_is_stable() {
    let mut game = game();
    perform(&mut game, &[ritual(RitualKind::Check)]);
    let first = proxy(&game);
    let count = game.entity_count();

    for _ in 0..3 {
        perform(&mut game, &[ritual(RitualKind::Check)]);
    }
    assert_eq!(proxy(&game), first);
    assert_eq!(game.entity_count(), count);
}

/// Buffs accumulate on the proxy and on copies in hand, but not in the deck.
#[test]
fn test_buffs_accumulate() {
    let mut game = game();
    let held = game.spawn(PlayerId::FIRST, GOD, Zone::Hand, None).unwrap();
    let buried = game.members(PlayerId::FIRST, Zone::Deck)[0];
    let buff = ritual(RitualKind::Buff {
        enchantment: EMPOWER,
        amount: 2,
    });

    perform(&mut game, &[buff.clone()]);
    perform(&mut game, &[buff]);

    let proxy = proxy(&game);
    assert_eq!(game.tag(proxy, GameTag::Atk).unwrap(), 10);
    assert_eq!(game.tag(held, GameTag::Atk).unwrap(), 10);
    assert_eq!(game.entity(held).unwrap().ongoing_enchantment(EMPOWER).unwrap().count, 4);
    assert_eq!(game.tag(buried, GameTag::Atk).unwrap(), 6);
}

/// Taunt is granted by the first taunt ritual only.
#[test]
fn test_taunt_granted_once() {
    let mut game = game();
    let taunt = ritual(RitualKind::Taunt { enchantment: GUARDED });

    perform(&mut game, &[taunt.clone()]);
    let held = game.spawn(PlayerId::FIRST, GOD, Zone::Hand, None).unwrap();
    perform(&mut game, &[taunt]);

    let proxy = proxy(&game);
    assert_eq!(game.tag(proxy, GameTag::Taunt).unwrap(), 1);
    assert_eq!(game.entity(proxy).unwrap().enchantments.len(), 1);
    assert_eq!(game.entity(proxy).unwrap().enchantments[0].count, 1);
    assert_eq!(game.tag(held, GameTag::Taunt).unwrap(), 0);
}

/// Blade rituals read their values from the task stack.
#[test]
fn test_blade_uses_stack_numbers() {
    let mut game = game();
    let tasks = vec![
        Task::custom("load", |_, _, stack| {
            stack.number = 3;
            Ok(TaskState::Complete)
        }),
        ritual(RitualKind::Blade { enchantment: BLADE }),
    ];

    perform(&mut game, &tasks);

    assert_eq!(game.tag(proxy(&game), GameTag::Atk).unwrap(), 9);
}
