//! Clone, branch and snapshot integration tests.
//!
//! Search clients rely on three guarantees: a clone replays identically, a
//! clone never aliases the original, and a snapshot captures the whole
//! mutable state.

use std::sync::Arc;

use ccg_duel::cards::{CardDatabase, CardId, CardTemplate, PlayReq, PowerActivation};
use ccg_duel::core::{Action, Game, GameConfig, GameTag, PlayerId, PlayerSetup, Snapshot};
use ccg_duel::tasks::{EntityType, Task};

const HERO: CardId = CardId(1);
const POWER: CardId = CardId(2);
const WISP: CardId = CardId(3);
const YETI: CardId = CardId(4);
const BOLT: CardId = CardId(5);

fn database() -> Arc<CardDatabase> {
    let mut db = CardDatabase::new();
    for card in [
        CardTemplate::hero(HERO, "Hero", 30),
        CardTemplate::hero_power(POWER, "Ping", 2)
            .with_requirement(PlayReq::TargetToPlay, 0)
            .with_power(PowerActivation::HeroPower, vec![Task::damage(1, EntityType::Target)]),
        CardTemplate::minion(WISP, "Wisp", 0, 1, 1),
        CardTemplate::minion(YETI, "Yeti", 4, 4, 5),
        CardTemplate::spell(BOLT, "Bolt", 1)
            .with_requirement(PlayReq::TargetToPlay, 0)
            .with_power(PowerActivation::Spell, vec![Task::spell_damage(3, EntityType::Target)]),
    ] {
        db.register(card).unwrap();
    }
    Arc::new(db)
}

fn config(seed: u64) -> GameConfig {
    let deck = vec![WISP, YETI, BOLT, WISP, YETI, BOLT, WISP, YETI, BOLT, WISP, YETI, BOLT];
    let setup = PlayerSetup::new(HERO, POWER).with_deck(deck);
    GameConfig::new(setup.clone(), setup)
        .with_logging(false)
        .with_seed(seed)
}

/// Play `steps` actions, always picking by a fixed rule.
fn play(game: &mut Game, steps: usize) {
    for step in 0..steps {
        if game.is_over() {
            break;
        }
        let player = game.current_player();
        let actions: Vec<Action> = game.legal_actions(player).collect();
        let action = actions[step % actions.len()];
        assert!(game.apply_action(player, &action).unwrap().is_applied());
    }
}

/// A clone given the same actions reaches the same state.
#[test]
fn test_clone_replays_identically() {
    let mut game = Game::new(config(11), database()).unwrap();
    let mut copy = game.clone();

    play(&mut game, 40);
    play(&mut copy, 40);

    assert_eq!(game.snapshot(), copy.snapshot());
}

/// Two games built from the same configuration are identical.
#[test]
fn test_same_seed_same_game() {
    let mut a = Game::new(config(5), database()).unwrap();
    let mut b = Game::new(config(5), database()).unwrap();
    play(&mut a, 25);
    play(&mut b, 25);
    assert_eq!(a.snapshot().to_bytes().unwrap(), b.snapshot().to_bytes().unwrap());
}

/// Mutating a clone never changes the original.
#[test]
fn test_clone_does_not_alias() {
    let game = Game::new(config(3), database()).unwrap();
    let before = game.snapshot();

    let mut copy = game.clone();
    let hero = copy.hero(PlayerId::SECOND);
    copy.set_tag(hero, GameTag::Damage, 10).unwrap();
    copy.controller_mut(PlayerId::FIRST).set_base_mana(9);
    play(&mut copy, 30);

    assert_eq!(game.snapshot(), before);
    assert_eq!(game.character(hero).unwrap().damage(), 0);
}

/// Branches draw from a different random stream than plain clones.
#[test]
fn test_branch_forks_random_stream() {
    let mut game = Game::new(config(21), database()).unwrap();
    let mut clone = game.clone();
    let mut branch = game.branch();

    let original: Vec<i32> = (0..8).map(|_| game.rng_mut().gen_range(0..1_000_000)).collect();
    let cloned: Vec<i32> = (0..8).map(|_| clone.rng_mut().gen_range(0..1_000_000)).collect();
    let branched: Vec<i32> = (0..8).map(|_| branch.rng_mut().gen_range(0..1_000_000)).collect();

    assert_eq!(original, cloned);
    assert_ne!(original, branched);
}

/// Snapshots survive a JSON round trip and restore into an equal game.
#[test]
fn test_snapshot_json_round_trip() {
    let db = database();
    let mut game = Game::new(config(8), Arc::clone(&db)).unwrap();
    play(&mut game, 15);

    let json = serde_json::to_string(&game.snapshot()).unwrap();
    let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
    let restored = Game::restore(snapshot, db, config(8)).unwrap();

    assert_eq!(restored.snapshot(), game.snapshot());
    let player = game.current_player();
    assert_eq!(
        restored.legal_actions(player).collect::<Vec<_>>(),
        game.legal_actions(player).collect::<Vec<_>>()
    );
}

/// Games can be moved to other threads for parallel search.
#[test]
fn test_game_is_send() {
    fn assert_send<T: Send>(_: &T) {}

    let game = Game::new(config(1), database()).unwrap();
    assert_send(&game);

    let handle = std::thread::spawn(move || {
        let mut game = game;
        play(&mut game, 10);
        game.turn()
    });
    assert!(handle.join().unwrap() >= 1);
}
