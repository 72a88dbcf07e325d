//! Rules of play.
//!
//! - `blocks`: the procedures behind every action (play, attack, hero power,
//!   turn changes) and the damage, heal, draw, summon and equip primitives
//! - `targeting`: legal targets for plays and attacks
//! - `validation`: legality checks, including the play-requirement table
//! - `engine`: `start`, `apply_action` and `legal_actions`
//!
//! Everything here is implemented directly on [`Game`](crate::core::Game).

pub mod blocks;
pub mod engine;
pub mod targeting;
pub mod validation;

pub use crate::core::{GameResult, GameStatus};
