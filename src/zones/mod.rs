//! Zone system for entity locations.
//!
//! Each player owns one container per [`Zone`] kind: deck, hand, board,
//! graveyard, secret, setaside and play (hero, hero power, weapon).
//!
//! ## Key Types
//!
//! - `Zone`: container kind, mirrored into the `Zone` tag
//! - `ZoneKey`: a specific player's container
//! - `ZoneManager`: membership tracking, ordering and capacity
//! - `ZonePosition`: insertion position

pub mod manager;

pub use manager::{Zone, ZoneKey, ZoneManager, ZoneMove, ZonePosition};
