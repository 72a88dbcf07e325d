//! Card system: templates, entities, views and the card database.
//!
//! ## Key Types
//!
//! - `CardId`: identifier for card templates
//! - `CardTemplate`: immutable card data shared by every entity made from it
//! - `PlayReq`: play requirements a template can declare
//! - `Entity`: a mutable game object (tags, enchantments, zone)
//! - `Character` / `Playable`: capability views over entities
//! - `CardDatabase`: template lookup

pub mod definition;
pub mod instance;
pub mod registry;
pub mod requirement;
pub mod view;

pub use definition::{CardId, CardRef, CardTemplate, CardType, PowerActivation};
pub use instance::{Entity, EntityKind};
pub use registry::CardDatabase;
pub use requirement::PlayReq;
pub use view::{Character, Playable};
