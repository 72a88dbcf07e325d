//! Enchantments and auras.
//!
//! ## Key Types
//!
//! - `EnchantDef`: what an enchantment card does when attached
//! - `Enchantment`: an attached instance, owned by its target entity
//! - `AuraDef`: a continuous modifier projected by an entity in a zone
//!
//! Derived reads and the activation pass live on `Game` (see `overlay`).

pub mod aura;
pub mod enchantment;
pub mod overlay;

pub use aura::{AuraDef, AuraScope};
pub use enchantment::{
    fold_effects, EffectOp, EffectTemplate, EffectValue, EnchantDef, Enchantment, EnchantmentActivation,
    RemovalPolicy, TagEffect,
};
