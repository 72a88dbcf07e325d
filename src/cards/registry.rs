//! Card database for template lookup.
//!
//! The `CardDatabase` stores every template a game may create entities
//! from. Games share one database through an `Arc`; clones of a game never
//! copy templates.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{CardId, CardRef, CardTemplate, CardType};
use crate::error::{EngineError, Result};

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use ccg_duel::cards::{CardDatabase, CardId, CardTemplate};
///
/// let mut db = CardDatabase::new();
/// db.register(CardTemplate::minion(CardId::new(1), "Wisp", 0, 1, 1)).unwrap();
///
/// let wisp = db.lookup(CardId::new(1)).unwrap();
/// assert_eq!(wisp.name, "Wisp");
/// assert!(db.lookup(CardId::new(2)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardDatabase {
    cards: FxHashMap<CardId, CardRef>,
}

impl CardDatabase {
    /// Create an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template. Ids must be unique.
    pub fn register(&mut self, card: CardTemplate) -> Result<()> {
        if self.cards.contains_key(&card.id) {
            return Err(EngineError::DuplicateCard(card.id));
        }
        self.cards.insert(card.id, Arc::new(card));
        Ok(())
    }

    /// Register many templates, stopping at the first duplicate.
    pub fn register_all(&mut self, cards: impl IntoIterator<Item = CardTemplate>) -> Result<()> {
        for card in cards {
            self.register(card)?;
        }
        Ok(())
    }

    /// Template for `id`. An unknown id is a fatal error: it means a deck,
    /// task or enchantment references a card that does not exist.
    pub fn lookup(&self, id: CardId) -> Result<CardRef> {
        self.cards
            .get(&id)
            .cloned()
            .ok_or(EngineError::UnknownCard(id))
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardTemplate> {
        self.cards.get(&id).map(Arc::as_ref)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all templates (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.cards.values().map(Arc::as_ref)
    }

    /// Templates of one card type.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &CardTemplate> {
        self.iter().filter(move |c| c.card_type == card_type)
    }
}
