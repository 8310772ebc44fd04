//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores the pre-validated card set supplied once at
//! process startup by the loading collaborator. The engine never parses or
//! locates that data itself; it only looks definitions up by `CardId`.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};

/// Registry of card definitions, keyed by `CardId`.
///
/// ## Example
///
/// ```
/// use cardclash::cards::{CardCatalog, CardDefinition, CardId, CardKind};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardDefinition::new(CardId::new(1), "Bolt", CardKind::Attack, 4));
///
/// let found = catalog.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Bolt");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from an iterator of definitions.
    ///
    /// Panics if two definitions share an ID.
    #[must_use]
    pub fn from_definitions(defs: impl IntoIterator<Item = CardDefinition>) -> Self {
        let mut catalog = Self::new();
        for def in defs {
            catalog.register(def);
        }
        catalog
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists; the catalog is
    /// assumed validated before any match starts.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Get a card definition by ID, panicking if not found.
    ///
    /// Used on ids that came out of a deck, which by construction only holds
    /// registered ids.
    #[must_use]
    pub fn get_unchecked(&self, id: CardId) -> &CardDefinition {
        self.cards.get(&id).expect("Card not found in catalog")
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }
}
