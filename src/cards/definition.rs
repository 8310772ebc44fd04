//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card as loaded from
//! the external catalog: its kind, base strength, draw weight, and behavior
//! flags. Per-draw mutable state (current strength, instance identity) lives
//! in `CardInstance`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card definition.
///
/// This identifies the "template" of a card (e.g. "Fireball"),
/// not a specific drawn copy in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The four card behaviors the resolver understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    /// Damage a target, shield-first unless piercing.
    Attack,
    /// Add the card's value to the player's shield.
    Shield,
    /// Restore hp; flags select persistent or hp-share variants.
    Heal,
    /// Boost every card in the player's hand by the card's value.
    Charge,
}

/// Static card definition from the external catalog.
///
/// ## Example
///
/// ```
/// use cardclash::cards::{CardDefinition, CardId, CardKind};
///
/// let bolt = CardDefinition::new(CardId::new(1), "Bolt", CardKind::Attack, 4)
///     .with_probability(3)
///     .piercing();
///
/// assert!(bolt.is_piercing);
/// assert_eq!(bolt.probability, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Flavor/effect text for display.
    pub description: String,

    /// Which resolver behavior this card triggers.
    pub kind: CardKind,

    /// Starting strength of drawn copies.
    pub base_value: i64,

    /// Deck-build weight: how many copies enter each player's deck.
    pub probability: u32,

    /// Attack only: damage ignores shield entirely.
    pub is_piercing: bool,

    /// Heal only: grants a recurring end-of-turn heal instead of a one-shot.
    pub is_persistent: bool,

    /// Heal only: copies a random alive opponent's hp instead of healing.
    pub is_hp_share: bool,
}

impl CardDefinition {
    /// Create a new card definition with weight 1 and no flags.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind, base_value: i64) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            kind,
            base_value,
            probability: 1,
            is_piercing: false,
            is_persistent: false,
            is_hp_share: false,
        }
    }

    /// Set the display description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the deck-build weight (builder pattern).
    #[must_use]
    pub fn with_probability(mut self, probability: u32) -> Self {
        self.probability = probability;
        self
    }

    /// Mark an attack as piercing (builder pattern).
    #[must_use]
    pub fn piercing(mut self) -> Self {
        self.is_piercing = true;
        self
    }

    /// Mark a heal as persistent (builder pattern).
    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.is_persistent = true;
        self
    }

    /// Mark a heal as hp-share (builder pattern).
    #[must_use]
    pub fn hp_share(mut self) -> Self {
        self.is_hp_share = true;
        self
    }
}
