//! Card instances - drawn copies with their own identity and strength.
//!
//! A `CardInstance` is created when a card is drawn: the definition's fields
//! are copied by value and paired with a match-unique `InstanceId` and a
//! mutable `current_value`. Instances move by value between hand, deck, and
//! discard pile; they are never shared between players.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId, CardKind};

/// Match-unique identity of a drawn card.
///
/// Assigned at draw time from a per-match monotonic counter and never reused,
/// even when the card's id cycles back through a reshuffled deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

impl InstanceId {
    /// Create a new instance ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// A specific drawn copy of a card definition.
///
/// `current_value` starts at the definition's `base_value` and only ever
/// grows: charge cards and the automatic per-turn charge both add to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Match-unique identity, assigned at draw.
    pub instance_id: InstanceId,

    /// Which definition this copy came from.
    pub card_id: CardId,

    /// Display name, copied from the definition.
    pub name: String,

    /// Display description, copied from the definition.
    pub description: String,

    /// Resolver behavior, copied from the definition.
    pub kind: CardKind,

    /// Attack only: damage ignores shield.
    pub is_piercing: bool,

    /// Heal only: recurring end-of-turn heal.
    pub is_persistent: bool,

    /// Heal only: copy a random alive opponent's hp.
    pub is_hp_share: bool,

    /// Strength at draw time.
    pub base_value: i64,

    /// Current strength, grown by charge effects.
    pub current_value: i64,
}

impl CardInstance {
    /// Create an instance of a definition with the given match-unique id.
    #[must_use]
    pub fn from_definition(instance_id: InstanceId, def: &CardDefinition) -> Self {
        Self {
            instance_id,
            card_id: def.id,
            name: def.name.clone(),
            description: def.description.clone(),
            kind: def.kind,
            is_piercing: def.is_piercing,
            is_persistent: def.is_persistent,
            is_hp_share: def.is_hp_share,
            base_value: def.base_value,
            current_value: def.base_value,
        }
    }

    /// Add to the instance's current strength.
    pub fn charge(&mut self, amount: i64) {
        self.current_value += amount;
    }
}
