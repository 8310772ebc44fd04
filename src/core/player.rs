//! Player identity and per-player combat state.
//!
//! `PlayerId` is the opaque identity handed to the engine by the transport
//! layer (a connection id in the reference setup); the engine never inspects
//! it beyond equality. `Player` is everything the match tracks for one
//! participant: hit points, shield, hand, deck, discard pile, and persistent
//! effects.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardId, CardInstance, InstanceId};

/// Hit point ceiling; hp is always clamped to `0..=MAX_HP`.
pub const MAX_HP: i64 = 30;

/// Hit points a player joins with.
pub const STARTING_HP: i64 = MAX_HP;

/// Opaque player identity from the transport layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A persistent effect on a player.
///
/// Effects stack: playing the same persistent card twice appends two entries,
/// and both tick every turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ActiveEffect {
    /// Heal `value` hp at the end of each of the owner's turns.
    AutoHeal { value: i64 },
}

/// One participant's combat state within a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Transport-layer identity.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Hit points, clamped to `0..=MAX_HP`.
    pub hp: i64,

    /// Shield points; absorb non-piercing damage before hp. No upper bound.
    pub shield: i64,

    /// Cards currently held; order is insertion order, meaningful for
    /// display only.
    pub hand: Vec<CardInstance>,

    /// Remaining draw pile of card ids; the back is the next draw.
    pub deck: Vec<CardId>,

    /// Played cards, reshuffled into the deck when it runs out.
    pub discard_pile: Vec<CardInstance>,

    /// Persistent effects, applied at the end of each of this player's turns.
    pub active_effects: SmallVec<[ActiveEffect; 2]>,

    /// Suppresses the extra draw on this player's very first turn.
    pub has_taken_first_turn: bool,
}

impl Player {
    /// Create a freshly-joined player: full hp, no shield, empty piles.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hp: STARTING_HP,
            shield: 0,
            hand: Vec::new(),
            deck: Vec::new(),
            discard_pile: Vec::new(),
            active_effects: SmallVec::new(),
            has_taken_first_turn: false,
        }
    }

    /// Is this player still in the fight?
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Position of a card in hand by instance id.
    #[must_use]
    pub fn hand_index(&self, instance_id: InstanceId) -> Option<usize> {
        self.hand.iter().position(|c| c.instance_id == instance_id)
    }

    /// Heal, clamped at `MAX_HP`. Returns the hp before healing.
    pub fn heal(&mut self, amount: i64) -> i64 {
        let old = self.hp;
        self.hp = (self.hp + amount).min(MAX_HP);
        old
    }
}
