//! Match state - everything the engine tracks for one game session.
//!
//! A `Match` is the authoritative record from room creation to a declared
//! winner or abandonment. Successful operations hand a cloned snapshot back
//! to the transport layer for verbatim broadcast; the `game_log` uses an
//! `im::Vector` so those clones stay cheap as the log grows.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::InstanceId;
use crate::core::{MatchRng, Player, PlayerId};

/// Unique identifier for a match / room.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub String);

impl MatchId {
    /// Create a new match ID.
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

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MatchId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Match lifecycle phase. Transitions only move forward:
/// waiting -> playing -> ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Accepting joins; decks and turn order not yet built.
    #[default]
    Waiting,
    /// Accepting plays.
    Playing,
    /// Terminal; `winner` holds the sole survivor, if any.
    Ended,
}

/// One complete game session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Match {
    /// Room / match identifier.
    pub id: MatchId,

    /// Participants in join order; stable for the life of the match.
    pub players: Vec<Player>,

    /// Cyclic turn sequence, fixed at start. Eliminated players stay in it
    /// and are skipped, not removed.
    pub turn_order: Vec<PlayerId>,

    /// Whose turn it is; `None` until the match starts.
    pub current_turn_player: Option<PlayerId>,

    /// Lifecycle phase.
    pub phase: GamePhase,

    /// target -> player who last attacked them (consecutive-attack rule).
    pub last_attacked: FxHashMap<PlayerId, PlayerId>,

    /// Listed by the public-room discovery query while waiting.
    pub is_public: bool,

    /// Append-only human-readable log, broadcast as part of the snapshot.
    pub game_log: Vector<String>,

    /// Next card instance id; monotonic, never reused.
    pub next_instance_id: u64,

    /// Turns completed so far.
    pub turn_count: u64,

    /// Sole survivor once `phase` is `Ended`; `None` for a no-survivor end.
    pub winner: Option<PlayerId>,

    /// Per-match RNG stream; not part of the broadcast snapshot.
    #[serde(skip, default = "MatchRng::from_entropy")]
    pub(crate) rng: MatchRng,
}

impl Match {
    /// Create a match in the waiting phase with no players.
    #[must_use]
    pub fn new(id: MatchId, rng: MatchRng) -> Self {
        Self {
            id,
            players: Vec::new(),
            turn_order: Vec::new(),
            current_turn_player: None,
            phase: GamePhase::Waiting,
            last_attacked: FxHashMap::default(),
            is_public: true,
            game_log: Vector::new(),
            next_instance_id: 1,
            turn_count: 0,
            winner: None,
            rng,
        }
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Look up a player mutably by id.
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// Position of a player in the join-order list.
    #[must_use]
    pub fn player_index(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    /// Is the given player in the match and still alive?
    #[must_use]
    pub fn is_alive(&self, id: &PlayerId) -> bool {
        self.player(id).is_some_and(Player::is_alive)
    }

    /// Players with hp > 0, in join order.
    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }

    /// Number of players with hp > 0.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive_players().count()
    }

    /// Append a line to the player-facing log.
    pub fn log(&mut self, line: impl Into<String>) {
        self.game_log.push_back(line.into());
    }

    /// Allocate the next card instance id.
    pub(crate) fn alloc_instance_id(&mut self) -> InstanceId {
        let id = InstanceId::new(self.next_instance_id);
        self.next_instance_id += 1;
        id
    }
}
