//! Match registry: the process-wide table of active matches.
//!
//! `MatchRegistry` is an explicitly owned store rather than ambient module
//! state, so tests build a fresh registry per case and seed it for exact
//! outcomes. Every operation returns a cloned `Match` snapshot for the
//! transport layer to broadcast verbatim; rejected operations mutate nothing.
//!
//! `SharedRegistry` wraps the store in `Arc<Mutex<_>>` to give concurrent
//! transport tasks the required discipline: all mutations against the table
//! (and therefore against any single match) are serialized, one intent at a
//! time, while different matches remain independent in every other respect.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::cards::{CardCatalog, InstanceId};
use crate::core::{MatchRng, Player, PlayerId};
use crate::engine::state::{GamePhase, Match, MatchId};
use crate::engine::{resolver, turn};
use crate::error::EngineError;

/// Discovery entry for the public-room listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Room identifier to join with.
    pub match_id: MatchId,
    /// Players currently waiting in the room.
    pub player_count: usize,
}

/// Owned table of active matches plus the card catalog they draw from.
pub struct MatchRegistry {
    catalog: CardCatalog,
    matches: FxHashMap<MatchId, Match>,
    rng: MatchRng,
}

impl MatchRegistry {
    /// Create a registry with a seeded master RNG.
    ///
    /// Each created match forks its own stream from the master, so a whole
    /// sequence of matches replays deterministically from one seed.
    #[must_use]
    pub fn new(catalog: CardCatalog, seed: u64) -> Self {
        Self {
            catalog,
            matches: FxHashMap::default(),
            rng: MatchRng::new(seed),
        }
    }

    /// Create a registry seeded from entropy.
    #[must_use]
    pub fn from_entropy(catalog: CardCatalog) -> Self {
        Self {
            catalog,
            matches: FxHashMap::default(),
            rng: MatchRng::from_entropy(),
        }
    }

    /// Number of registered matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Is the registry empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Read access to a match, mainly for tests and diagnostics.
    #[must_use]
    pub fn get(&self, match_id: &MatchId) -> Option<&Match> {
        self.matches.get(match_id)
    }

    /// Create a new match with its creator as the first player.
    ///
    /// A fresh UUID id is generated unless one is requested; a requested id
    /// that is already registered is rejected with `DuplicateRoom`.
    pub fn create_match(
        &mut self,
        requested_id: Option<MatchId>,
        player_id: PlayerId,
        player_name: &str,
    ) -> Result<(Match, Player), EngineError> {
        let match_id = match requested_id {
            Some(id) => {
                if self.matches.contains_key(&id) {
                    return Err(EngineError::DuplicateRoom(id));
                }
                id
            }
            None => MatchId::new(Uuid::new_v4().to_string()),
        };

        let mut game = Match::new(match_id.clone(), self.rng.fork());
        let player = join_player(&mut game, player_id, player_name);
        info!(match_id = %match_id, player = %player.id, "match created");

        let snapshot = game.clone();
        self.matches.insert(match_id, game);
        Ok((snapshot, player))
    }

    /// Add a player to a waiting match.
    pub fn join_match(
        &mut self,
        match_id: &MatchId,
        player_id: PlayerId,
        player_name: &str,
    ) -> Result<(Match, Player), EngineError> {
        let game = self
            .matches
            .get_mut(match_id)
            .ok_or_else(|| EngineError::RoomNotFound(match_id.clone()))?;
        if game.phase != GamePhase::Waiting {
            return Err(EngineError::MatchAlreadyStarted(match_id.clone()));
        }

        let player = join_player(game, player_id, player_name);
        debug!(match_id = %match_id, player = %player.id, "player joined");
        Ok((game.clone(), player))
    }

    /// Remove a player from a match.
    ///
    /// Deletes the match when its last player leaves (returning `None`), and
    /// is a no-op for unknown match ids.
    pub fn leave_match(&mut self, match_id: &MatchId, player_id: &PlayerId) -> Option<Match> {
        let game = self.matches.get_mut(match_id)?;
        game.players.retain(|p| &p.id != player_id);
        debug!(match_id = %match_id, player = %player_id, "player left");

        if game.players.is_empty() {
            self.matches.remove(match_id);
            info!(match_id = %match_id, "match removed, last player left");
            return None;
        }
        Some(game.clone())
    }

    /// Start a waiting match: deal decks and hands, fix the turn order.
    pub fn start_match(&mut self, match_id: &MatchId) -> Result<Match, EngineError> {
        let game = self
            .matches
            .get_mut(match_id)
            .ok_or_else(|| EngineError::RoomNotFound(match_id.clone()))?;

        turn::start(game, &self.catalog)?;
        info!(match_id = %match_id, players = game.players.len(), "match started");
        Ok(game.clone())
    }

    /// Play one card for the current turn player.
    pub fn play_card(
        &mut self,
        match_id: &MatchId,
        player_id: &PlayerId,
        card: InstanceId,
        target: Option<&PlayerId>,
    ) -> Result<Match, EngineError> {
        let game = self
            .matches
            .get_mut(match_id)
            .ok_or_else(|| EngineError::MatchNotFound(match_id.clone()))?;

        resolver::play_card(game, &self.catalog, player_id, card, target)?;
        debug!(match_id = %match_id, player = %player_id, card = %card, "card played");
        if game.phase == GamePhase::Ended {
            info!(match_id = %match_id, winner = ?game.winner, "match ended");
        }
        Ok(game.clone())
    }

    /// Public waiting rooms, for discovery before join.
    #[must_use]
    pub fn list_public_waiting(&self) -> Vec<MatchSummary> {
        self.matches
            .values()
            .filter(|game| game.is_public && game.phase == GamePhase::Waiting)
            .map(|game| MatchSummary {
                match_id: game.id.clone(),
                player_count: game.players.len(),
            })
            .collect()
    }
}

/// Append a new player with joining defaults; blank names become "Player N".
fn join_player(game: &mut Match, player_id: PlayerId, player_name: &str) -> Player {
    let name = if player_name.trim().is_empty() {
        format!("Player {}", game.players.len() + 1)
    } else {
        player_name.to_string()
    };
    let player = Player::new(player_id, name);
    game.players.push(player.clone());
    player
}

/// Thread-safe handle over a `MatchRegistry`.
///
/// Clones share one registry; each call locks for its full duration, which is
/// exactly the one-intent-at-a-time atomicity the engine contract demands.
/// Returned snapshots are owned clones, safe to broadcast after the lock is
/// released.
#[derive(Clone)]
pub struct SharedRegistry {
    inner: Arc<Mutex<MatchRegistry>>,
}

impl SharedRegistry {
    /// Wrap an owned registry.
    #[must_use]
    pub fn new(registry: MatchRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// See [`MatchRegistry::create_match`].
    pub fn create_match(
        &self,
        requested_id: Option<MatchId>,
        player_id: PlayerId,
        player_name: &str,
    ) -> Result<(Match, Player), EngineError> {
        self.inner
            .lock()
            .create_match(requested_id, player_id, player_name)
    }

    /// See [`MatchRegistry::join_match`].
    pub fn join_match(
        &self,
        match_id: &MatchId,
        player_id: PlayerId,
        player_name: &str,
    ) -> Result<(Match, Player), EngineError> {
        self.inner.lock().join_match(match_id, player_id, player_name)
    }

    /// See [`MatchRegistry::leave_match`].
    pub fn leave_match(&self, match_id: &MatchId, player_id: &PlayerId) -> Option<Match> {
        self.inner.lock().leave_match(match_id, player_id)
    }

    /// See [`MatchRegistry::start_match`].
    pub fn start_match(&self, match_id: &MatchId) -> Result<Match, EngineError> {
        self.inner.lock().start_match(match_id)
    }

    /// See [`MatchRegistry::play_card`].
    pub fn play_card(
        &self,
        match_id: &MatchId,
        player_id: &PlayerId,
        card: InstanceId,
        target: Option<&PlayerId>,
    ) -> Result<Match, EngineError> {
        self.inner.lock().play_card(match_id, player_id, card, target)
    }

    /// See [`MatchRegistry::list_public_waiting`].
    #[must_use]
    pub fn list_public_waiting(&self) -> Vec<MatchSummary> {
        self.inner.lock().list_public_waiting()
    }
}
