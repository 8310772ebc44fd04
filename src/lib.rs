//! # cardclash
//!
//! Authoritative match-state engine for a multiplayer turn-based card
//! battler. Players join a shared room, draw from a personal weighted deck,
//! and on their turn play one card that mutates their own or an opponent's
//! combat state. The engine is the sole source of truth; transport layers
//! deliver intents and broadcast the resulting `Match` snapshots.
//!
//! ## Design Principles
//!
//! 1. **Validate-then-apply**: every operation checks all of its
//!    preconditions before mutating anything, so a rejection leaves the
//!    match byte-for-byte unchanged.
//!
//! 2. **Deterministic by injection**: all randomness (deck shuffles, turn
//!    order, hp-share targets) flows through a seedable `MatchRng`, forked
//!    per match from the registry's master stream.
//!
//! 3. **Snapshot broadcast**: successful operations return a cloned `Match`
//!    intended for verbatim broadcast to every participant; the game log
//!    rides along as persistent data so clones stay cheap.
//!
//! ## Modules
//!
//! - `cards`: catalog definitions and drawn card instances
//! - `core`: player identity, combat state, RNG
//! - `engine`: match state, deck engine, effect resolver, turn sequencer
//! - `registry`: the process-wide match table and its thread-safe handle
//! - `error`: the rejected-operation taxonomy

pub mod cards;
pub mod core;
pub mod engine;
pub mod error;
pub mod registry;

// Re-export commonly used types
pub use crate::cards::{CardCatalog, CardDefinition, CardId, CardInstance, CardKind, InstanceId};
pub use crate::core::{ActiveEffect, MatchRng, Player, PlayerId, MAX_HP, STARTING_HP};
pub use crate::engine::{
    GamePhase, Match, MatchId, MIN_PLAYERS, PASSIVE_CHARGE, REPEAT_ATTACK_MIN_ALIVE,
    STARTING_HAND_SIZE,
};
pub use crate::error::EngineError;
pub use crate::registry::{MatchRegistry, MatchSummary, SharedRegistry};
