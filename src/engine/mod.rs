//! Match engine: state, deck handling, card resolution, turn sequencing.
//!
//! Entry points live on `MatchRegistry` (see `crate::registry`); this module
//! holds the state types and the pure in-memory transitions behind them.

pub mod state;

pub(crate) mod deck;
pub(crate) mod resolver;
pub(crate) mod turn;

pub use state::{GamePhase, Match, MatchId};

/// Cards dealt to each player at match start.
pub const STARTING_HAND_SIZE: usize = 3;

/// Automatic boost applied to every card left in hand at turn close.
pub const PASSIVE_CHARGE: i64 = 2;

/// Players required before a match may start.
pub const MIN_PLAYERS: usize = 2;

/// The consecutive-attack rule only applies while at least this many
/// players are alive.
pub const REPEAT_ATTACK_MIN_ALIVE: usize = 4;
