//! Core engine types: player identity, combat state, RNG.

pub mod player;
pub mod rng;

pub use player::{ActiveEffect, Player, PlayerId, MAX_HP, STARTING_HP};
pub use rng::MatchRng;
