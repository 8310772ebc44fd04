//! Rejected-operation taxonomy.
//!
//! Every variant is a recoverable rejection: the offending intent is refused,
//! the match is left in its prior valid state, and the transport layer relays
//! the message to the originating client only. Nothing here is fatal to the
//! process or to the match.

use thiserror::Error;

use crate::cards::InstanceId;
use crate::engine::MatchId;

/// All ways a core operation can be rejected.
///
/// Messages are human-readable and intended for direct display.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A room with the requested id is already registered.
    #[error("room id {0} is already in use")]
    DuplicateRoom(MatchId),

    /// No room with the given id exists (lobby operations).
    #[error("room {0} does not exist")]
    RoomNotFound(MatchId),

    /// The match has already left the waiting phase.
    #[error("match {0} has already started")]
    MatchAlreadyStarted(MatchId),

    /// A match needs at least two players to start.
    #[error("at least 2 players are required to start (currently {0})")]
    NotEnoughPlayers(usize),

    /// No match with the given id exists (in-game operations).
    #[error("match {0} was not found")]
    MatchNotFound(MatchId),

    /// The acting player is not the current turn player.
    #[error("it is not your turn")]
    NotYourTurn,

    /// The acting player's hand holds no card with that instance id.
    #[error("card {0} is not in your hand")]
    CardNotInHand(InstanceId),

    /// An attack named no target, or a player id that is not in the match.
    #[error("the attack target was not found")]
    TargetNotFound,

    /// The consecutive-attack rule forbids this target right now.
    #[error("you cannot attack the same player twice in a row")]
    RepeatedTargetForbidden,
}
