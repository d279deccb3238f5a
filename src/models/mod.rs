//! Data structures for the tournament engine: participants, matches, standings.

mod game;
mod participant;
mod standing;
mod tournament;

pub use game::{BracketSlot, GameMatch, MatchId, MatchStatus};
pub use participant::{Participant, ParticipantId, ParticipantStatus};
pub use standing::Standing;
pub use tournament::{
    ErrorKind, TeamId, Tournament, TournamentError, TournamentFormat, TournamentId,
    TournamentSettings, TournamentStatus, UserId,
};
