//! Tournament engine for the trivia platform: models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance_winner, cancel_tournament, generate_round_robin, generate_single_elimination,
    open_registration, recompute_standings, register_team, report_match_result, seeding_order,
    start_tournament,
};
pub use models::{
    BracketSlot, ErrorKind, GameMatch, MatchId, MatchStatus, Participant, ParticipantId,
    ParticipantStatus, Standing, TeamId, Tournament, TournamentError, TournamentFormat,
    TournamentId, TournamentSettings, TournamentStatus, UserId,
};
