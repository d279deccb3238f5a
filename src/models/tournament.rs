//! Tournament aggregate, settings, and the engine error type.

use crate::models::game::{GameMatch, MatchId, MatchStatus};
use crate::models::participant::{Participant, ParticipantId};
use crate::models::standing::Standing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;
/// Identifier of a team registered into tournaments (owned by the team service).
pub type TeamId = Uuid;
/// Identifier of an acting user (owned by the identity service).
pub type UserId = Uuid;

/// Broad classification of an engine error, used by the web layer to pick
/// an HTTP status and by callers to decide whether to re-fetch state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad input shape or range; surfaced to the caller verbatim.
    Validation,
    /// State has moved on (duplicate registration, already-completed match,
    /// re-generation attempt); the caller should re-fetch.
    Conflict,
    /// Tournament full, or not enough participants to start.
    Capacity,
    /// Bracket integrity defect or unsupported format; logged as fatal.
    Configuration,
    /// Unknown tournament/match/participant id.
    NotFound,
    /// Acting user may not perform a host-only operation.
    Permission,
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    #[error("Team {0} is already registered for this tournament")]
    DuplicateParticipant(TeamId),

    #[error("Seed {0} is already taken")]
    DuplicateSeed(u32),

    #[error("Tournament is full ({max_teams} teams)")]
    TournamentFull { max_teams: usize },

    #[error("Not enough participants: need {needed}, have {current}")]
    InsufficientParticipants { needed: usize, current: usize },

    #[error("Tournament is not in a state that allows this action: expected {expected}, got {actual}")]
    InvalidStatus {
        expected: TournamentStatus,
        actual: TournamentStatus,
    },

    #[error("Match {0} already has a result")]
    MatchAlreadyCompleted(MatchId),

    #[error("Match {0} cannot take a result (status: {1})")]
    MatchNotReportable(MatchId, MatchStatus),

    #[error("Match {0} does not have both teams assigned yet")]
    MatchNotReady(MatchId),

    #[error("Reported winner {0} is not playing in this match")]
    InvalidWinner(TeamId),

    #[error("Reported loser {0} does not match the other side of this match")]
    InvalidLoser(TeamId),

    #[error("Draws are not allowed in this tournament")]
    DrawNotAllowed,

    #[error("Bracket or schedule has already been generated")]
    BracketAlreadyGenerated,

    #[error("Format {0} is not implemented")]
    UnsupportedFormat(TournamentFormat),

    #[error("No round {round} match at position {position}: bracket is corrupt")]
    MissingAdvancementTarget { round: u32, position: u32 },

    #[error("max_teams must be >= min_teams and min_teams >= 2")]
    InvalidTeamLimits,

    #[error("Only the host may perform this action")]
    NotHost,
}

impl TournamentError {
    /// Which class of error this is (drives HTTP status mapping).
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            TournamentNotFound(_) | MatchNotFound(_) | ParticipantNotFound(_) => {
                ErrorKind::NotFound
            }
            DuplicateParticipant(_)
            | DuplicateSeed(_)
            | InvalidStatus { .. }
            | MatchAlreadyCompleted(_)
            | MatchNotReportable(_, _)
            | MatchNotReady(_)
            | BracketAlreadyGenerated => ErrorKind::Conflict,
            TournamentFull { .. } | InsufficientParticipants { .. } => ErrorKind::Capacity,
            InvalidWinner(_) | InvalidLoser(_) | DrawNotAllowed | InvalidTeamLimits => {
                ErrorKind::Validation
            }
            UnsupportedFormat(_) | MissingAdvancementTarget { .. } => ErrorKind::Configuration,
            NotHost => ErrorKind::Permission,
        }
    }
}

/// Competition format. Double elimination and Swiss are accepted by the
/// type system but rejected when the tournament starts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    #[default]
    SingleElimination,
    RoundRobin,
    DoubleElimination,
    Swiss,
}

impl std::fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentFormat::SingleElimination => write!(f, "single_elimination"),
            TournamentFormat::RoundRobin => write!(f, "round_robin"),
            TournamentFormat::DoubleElimination => write!(f, "double_elimination"),
            TournamentFormat::Swiss => write!(f, "swiss"),
        }
    }
}

/// Lifecycle phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Created, not yet taking registrations.
    #[default]
    Draft,
    /// Teams may register.
    RegistrationOpen,
    /// Bracket/schedule generated; results are being reported.
    InProgress,
    /// All matches resolved. Terminal.
    Completed,
    /// Cancelled by the host. Terminal.
    Cancelled,
}

impl TournamentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TournamentStatus::Completed | TournamentStatus::Cancelled
        )
    }
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentStatus::Draft => write!(f, "draft"),
            TournamentStatus::RegistrationOpen => write!(f, "registration_open"),
            TournamentStatus::InProgress => write!(f, "in_progress"),
            TournamentStatus::Completed => write!(f, "completed"),
            TournamentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Scoring knobs consulted by the standings calculator (round robin only).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentSettings {
    pub points_for_win: i64,
    pub points_for_draw: i64,
    pub points_for_loss: i64,
    /// Whether equal scores are a legal result. Only consulted for round
    /// robin; a draw is never legal in single elimination.
    pub allow_draws: bool,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            points_for_win: 3,
            points_for_draw: 1,
            points_for_loss: 0,
            allow_draws: true,
        }
    }
}

/// Full tournament state: participants, matches, standings, and lifecycle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub host_id: UserId,
    pub format: TournamentFormat,
    pub status: TournamentStatus,
    pub max_teams: usize,
    pub min_teams: usize,
    /// 0 until the bracket/schedule is generated; never exceeds `total_rounds`.
    pub current_round: u32,
    /// Set exactly once at generation; immutable thereafter.
    pub total_rounds: Option<u32>,
    pub settings: TournamentSettings,
    pub participants: Vec<Participant>,
    pub matches: Vec<GameMatch>,
    /// Round robin only; empty for elimination formats.
    pub standings: Vec<Standing>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Draft with no participants.
    pub fn new(
        host_id: UserId,
        format: TournamentFormat,
        max_teams: usize,
        min_teams: usize,
        settings: TournamentSettings,
    ) -> Result<Self, TournamentError> {
        if min_teams < 2 || max_teams < min_teams {
            return Err(TournamentError::InvalidTeamLimits);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            host_id,
            format,
            status: TournamentStatus::Draft,
            max_teams,
            min_teams,
            current_round: 0,
            total_rounds: None,
            settings,
            participants: Vec::new(),
            matches: Vec::new(),
            standings: Vec::new(),
            created_at: Utc::now(),
        })
    }

    /// Look up a participant by the team it represents.
    pub fn participant_by_team(&self, team_id: TeamId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.team_id == team_id)
    }

    /// Mutable participant lookup by team.
    pub fn participant_by_team_mut(&mut self, team_id: TeamId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.team_id == team_id)
    }

    /// Immutable match lookup by id.
    pub fn match_by_id(&self, match_id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    /// Matches of one round; generation emits them in match_number order.
    pub fn matches_in_round(&self, round: u32) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    /// True once every match has reached a terminal status.
    pub fn all_matches_resolved(&self) -> bool {
        self.matches.iter().all(|m| m.status.is_resolved())
    }

    /// Require a specific lifecycle status.
    pub fn require_status(&self, expected: TournamentStatus) -> Result<(), TournamentError> {
        if self.status != expected {
            return Err(TournamentError::InvalidStatus {
                expected,
                actual: self.status,
            });
        }
        Ok(())
    }

    /// Require the acting user to be the host (start/cancel are host-only).
    pub fn require_host(&self, acting_user: UserId) -> Result<(), TournamentError> {
        if acting_user != self.host_id {
            return Err(TournamentError::NotHost);
        }
        Ok(())
    }
}
