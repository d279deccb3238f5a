//! Match record and bracket slot structures.

use crate::models::tournament::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Lifecycle of a single match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Waiting for a result (or, in later elimination rounds, for teams).
    #[default]
    Scheduled,
    /// No opponent; the lone team advances automatically. Never reportable.
    Bye,
    InProgress,
    Completed,
    Cancelled,
}

impl MatchStatus {
    /// Resolved matches no longer block round or tournament completion.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            MatchStatus::Bye | MatchStatus::Completed | MatchStatus::Cancelled
        )
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::Bye => write!(f, "bye"),
            MatchStatus::InProgress => write!(f, "in_progress"),
            MatchStatus::Completed => write!(f, "completed"),
            MatchStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Place of a match in the elimination tree. The label ("F", "SF1",
/// "R1M3") is derived once at generation and is display-only: no logic
/// ever branches on it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketSlot {
    pub round: u32,
    /// 1-based position within the round.
    pub slot: u32,
    pub label: String,
}

impl BracketSlot {
    /// Build a slot with its display label. Round 1 is always "R1M{k}";
    /// the last round is the final "F", the round before it "SF{k}".
    pub fn new(round: u32, slot: u32, total_rounds: u32) -> Self {
        let label = if round == 1 {
            format!("R1M{slot}")
        } else if round == total_rounds {
            "F".to_string()
        } else if round + 1 == total_rounds {
            format!("SF{slot}")
        } else {
            format!("R{round}M{slot}")
        };
        Self { round, slot, label }
    }
}

/// A single match between two teams. `team2 == None` signals a bye.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    /// 1-based round this match belongs to.
    pub round: u32,
    /// 1-based ordinal within the round.
    pub match_number: u32,
    /// Single elimination only; None for round robin.
    pub bracket: Option<BracketSlot>,
    pub team1: Option<TeamId>,
    pub team2: Option<TeamId>,
    pub winner: Option<TeamId>,
    pub loser: Option<TeamId>,
    pub team1_score: Option<i64>,
    pub team2_score: Option<i64>,
    pub status: MatchStatus,
    pub completed_at: Option<DateTime<Utc>>,
}

impl GameMatch {
    /// A regular match awaiting a result. Later elimination rounds pass
    /// `None` for teams not yet decided.
    pub fn scheduled(
        round: u32,
        match_number: u32,
        bracket: Option<BracketSlot>,
        team1: Option<TeamId>,
        team2: Option<TeamId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            match_number,
            bracket,
            team1,
            team2,
            winner: None,
            loser: None,
            team1_score: None,
            team2_score: None,
            status: MatchStatus::Scheduled,
            completed_at: None,
        }
    }

    /// A bye: created already resolved with the lone team as winner.
    pub fn bye(round: u32, match_number: u32, bracket: Option<BracketSlot>, team: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            match_number,
            bracket,
            team1: Some(team),
            team2: None,
            winner: Some(team),
            loser: None,
            team1_score: None,
            team2_score: None,
            status: MatchStatus::Bye,
            completed_at: Some(Utc::now()),
        }
    }

    /// Whether the given team plays in this match.
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.team1 == Some(team_id) || self.team2 == Some(team_id)
    }
}
