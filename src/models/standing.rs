//! Standing: a participant's aggregated round-robin record.

use crate::models::participant::ParticipantId;
use crate::models::tournament::TeamId;
use serde::{Deserialize, Serialize};

/// Per-participant round-robin aggregate. Recomputed in full after every
/// reported result; the sum of `matches_won` across all standings equals
/// the number of completed non-bye, non-draw matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub participant_id: ParticipantId,
    pub team_id: TeamId,
    /// 1-based rank. Ties on all ranking keys share a position; the next
    /// distinct entry takes its index + 1 (competition ranking: 1, 1, 3).
    pub position: u32,
    pub matches_played: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
    pub matches_drawn: u32,
    pub points_for: i64,
    pub points_against: i64,
    pub points_difference: i64,
    pub tournament_points: i64,
    /// Deterministic tiebreak after points and difference: total points
    /// scored (`points_for`).
    pub tiebreaker_score: i64,
}

impl Standing {
    /// All-zero row seeded when the schedule is generated.
    pub fn zero(participant_id: ParticipantId, team_id: TeamId) -> Self {
        Self {
            participant_id,
            team_id,
            position: 0,
            matches_played: 0,
            matches_won: 0,
            matches_lost: 0,
            matches_drawn: 0,
            points_for: 0,
            points_against: 0,
            points_difference: 0,
            tournament_points: 0,
            tiebreaker_score: 0,
        }
    }
}
