//! Participant: a team bound to one tournament, with seed and lifecycle.

use crate::models::tournament::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant row (one team in one tournament).
pub type ParticipantId = Uuid;

/// Lifecycle of a participant within its tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    /// Registered; the tournament has not started.
    #[default]
    Registered,
    /// Tournament started, still in contention.
    Active,
    /// Knocked out (single elimination only).
    Eliminated,
    /// Left before or during the tournament.
    Withdrawn,
}

/// A team's entry in a tournament. At most one participant per
/// (tournament, team) pair; seeds are unique among seeded entries.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub team_id: TeamId,
    /// Lower = stronger. Unseeded entries sort after all seeded ones.
    pub seed: Option<u32>,
    pub status: ParticipantStatus,
    pub registered_at: DateTime<Utc>,
    pub eliminated_at: Option<DateTime<Utc>>,
}

impl Participant {
    /// Register a team, optionally seeded.
    pub fn new(team_id: TeamId, seed: Option<u32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_id,
            seed,
            status: ParticipantStatus::Registered,
            registered_at: Utc::now(),
            eliminated_at: None,
        }
    }

    /// Mark the participant as active (tournament started).
    pub fn activate(&mut self) {
        self.status = ParticipantStatus::Active;
    }

    /// Knock the participant out and stamp the elimination time.
    pub fn eliminate(&mut self) {
        self.status = ParticipantStatus::Eliminated;
        self.eliminated_at = Some(Utc::now());
    }
}
