//! Participant registry: team registration and seeding order.

use crate::models::{
    Participant, ParticipantId, TeamId, Tournament, TournamentError, TournamentStatus,
};

/// Register a team for the tournament, optionally with a seed.
///
/// Requires `registration_open`. Fails with `DuplicateParticipant` if the
/// team already has an entry, `DuplicateSeed` if the seed is taken, and
/// `TournamentFull` once `max_teams` entries exist.
pub fn register_team(
    tournament: &mut Tournament,
    team_id: TeamId,
    seed: Option<u32>,
) -> Result<ParticipantId, TournamentError> {
    tournament.require_status(TournamentStatus::RegistrationOpen)?;

    if tournament.participant_by_team(team_id).is_some() {
        return Err(TournamentError::DuplicateParticipant(team_id));
    }
    if tournament.participants.len() >= tournament.max_teams {
        return Err(TournamentError::TournamentFull {
            max_teams: tournament.max_teams,
        });
    }
    if let Some(s) = seed {
        if tournament.participants.iter().any(|p| p.seed == Some(s)) {
            return Err(TournamentError::DuplicateSeed(s));
        }
    }

    let participant = Participant::new(team_id, seed);
    let id = participant.id;
    tournament.participants.push(participant);
    Ok(id)
}

/// Participants in seeding order: seeded entries ascending by seed, then
/// unseeded entries in registration order. This is the order the bracket
/// generator and scheduler consume.
pub fn seeding_order(tournament: &Tournament) -> Vec<&Participant> {
    let mut seeded: Vec<&Participant> = tournament
        .participants
        .iter()
        .filter(|p| p.seed.is_some())
        .collect();
    seeded.sort_by_key(|p| p.seed);

    let unseeded = tournament
        .participants
        .iter()
        .filter(|p| p.seed.is_none());

    seeded.into_iter().chain(unseeded).collect()
}
