//! Tournament lifecycle: draft -> registration_open -> in_progress -> completed/cancelled.

use crate::logic::{bracket, round_robin};
use crate::models::{Tournament, TournamentError, TournamentFormat, TournamentStatus, UserId};

/// Open the tournament for registrations (host only, from Draft).
pub fn open_registration(
    tournament: &mut Tournament,
    acting_user: UserId,
) -> Result<(), TournamentError> {
    tournament.require_host(acting_user)?;
    tournament.require_status(TournamentStatus::Draft)?;
    tournament.status = TournamentStatus::RegistrationOpen;
    Ok(())
}

/// Start the tournament: generate the bracket or schedule exactly once and
/// move to InProgress (host only).
///
/// Requires at least `min_teams` participants. A second start attempt is
/// rejected with `BracketAlreadyGenerated`; double elimination and Swiss
/// are declared in the format enum but have no generation logic, so they
/// are rejected outright rather than silently falling back.
pub fn start_tournament(
    tournament: &mut Tournament,
    acting_user: UserId,
) -> Result<(), TournamentError> {
    tournament.require_host(acting_user)?;
    if tournament.total_rounds.is_some() || !tournament.matches.is_empty() {
        return Err(TournamentError::BracketAlreadyGenerated);
    }
    tournament.require_status(TournamentStatus::RegistrationOpen)?;

    let current = tournament.participants.len();
    if current < tournament.min_teams {
        return Err(TournamentError::InsufficientParticipants {
            needed: tournament.min_teams,
            current,
        });
    }

    match tournament.format {
        TournamentFormat::SingleElimination => bracket::generate_single_elimination(tournament)?,
        TournamentFormat::RoundRobin => round_robin::generate_round_robin(tournament)?,
        format @ (TournamentFormat::DoubleElimination | TournamentFormat::Swiss) => {
            return Err(TournamentError::UnsupportedFormat(format))
        }
    }

    for p in &mut tournament.participants {
        p.activate();
    }
    tournament.status = TournamentStatus::InProgress;
    Ok(())
}

/// Cancel the tournament (host only, from any non-terminal state). No side
/// effect beyond the status field.
pub fn cancel_tournament(
    tournament: &mut Tournament,
    acting_user: UserId,
) -> Result<(), TournamentError> {
    tournament.require_host(acting_user)?;
    if tournament.status.is_terminal() {
        return Err(TournamentError::InvalidStatus {
            expected: TournamentStatus::InProgress,
            actual: tournament.status,
        });
    }
    tournament.status = TournamentStatus::Cancelled;
    Ok(())
}

/// Advance `current_round` past fully resolved rounds (never beyond
/// `total_rounds`) and mark the tournament completed once every match is
/// resolved. Called after each applied result.
pub(crate) fn refresh_progress(tournament: &mut Tournament) {
    let total = match tournament.total_rounds {
        Some(t) => t,
        None => return,
    };
    while tournament.current_round < total
        && tournament
            .matches_in_round(tournament.current_round)
            .all(|m| m.status.is_resolved())
    {
        tournament.current_round += 1;
    }
    if tournament.all_matches_resolved() {
        tournament.status = TournamentStatus::Completed;
    }
}
