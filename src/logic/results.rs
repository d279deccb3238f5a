//! Match result processor: applies one reported result and its fallout.

use crate::logic::{bracket, lifecycle, standings};
use crate::models::{
    MatchId, MatchStatus, TeamId, Tournament, TournamentError, TournamentFormat, TournamentStatus,
};
use chrono::Utc;

/// Apply a reported result to one match.
///
/// The winner may be given explicitly (it must be one of the two teams,
/// and `loser_id`, if present, the other side); otherwise it is derived
/// from the scores. Equal scores without an explicit winner are a draw,
/// legal only for round robin with `allow_draws`.
///
/// On success the match is completed and timestamped, then: single
/// elimination eliminates the loser and advances the winner into its
/// next-round slot; round robin recomputes the standings. Re-reporting a
/// completed match is rejected and changes nothing.
pub fn report_match_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    team1_score: i64,
    team2_score: i64,
    winner_id: Option<TeamId>,
    loser_id: Option<TeamId>,
) -> Result<(), TournamentError> {
    tournament.require_status(TournamentStatus::InProgress)?;

    let idx = tournament
        .matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;

    let (team1, team2, round, match_number) = {
        let m = &tournament.matches[idx];
        match m.status {
            MatchStatus::Completed => return Err(TournamentError::MatchAlreadyCompleted(match_id)),
            MatchStatus::Bye | MatchStatus::Cancelled => {
                return Err(TournamentError::MatchNotReportable(match_id, m.status))
            }
            MatchStatus::Scheduled | MatchStatus::InProgress => {}
        }
        match (m.team1, m.team2) {
            (Some(a), Some(b)) => (a, b, m.round, m.match_number),
            _ => return Err(TournamentError::MatchNotReady(match_id)),
        }
    };

    let (winner, loser) = resolve_outcome(
        tournament, team1, team2, team1_score, team2_score, winner_id, loser_id,
    )?;

    {
        let m = &mut tournament.matches[idx];
        m.team1_score = Some(team1_score);
        m.team2_score = Some(team2_score);
        m.winner = winner;
        m.loser = loser;
        m.status = MatchStatus::Completed;
        m.completed_at = Some(Utc::now());
    }

    match tournament.format {
        TournamentFormat::SingleElimination => {
            if let Some(l) = loser {
                if let Some(p) = tournament.participant_by_team_mut(l) {
                    p.eliminate();
                }
            }
            if let Some(w) = winner {
                bracket::advance_winner(tournament, round, match_number, w)?;
            }
        }
        TournamentFormat::RoundRobin => standings::recompute_standings(tournament),
        // Unsupported formats never reach in_progress.
        TournamentFormat::DoubleElimination | TournamentFormat::Swiss => {}
    }

    lifecycle::refresh_progress(tournament);
    Ok(())
}

/// Decide winner and loser from the explicit ids or, failing that, the scores.
fn resolve_outcome(
    tournament: &Tournament,
    team1: TeamId,
    team2: TeamId,
    team1_score: i64,
    team2_score: i64,
    winner_id: Option<TeamId>,
    loser_id: Option<TeamId>,
) -> Result<(Option<TeamId>, Option<TeamId>), TournamentError> {
    if let Some(w) = winner_id {
        if w != team1 && w != team2 {
            return Err(TournamentError::InvalidWinner(w));
        }
        let other = if w == team1 { team2 } else { team1 };
        if let Some(l) = loser_id {
            if l != other {
                return Err(TournamentError::InvalidLoser(l));
            }
        }
        return Ok((Some(w), Some(other)));
    }

    if team1_score == team2_score {
        let draw_allowed = tournament.format == TournamentFormat::RoundRobin
            && tournament.settings.allow_draws;
        if !draw_allowed {
            return Err(TournamentError::DrawNotAllowed);
        }
        return Ok((None, None));
    }

    if team1_score > team2_score {
        Ok((Some(team1), Some(team2)))
    } else {
        Ok((Some(team2), Some(team1)))
    }
}
