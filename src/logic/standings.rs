//! Standings calculator: full recompute of round-robin rankings.

use crate::logic::registry;
use crate::models::{MatchStatus, Standing, Tournament};

/// Rebuild the standings table from scratch.
///
/// Every completed non-bye match a participant appears in contributes to
/// its row; byes and draws carry no win/loss. Recomputing in full after
/// each result keeps the table free of incremental drift, and running it
/// twice on unchanged matches yields identical rows.
///
/// Ranking order: tournament points desc, points difference desc, then the
/// tiebreaker score (total points scored) desc; entries still tied keep
/// seeding order. Tied rows share a position and the next distinct row
/// takes its index + 1 (1, 1, 3).
pub fn recompute_standings(tournament: &mut Tournament) {
    let settings = tournament.settings;
    let order: Vec<_> = registry::seeding_order(tournament)
        .iter()
        .map(|p| (p.id, p.team_id))
        .collect();

    let mut rows: Vec<Standing> = Vec::with_capacity(order.len());
    for (participant_id, team_id) in order {
        let mut row = Standing::zero(participant_id, team_id);
        for m in &tournament.matches {
            if m.status != MatchStatus::Completed || !m.involves(team_id) {
                continue;
            }
            let (scored, conceded) = if m.team1 == Some(team_id) {
                (m.team1_score.unwrap_or(0), m.team2_score.unwrap_or(0))
            } else {
                (m.team2_score.unwrap_or(0), m.team1_score.unwrap_or(0))
            };
            row.matches_played += 1;
            row.points_for += scored;
            row.points_against += conceded;
            match m.winner {
                Some(w) if w == team_id => row.matches_won += 1,
                Some(_) => row.matches_lost += 1,
                None => row.matches_drawn += 1,
            }
        }
        row.points_difference = row.points_for - row.points_against;
        row.tournament_points = i64::from(row.matches_won) * settings.points_for_win
            + i64::from(row.matches_drawn) * settings.points_for_draw
            + i64::from(row.matches_lost) * settings.points_for_loss;
        row.tiebreaker_score = row.points_for;
        rows.push(row);
    }

    // Stable sort: rows enter in seeding order, which therefore decides
    // the layout of fully tied entries.
    rows.sort_by(|a, b| rank_key(b).cmp(&rank_key(a)));

    for i in 0..rows.len() {
        rows[i].position = if i > 0 && rank_key(&rows[i]) == rank_key(&rows[i - 1]) {
            rows[i - 1].position
        } else {
            (i + 1) as u32
        };
    }

    tournament.standings = rows;
}

fn rank_key(row: &Standing) -> (i64, i64, i64) {
    (
        row.tournament_points,
        row.points_difference,
        row.tiebreaker_score,
    )
}
