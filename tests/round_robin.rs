//! Integration tests for round-robin scheduling and standings.

use std::collections::HashSet;
use trivia_tournament_engine::{
    open_registration, recompute_standings, register_team, report_match_result, start_tournament,
    MatchStatus, TeamId, Tournament, TournamentFormat, TournamentSettings, TournamentStatus,
};
use uuid::Uuid;

fn started_round_robin(n: usize) -> (Tournament, Vec<TeamId>) {
    let host = Uuid::new_v4();
    let mut t = Tournament::new(
        host,
        TournamentFormat::RoundRobin,
        32,
        2,
        TournamentSettings::default(),
    )
    .unwrap();
    open_registration(&mut t, host).unwrap();
    let teams: Vec<TeamId> = (0..n)
        .map(|i| {
            let team = Uuid::new_v4();
            register_team(&mut t, team, Some((i + 1) as u32)).unwrap();
            team
        })
        .collect();
    start_tournament(&mut t, host).unwrap();
    (t, teams)
}

fn pair_of(m: &trivia_tournament_engine::GameMatch) -> Option<(TeamId, TeamId)> {
    match (m.team1, m.team2) {
        (Some(a), Some(b)) if a < b => Some((a, b)),
        (Some(a), Some(b)) => Some((b, a)),
        _ => None,
    }
}

#[test]
fn four_teams_three_rounds_six_matches_no_repeats() {
    let (t, teams) = started_round_robin(4);
    assert_eq!(t.total_rounds, Some(3));
    assert_eq!(t.matches.len(), 6);

    let pairs: HashSet<_> = t.matches.iter().filter_map(pair_of).collect();
    assert_eq!(pairs.len(), 6);
    for team in &teams {
        let played = t.matches.iter().filter(|m| m.involves(*team)).count();
        assert_eq!(played, 3);
    }
}

#[test]
fn odd_count_adds_one_bye_per_participant() {
    let (t, teams) = started_round_robin(5);
    assert_eq!(t.total_rounds, Some(5));

    let byes: Vec<_> = t
        .matches
        .iter()
        .filter(|m| m.status == MatchStatus::Bye)
        .collect();
    assert_eq!(byes.len(), 5);
    for team in &teams {
        let team_byes = byes.iter().filter(|m| m.team1 == Some(*team)).count();
        assert_eq!(team_byes, 1);
    }

    // Every unordered pair exactly once across the real matches.
    let pairs: HashSet<_> = t.matches.iter().filter_map(pair_of).collect();
    assert_eq!(pairs.len(), 10);
    let real = t
        .matches
        .iter()
        .filter(|m| m.status != MatchStatus::Bye)
        .count();
    assert_eq!(real, 10);
}

#[test]
fn every_round_plays_each_team_at_most_once() {
    let (t, _) = started_round_robin(6);
    for round in 1..=5 {
        let mut seen = HashSet::new();
        for m in t.matches_in_round(round) {
            for team in [m.team1, m.team2].into_iter().flatten() {
                assert!(seen.insert(team), "team scheduled twice in round {round}");
            }
        }
        assert_eq!(seen.len(), 6);
    }
}

#[test]
fn schedule_seeds_all_zero_standings() {
    let (t, _) = started_round_robin(4);
    assert_eq!(t.standings.len(), 4);
    for row in &t.standings {
        assert_eq!(row.matches_played, 0);
        assert_eq!(row.tournament_points, 0);
        assert_eq!(row.points_difference, 0);
    }
}

#[test]
fn standings_accumulate_and_rank_by_points_then_difference() {
    let (mut t, teams) = started_round_robin(4);
    // teams[0] wins every match big; teams[1] wins its other two narrowly.
    let results: Vec<(trivia_tournament_engine::MatchId, TeamId, TeamId)> = t
        .matches
        .iter()
        .map(|m| (m.id, m.team1.unwrap(), m.team2.unwrap()))
        .collect();
    for (id, t1, t2) in results {
        let winner = if t1 == teams[0] || t2 == teams[0] {
            teams[0]
        } else if t1 == teams[1] || t2 == teams[1] {
            teams[1]
        } else {
            t1
        };
        let margin = if winner == teams[0] { 20 } else { 11 };
        let (s1, s2) = if winner == t1 { (margin, 10) } else { (10, margin) };
        report_match_result(&mut t, id, s1, s2, None, None).unwrap();
    }

    assert_eq!(t.status, TournamentStatus::Completed);
    let top = &t.standings[0];
    assert_eq!(top.team_id, teams[0]);
    assert_eq!(top.position, 1);
    assert_eq!(top.matches_won, 3);
    assert_eq!(top.tournament_points, 9);
    let second = &t.standings[1];
    assert_eq!(second.team_id, teams[1]);
    assert_eq!(second.matches_won, 2);

    // Win totals across the table equal completed non-draw matches.
    let wins: u32 = t.standings.iter().map(|s| s.matches_won).sum();
    assert_eq!(wins, 6);
    let losses: u32 = t.standings.iter().map(|s| s.matches_lost).sum();
    assert_eq!(losses, 6);
}

/// Report the match between two specific teams, scores given in (a, b) order.
fn report_pair(t: &mut Tournament, a: TeamId, b: TeamId, score_a: i64, score_b: i64) {
    let (id, a_is_team1) = {
        let m = t
            .matches
            .iter()
            .find(|m| m.involves(a) && m.involves(b))
            .unwrap();
        (m.id, m.team1 == Some(a))
    };
    let (s1, s2) = if a_is_team1 {
        (score_a, score_b)
    } else {
        (score_b, score_a)
    };
    report_match_result(t, id, s1, s2, None, None).unwrap();
}

#[test]
fn equal_points_rank_by_point_difference() {
    let (mut t, teams) = started_round_robin(3);
    let (a, b, c) = (teams[0], teams[1], teams[2]);
    // A cycle of wins leaves everyone on one win (3 points); the margins
    // decide: a +9, b 0, c -9.
    report_pair(&mut t, a, b, 20, 10);
    report_pair(&mut t, b, c, 15, 5);
    report_pair(&mut t, c, a, 10, 9);

    let order: Vec<_> = t.standings.iter().map(|s| s.team_id).collect();
    assert_eq!(order, vec![a, b, c]);
    let diffs: Vec<_> = t.standings.iter().map(|s| s.points_difference).collect();
    assert_eq!(diffs, vec![9, 0, -9]);
    for (i, row) in t.standings.iter().enumerate() {
        assert_eq!(row.tournament_points, 3);
        assert_eq!(row.position, (i + 1) as u32);
    }
}

#[test]
fn equal_points_and_difference_fall_back_to_points_scored() {
    let (mut t, teams) = started_round_robin(3);
    let (a, b, c) = (teams[0], teams[1], teams[2]);
    // Same cycle, every margin exactly +10: points and difference tie for
    // all three, so total points scored ranks them b (45), a (35), c (30).
    report_pair(&mut t, a, b, 30, 20);
    report_pair(&mut t, b, c, 25, 15);
    report_pair(&mut t, c, a, 15, 5);

    let order: Vec<_> = t.standings.iter().map(|s| s.team_id).collect();
    assert_eq!(order, vec![b, a, c]);
    for row in &t.standings {
        assert_eq!(row.tournament_points, 3);
        assert_eq!(row.points_difference, 0);
    }
    let tiebreakers: Vec<_> = t.standings.iter().map(|s| s.tiebreaker_score).collect();
    assert_eq!(tiebreakers, vec![45, 35, 30]);
    let positions: Vec<_> = t.standings.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
}

#[test]
fn recompute_is_idempotent() {
    let (mut t, _) = started_round_robin(4);
    let id = t.matches[0].id;
    report_match_result(&mut t, id, 15, 12, None, None).unwrap();

    let first = t.standings.clone();
    recompute_standings(&mut t);
    assert_eq!(t.standings, first);
    recompute_standings(&mut t);
    assert_eq!(t.standings, first);
}

#[test]
fn fully_tied_rows_share_a_position() {
    let (mut t, _) = started_round_robin(4);
    // Every match drawn 10-10: all rows end identical.
    let ids: Vec<_> = t.matches.iter().map(|m| m.id).collect();
    for id in ids {
        report_match_result(&mut t, id, 10, 10, None, None).unwrap();
    }
    assert_eq!(t.standings.len(), 4);
    for row in &t.standings {
        assert_eq!(row.matches_drawn, 3);
        assert_eq!(row.tournament_points, 3);
        // Competition ranking: all tied entries share position 1.
        assert_eq!(row.position, 1);
    }
}

#[test]
fn draws_rejected_when_settings_disallow_them() {
    let host = Uuid::new_v4();
    let settings = TournamentSettings {
        allow_draws: false,
        ..TournamentSettings::default()
    };
    let mut t = Tournament::new(host, TournamentFormat::RoundRobin, 8, 2, settings).unwrap();
    open_registration(&mut t, host).unwrap();
    for i in 0..2u32 {
        register_team(&mut t, Uuid::new_v4(), Some(i + 1)).unwrap();
    }
    start_tournament(&mut t, host).unwrap();
    let id = t.matches[0].id;
    assert!(matches!(
        report_match_result(&mut t, id, 7, 7, None, None),
        Err(trivia_tournament_engine::TournamentError::DrawNotAllowed)
    ));
}
