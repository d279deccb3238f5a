//! Single-elimination bracket: generation and winner advancement.

use crate::logic::registry;
use crate::models::{
    BracketSlot, GameMatch, MatchStatus, TeamId, Tournament, TournamentError,
};

/// Generate the full single-elimination match tree.
///
/// With n participants in seeding order: `bracket_size` is the next power
/// of two, `rounds = log2(bracket_size)`. Round 1 pairs seed rank i
/// against rank `bracket_size - 1 - i`; a missing opposing rank is a bye,
/// so byes always land on the strongest seeds. Rounds 2..=rounds are
/// placeholders with no teams. Byes are resolved immediately and their
/// winners advanced into round 2.
pub fn generate_single_elimination(tournament: &mut Tournament) -> Result<(), TournamentError> {
    let order: Vec<TeamId> = registry::seeding_order(tournament)
        .iter()
        .map(|p| p.team_id)
        .collect();
    let n = order.len();
    if n < 2 {
        return Err(TournamentError::InsufficientParticipants {
            needed: 2,
            current: n,
        });
    }

    let bracket_size = n.next_power_of_two();
    let rounds = bracket_size.trailing_zeros();

    let mut matches: Vec<GameMatch> = Vec::with_capacity(bracket_size - 1);
    for i in 0..bracket_size / 2 {
        let number = (i + 1) as u32;
        let slot = Some(BracketSlot::new(1, number, rounds));
        let opposing = bracket_size - 1 - i;
        let m = if opposing < n {
            GameMatch::scheduled(1, number, slot, Some(order[i]), Some(order[opposing]))
        } else {
            GameMatch::bye(1, number, slot, order[i])
        };
        matches.push(m);
    }
    for round in 2..=rounds {
        let count = bracket_size >> round;
        for number in 1..=count as u32 {
            let slot = Some(BracketSlot::new(round, number, rounds));
            matches.push(GameMatch::scheduled(round, number, slot, None, None));
        }
    }

    tournament.matches = matches;
    tournament.total_rounds = Some(rounds);
    tournament.current_round = 1;

    // Bye winners take their round-2 slot right away.
    let byes: Vec<(u32, TeamId)> = tournament
        .matches
        .iter()
        .filter(|m| m.status == MatchStatus::Bye)
        .filter_map(|m| m.winner.map(|w| (m.match_number, w)))
        .collect();
    for (match_number, winner) in byes {
        advance_winner(tournament, 1, match_number, winner)?;
    }

    Ok(())
}

/// Place the winner of the round-`round`, ordinal-`match_number` match
/// into its deterministic next-round slot.
///
/// With `matches_in_round = bracket_size >> round`: `position =
/// ((match_number - 1) mod matches_in_round) + 1`, the target is the
/// round-`round + 1` match at `ceil(position / 2)`, upper slot (team1) if
/// `position` is odd. The final round has no target. A missing target
/// match means the bracket was generated wrong; that is a fatal integrity
/// violation, never a silent no-op.
pub fn advance_winner(
    tournament: &mut Tournament,
    round: u32,
    match_number: u32,
    winner: TeamId,
) -> Result<(), TournamentError> {
    let total = match tournament.total_rounds {
        Some(t) => t,
        None => {
            log::error!(
                "tournament {}: advancement requested before bracket generation",
                tournament.id
            );
            return Err(TournamentError::MissingAdvancementTarget {
                round: round + 1,
                position: 0,
            });
        }
    };
    if round >= total {
        // This was the final; nothing to advance into.
        return Ok(());
    }

    let bracket_size = 1usize << total;
    let matches_in_round = (bracket_size >> round) as u32;
    let position = ((match_number - 1) % matches_in_round) + 1;
    let next_position = position.div_ceil(2);

    let tournament_id = tournament.id;
    let target = tournament
        .matches
        .iter_mut()
        .find(|m| m.round == round + 1 && m.match_number == next_position)
        .ok_or_else(|| {
            log::error!(
                "tournament {tournament_id}: no round {} match at position {next_position}; \
                 bracket is corrupt",
                round + 1
            );
            TournamentError::MissingAdvancementTarget {
                round: round + 1,
                position: next_position,
            }
        })?;

    if position % 2 == 1 {
        target.team1 = Some(winner);
    } else {
        target.team2 = Some(winner);
    }
    Ok(())
}
