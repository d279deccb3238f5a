//! Round-robin schedule generation via the circle method.

use crate::logic::registry;
use crate::models::{GameMatch, Standing, TeamId, Tournament, TournamentError};

/// Generate the complete round-robin schedule.
///
/// Circle method: with an odd participant count a synthetic bye seat
/// (`None`) pads the working list to even size m. Seat 0 stays fixed and
/// the rest rotate one step per round, giving m-1 rounds of m/2 pairings
/// with every unordered pair appearing exactly once. A pairing against the
/// synthetic seat becomes a bye match. Also seeds one all-zero standing
/// per participant.
pub fn generate_round_robin(tournament: &mut Tournament) -> Result<(), TournamentError> {
    let order = registry::seeding_order(tournament);
    let n = order.len();
    if n < 2 {
        return Err(TournamentError::InsufficientParticipants {
            needed: 2,
            current: n,
        });
    }

    let standings: Vec<Standing> = order
        .iter()
        .map(|p| Standing::zero(p.id, p.team_id))
        .collect();

    let mut seats: Vec<Option<TeamId>> = order.iter().map(|p| Some(p.team_id)).collect();
    if seats.len() % 2 == 1 {
        seats.push(None);
    }
    let m = seats.len();
    let rounds = (m - 1) as u32;

    let mut matches: Vec<GameMatch> = Vec::with_capacity(m / 2 * (m - 1));
    for round in 0..m - 1 {
        let arrangement = rotate(&seats, round);
        let round_no = (round + 1) as u32;
        for i in 0..m / 2 {
            let number = (i + 1) as u32;
            let game = match (arrangement[i], arrangement[m - 1 - i]) {
                (Some(a), Some(b)) => {
                    GameMatch::scheduled(round_no, number, None, Some(a), Some(b))
                }
                (Some(a), None) | (None, Some(a)) => GameMatch::bye(round_no, number, None, a),
                // There is at most one synthetic seat.
                (None, None) => continue,
            };
            matches.push(game);
        }
    }

    tournament.matches = matches;
    tournament.standings = standings;
    tournament.total_rounds = Some(rounds);
    tournament.current_round = 1;
    Ok(())
}

/// The seat arrangement for a given 0-based round, computed directly
/// rather than by mutating a shared list: seat 0 is fixed, seat j holds
/// original seat `1 + ((j - 1 + round) mod (m - 1))`.
fn rotate(seats: &[Option<TeamId>], round: usize) -> Vec<Option<TeamId>> {
    let m = seats.len();
    let mut arrangement = Vec::with_capacity(m);
    arrangement.push(seats[0]);
    for j in 1..m {
        arrangement.push(seats[1 + (j - 1 + round) % (m - 1)]);
    }
    arrangement
}
