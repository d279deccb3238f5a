//! Engine operations: registry, generation, results, standings, lifecycle.

mod bracket;
mod lifecycle;
mod registry;
mod results;
mod round_robin;
mod standings;

pub use bracket::{advance_winner, generate_single_elimination};
pub use lifecycle::{cancel_tournament, open_registration, start_tournament};
pub use registry::{register_team, seeding_order};
pub use results::report_match_result;
pub use round_robin::generate_round_robin;
pub use standings::recompute_standings;
