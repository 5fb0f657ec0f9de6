pub mod elo;
pub mod leaderboard;
pub mod types;

pub use elo::{expected_score, replay, simulate};
pub use leaderboard::{HypotheticalLeaderboard, build_leaderboard, excluded_teams};
pub use types::{LeaderboardEntry, LeaderboardOptions, RatingSnapshot, Simulation};
