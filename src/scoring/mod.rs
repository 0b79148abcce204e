//! Pure scoring and standings computation.
//!
//! Nothing in here touches the database: callers load a snapshot of
//! fixtures, memberships and predictions and pass it in.

pub mod leaderboard;
pub mod pass;
pub mod rounds;
pub mod scorer;

pub use leaderboard::LeaderboardAggregator;
pub use pass::{ScoreUpdate, ScoringPass, ScoringPlan};
pub use scorer::{PredictionScorer, ScoreOutcome, ScoringError};
