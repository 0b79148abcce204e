// src/models/fixture.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One scheduled match. Rows are written by the external fixture sync;
/// the API only records results.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Fixture {
    pub id: Uuid,
    pub fixture_round: i32,
    pub kickoff: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    pub actual_home_score: Option<i32>,
    pub actual_away_score: Option<i32>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Fixture {
    /// True only when the fixture is flagged complete and both scores are recorded
    pub fn has_final_score(&self) -> bool {
        self.is_completed && self.actual_home_score.is_some() && self.actual_away_score.is_some()
    }

    /// Predictions lock at kickoff
    pub fn has_kicked_off(&self, now: DateTime<Utc>) -> bool {
        now >= self.kickoff
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FixturesQuery {
    pub round: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FixturesResponse {
    pub fixtures: Vec<Fixture>,
    pub current_round: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FixtureResultRequest {
    pub home_score: i32,
    pub away_score: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FixtureResultResponse {
    pub fixture: Fixture,
    pub predictions_scored: usize,
}
