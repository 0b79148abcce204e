// src/models/prediction.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

use crate::models::common::Scoreline;

pub const EXACT_SCORE_POINTS: i32 = 3;
pub const CORRECT_OUTCOME_POINTS: i32 = 1;
pub const MAX_PREDICTED_GOALS: i32 = 20;

/// Result bucket of a scored prediction.
///
/// `CorrectOutcome` is the "right winner (or draw), wrong score" bucket.
/// Aggregated counts of it are exposed to clients under the `draws` key.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PredictionResult {
    Win,
    CorrectOutcome,
    Loss,
}

impl PredictionResult {
    pub fn points(&self) -> i32 {
        match self {
            PredictionResult::Win => EXACT_SCORE_POINTS,
            PredictionResult::CorrectOutcome => CORRECT_OUTCOME_POINTS,
            PredictionResult::Loss => 0,
        }
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Prediction {
    pub id: Uuid,
    pub league_id: Uuid,
    pub user_id: Uuid,
    pub fixture_id: Uuid,
    pub home_team_score: i32,
    pub away_team_score: i32,
    pub result: Option<PredictionResult>,
    pub points: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Prediction {
    pub fn scoreline(&self) -> Scoreline {
        Scoreline::new(self.home_team_score, self.away_team_score)
    }
}

/// Prediction joined with its fixture and the member's league display name
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct LeaguePredictionView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub display_name: String,
    pub fixture_id: Uuid,
    pub fixture_round: i32,
    pub home_team: String,
    pub away_team: String,
    pub kickoff: DateTime<Utc>,
    pub home_team_score: i32,
    pub away_team_score: i32,
    pub actual_home_score: Option<i32>,
    pub actual_away_score: Option<i32>,
    pub result: Option<PredictionResult>,
    pub points: Option<i32>,
}

// Request/Response DTOs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubmitPredictionRequest {
    pub fixture_id: Uuid,
    pub home_team_score: i32,
    pub away_team_score: i32,
    #[serde(default)]
    pub league_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdatePredictionScoreRequest {
    pub home_team_score: i32,
    pub away_team_score: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionsQuery {
    pub league_id: Option<Uuid>,
}

/// Counts returned by a scoring pass
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CheckResultsSummary {
    pub results_updated: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub fixtures_not_found: u32,
    pub fixtures_no_scores: u32,
}

impl CheckResultsSummary {
    pub fn record(&mut self, result: PredictionResult) {
        match result {
            PredictionResult::Win => self.wins += 1,
            PredictionResult::CorrectOutcome => self.draws += 1,
            PredictionResult::Loss => self.losses += 1,
        }
    }
}

impl fmt::Display for CheckResultsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "updated={} W/D/L={}/{}/{} not_found={} no_scores={}",
            self.results_updated, self.wins, self.draws, self.losses,
            self.fixtures_not_found, self.fixtures_no_scores
        )
    }
}
