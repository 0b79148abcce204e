use thiserror::Error;
use uuid::Uuid;

use crate::models::common::Scoreline;
use crate::models::fixture::Fixture;
use crate::models::prediction::PredictionResult;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Fixture {fixture_id} has only one of its two actual scores recorded")]
    PartialFixtureScore { fixture_id: Uuid },
}

/// Outcome of scoring one prediction against one fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOutcome {
    /// Fixture not completed yet, nothing to award
    Pending,
    Scored(PredictionResult),
}

impl ScoreOutcome {
    pub fn result(&self) -> Option<PredictionResult> {
        match self {
            ScoreOutcome::Pending => None,
            ScoreOutcome::Scored(result) => Some(*result),
        }
    }

    pub fn points(&self) -> i32 {
        self.result().map(|r| r.points()).unwrap_or(0)
    }
}

/// The fixture's final score, if it has one.
///
/// A fixture with exactly one actual score set is an upstream data error.
/// A fixture carrying both scores but not flagged complete is still in play.
pub fn final_score(fixture: &Fixture) -> Result<Option<Scoreline>, ScoringError> {
    match (fixture.actual_home_score, fixture.actual_away_score) {
        (Some(home), Some(away)) if fixture.is_completed => Ok(Some(Scoreline::new(home, away))),
        (Some(_), Some(_)) | (None, None) => Ok(None),
        _ => Err(ScoringError::PartialFixtureScore { fixture_id: fixture.id }),
    }
}

/// Maps a predicted scoreline and a fixture to a result and point value
#[derive(Debug, Default, Clone, Copy)]
pub struct PredictionScorer;

impl PredictionScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, predicted: Scoreline, fixture: &Fixture) -> Result<ScoreOutcome, ScoringError> {
        Ok(match final_score(fixture)? {
            Some(actual) => ScoreOutcome::Scored(Self::classify(predicted, actual)),
            None => ScoreOutcome::Pending,
        })
    }

    /// A member who never picked a completed fixture takes a loss
    pub fn score_missing(&self, fixture: &Fixture) -> Result<ScoreOutcome, ScoringError> {
        Ok(match final_score(fixture)? {
            Some(_) => ScoreOutcome::Scored(PredictionResult::Loss),
            None => ScoreOutcome::Pending,
        })
    }

    pub fn classify(predicted: Scoreline, actual: Scoreline) -> PredictionResult {
        if predicted == actual {
            PredictionResult::Win
        } else if predicted.outcome() == actual.outcome() {
            PredictionResult::CorrectOutcome
        } else {
            PredictionResult::Loss
        }
    }
}
