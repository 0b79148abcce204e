use std::collections::HashMap;
use uuid::Uuid;

use crate::models::fixture::Fixture;
use crate::models::prediction::{CheckResultsSummary, Prediction, PredictionResult};
use crate::scoring::scorer::{PredictionScorer, ScoreOutcome, ScoringError};

/// A stored prediction whose result or points must be rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub prediction_id: Uuid,
    pub result: PredictionResult,
    pub points: i32,
}

#[derive(Debug, Default)]
pub struct ScoringPlan {
    pub updates: Vec<ScoreUpdate>,
    pub summary: CheckResultsSummary,
}

/// Works out which stored predictions are unscored or stale.
///
/// Every prediction on a completed fixture is rescored from scratch, so
/// running the pass twice changes nothing the second time.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoringPass {
    scorer: PredictionScorer,
}

impl ScoringPass {
    pub fn new() -> Self {
        Self { scorer: PredictionScorer::new() }
    }

    pub fn plan(&self, predictions: &[Prediction], fixtures: &[Fixture]) -> Result<ScoringPlan, ScoringError> {
        let fixtures_by_id: HashMap<Uuid, &Fixture> = fixtures.iter().map(|f| (f.id, f)).collect();
        let mut plan = ScoringPlan::default();

        for prediction in predictions {
            let Some(fixture) = fixtures_by_id.get(&prediction.fixture_id) else {
                plan.summary.fixtures_not_found += 1;
                continue;
            };

            match self.scorer.score(prediction.scoreline(), fixture)? {
                ScoreOutcome::Pending => plan.summary.fixtures_no_scores += 1,
                ScoreOutcome::Scored(result) => {
                    plan.summary.record(result);
                    let points = result.points();
                    if prediction.result != Some(result) || prediction.points != Some(points) {
                        plan.updates.push(ScoreUpdate {
                            prediction_id: prediction.id,
                            result,
                            points,
                        });
                    }
                }
            }
        }

        plan.summary.results_updated = plan.updates.len() as u32;
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fixture(scores: Option<(i32, i32)>) -> Fixture {
        Fixture {
            id: Uuid::new_v4(),
            fixture_round: 1,
            kickoff: Utc::now(),
            home_team: "Everton".to_string(),
            away_team: "Fulham".to_string(),
            actual_home_score: scores.map(|s| s.0),
            actual_away_score: scores.map(|s| s.1),
            is_completed: scores.is_some(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn prediction(fixture_id: Uuid, home: i32, away: i32) -> Prediction {
        Prediction {
            id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            fixture_id,
            home_team_score: home,
            away_team_score: away,
            result: None,
            points: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_plan_counts_every_bucket() {
        let played = fixture(Some((2, 1)));
        let unplayed = fixture(None);
        let predictions = vec![
            prediction(played.id, 2, 1),
            prediction(played.id, 1, 0),
            prediction(played.id, 0, 0),
            prediction(unplayed.id, 1, 1),
            prediction(Uuid::new_v4(), 1, 1),
        ];

        let plan = ScoringPass::new().plan(&predictions, &[played, unplayed]).unwrap();
        assert_eq!(
            plan.summary,
            CheckResultsSummary {
                results_updated: 3,
                wins: 1,
                draws: 1,
                losses: 1,
                fixtures_not_found: 1,
                fixtures_no_scores: 1,
            }
        );
        assert_eq!(plan.updates[0].points, 3);
        assert_eq!(plan.updates[1].result, PredictionResult::CorrectOutcome);
    }

    #[test]
    fn test_plan_skips_rows_already_up_to_date() {
        let played = fixture(Some((0, 0)));
        let mut current = prediction(played.id, 0, 0);
        current.result = Some(PredictionResult::Win);
        current.points = Some(3);
        let mut stale = prediction(played.id, 1, 1);
        stale.result = Some(PredictionResult::Win);
        stale.points = Some(3);

        let plan = ScoringPass::new().plan(&[current, stale.clone()], &[played]).unwrap();
        assert_eq!(plan.summary.results_updated, 1);
        assert_eq!(plan.summary.wins, 1);
        assert_eq!(plan.summary.draws, 1);
        assert_eq!(
            plan.updates,
            vec![ScoreUpdate { prediction_id: stale.id, result: PredictionResult::CorrectOutcome, points: 1 }]
        );
    }

    #[test]
    fn test_plan_fails_on_partial_fixture() {
        let mut broken = fixture(None);
        broken.actual_away_score = Some(1);
        let predictions = vec![prediction(broken.id, 0, 1)];
        assert!(ScoringPass::new().plan(&predictions, &[broken]).is_err());
    }
}
