//! Scoring rules exercised through the public library API, no database needed.
use chrono::{Duration, Utc};
use uuid::Uuid;

use fantasy_predictor::models::common::Scoreline;
use fantasy_predictor::models::fixture::Fixture;
use fantasy_predictor::models::prediction::PredictionResult;
use fantasy_predictor::scoring::rounds::current_round;
use fantasy_predictor::scoring::{PredictionScorer, ScoreOutcome, ScoringError};

fn fixture(round: i32, actual: Option<(i32, i32)>) -> Fixture {
    let kickoff = Utc::now() - Duration::days(1);
    Fixture {
        id: Uuid::new_v4(),
        fixture_round: round,
        kickoff,
        home_team: "Arsenal".to_string(),
        away_team: "Chelsea".to_string(),
        actual_home_score: actual.map(|a| a.0),
        actual_away_score: actual.map(|a| a.1),
        is_completed: actual.is_some(),
        created_at: kickoff,
        updated_at: kickoff,
    }
}

#[test]
fn arsenal_two_one_chelsea() {
    let scorer = PredictionScorer::new();
    let played = fixture(1, Some((2, 1)));

    let cases = [
        ((2, 1), PredictionResult::Win, 3),
        ((1, 0), PredictionResult::CorrectOutcome, 1),
        ((3, 2), PredictionResult::CorrectOutcome, 1),
        ((1, 2), PredictionResult::Loss, 0),
        ((1, 1), PredictionResult::Loss, 0),
    ];
    for ((home, away), expected, points) in cases {
        let outcome = scorer.score(Scoreline::new(home, away), &played).unwrap();
        assert_eq!(outcome, ScoreOutcome::Scored(expected), "{}-{}", home, away);
        assert_eq!(outcome.points(), points);
    }
}

#[test]
fn draws_reward_any_draw_pick() {
    let scorer = PredictionScorer::new();
    let played = fixture(1, Some((1, 1)));

    assert_eq!(scorer.score(Scoreline::new(1, 1), &played).unwrap().points(), 3);
    assert_eq!(scorer.score(Scoreline::new(0, 0), &played).unwrap().points(), 1);
    assert_eq!(scorer.score(Scoreline::new(2, 1), &played).unwrap().points(), 0);
}

#[test]
fn unfinished_fixture_stays_pending_and_broken_one_errors() {
    let scorer = PredictionScorer::new();
    let open = fixture(1, None);
    assert_eq!(scorer.score(Scoreline::new(2, 1), &open).unwrap(), ScoreOutcome::Pending);

    let mut broken = fixture(1, Some((2, 1)));
    broken.actual_away_score = None;
    assert_eq!(
        scorer.score(Scoreline::new(2, 1), &broken),
        Err(ScoringError::PartialFixtureScore { fixture_id: broken.id })
    );
}

#[test]
fn current_round_is_lowest_unfinished_round() {
    let fixtures = vec![
        fixture(1, Some((1, 0))),
        fixture(2, None),
        fixture(2, Some((0, 0))),
        fixture(3, None),
    ];
    assert_eq!(current_round(&fixtures), Some(2));
    assert_eq!(current_round(&[]), None);
}
