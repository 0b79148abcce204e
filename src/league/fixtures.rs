use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{fixtures as fixture_db, predictions as prediction_db};
use crate::league::error::LeagueError;
use crate::league::predictions::persist_scores;
use crate::league::validation::LeagueValidator;
use crate::models::fixture::{FixtureResultRequest, FixtureResultResponse, FixturesResponse};
use crate::scoring::rounds::current_round;
use crate::scoring::ScoringPass;

/// Service for reading fixtures and recording final scores
#[derive(Debug, Clone)]
pub struct FixtureService {
    pool: PgPool,
    pass: ScoringPass,
    validator: LeagueValidator,
}

impl FixtureService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            pass: ScoringPass::new(),
            validator: LeagueValidator::new(),
        }
    }

    /// Fixtures in kickoff order, optionally for one round, plus the round
    /// currently in play across the whole schedule
    pub async fn list_fixtures(&self, round: Option<i32>) -> Result<FixturesResponse, LeagueError> {
        if let Some(round) = round {
            self.validator.validate_round(round)?;
        }

        let all = fixture_db::list_fixtures(&self.pool, None).await?;
        let current_round = current_round(&all);
        let fixtures = match round {
            Some(round) => all.into_iter().filter(|f| f.fixture_round == round).collect(),
            None => all,
        };

        Ok(FixturesResponse { fixtures, current_round })
    }

    /// Record a final score and rescore every prediction on the fixture
    pub async fn record_result(
        &self,
        fixture_id: Uuid,
        request: FixtureResultRequest,
    ) -> Result<FixtureResultResponse, LeagueError> {
        self.validator
            .validate_result_scores(request.home_score, request.away_score)?;

        let mut tx = self.pool.begin().await?;

        let fixture = fixture_db::record_result(&mut *tx, fixture_id, request.home_score, request.away_score)
            .await?
            .ok_or_else(|| LeagueError::NotFound("Fixture not found".to_string()))?;

        let predictions = prediction_db::predictions_for_fixture(&mut *tx, fixture_id).await?;
        let plan = persist_scores(&mut tx, &self.pass, &predictions, std::slice::from_ref(&fixture)).await?;
        tx.commit().await?;

        let predictions_scored = (plan.summary.wins + plan.summary.draws + plan.summary.losses) as usize;
        tracing::info!(
            "Recorded {} {}-{} {} for fixture {}; scored {} prediction(s), {} changed",
            fixture.home_team,
            request.home_score,
            request.away_score,
            fixture.away_team,
            fixture_id,
            predictions_scored,
            plan.summary.results_updated
        );

        Ok(FixtureResultResponse { fixture, predictions_scored })
    }
}
