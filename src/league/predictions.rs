use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::db::{fixtures as fixture_db, leagues as league_db, predictions as prediction_db};
use crate::league::error::LeagueError;
use crate::league::league::LeagueService;
use crate::league::validation::LeagueValidator;
use crate::models::fixture::Fixture;
use crate::models::prediction::*;
use crate::scoring::{ScoringPass, ScoringPlan};

/// Service for submitting, editing and scoring predictions
#[derive(Debug, Clone)]
pub struct PredictionService {
    pool: PgPool,
    leagues: LeagueService,
    pass: ScoringPass,
    validator: LeagueValidator,
}

impl PredictionService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            leagues: LeagueService::new(pool.clone()),
            pool,
            pass: ScoringPass::new(),
            validator: LeagueValidator::new(),
        }
    }

    /// Upsert the caller's pick for a fixture.
    ///
    /// Without a league the pick is stored in every league the caller
    /// belongs to. Picks lock at kickoff.
    pub async fn submit(
        &self,
        user_id: Uuid,
        request: SubmitPredictionRequest,
    ) -> Result<Vec<Prediction>, LeagueError> {
        self.validator
            .validate_prediction_scores(request.home_team_score, request.away_team_score)?;

        let fixture = fixture_db::get_fixture(&self.pool, request.fixture_id)
            .await?
            .ok_or_else(|| LeagueError::NotFound("Fixture not found".to_string()))?;

        if fixture.has_kicked_off(Utc::now()) {
            tracing::info!("Rejected prediction from {} for fixture {} after kickoff", user_id, fixture.id);
            return Err(LeagueError::PredictionLocked);
        }

        let league_ids = match request.league_id {
            Some(league_id) => {
                self.leagues.require_membership(league_id, user_id).await?;
                vec![league_id]
            }
            None => {
                let memberships = league_db::memberships_for_user(&self.pool, user_id).await?;
                if memberships.is_empty() {
                    return Err(LeagueError::Forbidden("Join a league before making predictions".to_string()));
                }
                memberships.into_iter().map(|m| m.league_id).collect()
            }
        };

        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(league_ids.len());
        for league_id in league_ids {
            let prediction = prediction_db::upsert_prediction(
                &mut *tx,
                league_id,
                user_id,
                fixture.id,
                request.home_team_score,
                request.away_team_score,
            )
            .await?;
            saved.push(prediction);
        }
        tx.commit().await?;

        tracing::info!(
            "User {} predicted {}-{} for fixture {} in {} league(s)",
            user_id,
            request.home_team_score,
            request.away_team_score,
            fixture.id,
            saved.len()
        );
        Ok(saved)
    }

    pub async fn list_for_user(&self, user_id: Uuid, league_id: Option<Uuid>) -> Result<Vec<Prediction>, LeagueError> {
        Ok(prediction_db::predictions_for_user(&self.pool, user_id, league_id).await?)
    }

    /// All member predictions in a league. League admins only.
    pub async fn league_games(&self, user_id: Uuid, league_id: Uuid) -> Result<Vec<LeaguePredictionView>, LeagueError> {
        self.leagues.require_league_admin(league_id, user_id).await?;
        Ok(prediction_db::league_prediction_views(&self.pool, league_id).await?)
    }

    /// League admin correction of a member's pick. Not subject to the
    /// kickoff lock, and rescored straight away if the fixture is final.
    pub async fn admin_update(
        &self,
        user_id: Uuid,
        league_id: Uuid,
        prediction_id: Uuid,
        request: UpdatePredictionScoreRequest,
    ) -> Result<Prediction, LeagueError> {
        self.leagues.require_league_admin(league_id, user_id).await?;
        self.validator
            .validate_prediction_scores(request.home_team_score, request.away_team_score)?;

        let mut tx = self.pool.begin().await?;

        let existing = prediction_db::get_prediction(&mut *tx, prediction_id)
            .await?
            .filter(|p| p.league_id == league_id)
            .ok_or_else(|| LeagueError::NotFound("Prediction not found in this league".to_string()))?;

        let edited = prediction_db::update_prediction_scores(
            &mut *tx,
            existing.id,
            request.home_team_score,
            request.away_team_score,
        )
        .await?;

        let fixtures: Vec<Fixture> = fixture_db::get_fixture(&mut *tx, edited.fixture_id)
            .await?
            .into_iter()
            .collect();
        persist_scores(&mut tx, &self.pass, std::slice::from_ref(&edited), &fixtures).await?;

        let updated = prediction_db::get_prediction(&mut *tx, edited.id)
            .await?
            .ok_or_else(|| LeagueError::NotFound("Prediction not found".to_string()))?;
        tx.commit().await?;

        tracing::info!(
            "League admin {} set prediction {} to {}-{} ({:?})",
            user_id,
            prediction_id,
            updated.home_team_score,
            updated.away_team_score,
            updated.result
        );
        Ok(updated)
    }

    /// Score every stored prediction whose fixture has a final result.
    /// Global admins score everyone's predictions, other users only their own.
    pub async fn check_results(&self, user_id: Uuid, is_admin: bool) -> Result<CheckResultsSummary, LeagueError> {
        let mut tx = self.pool.begin().await?;

        let predictions = if is_admin {
            prediction_db::all_predictions(&mut *tx).await?
        } else {
            prediction_db::predictions_for_user(&mut *tx, user_id, None).await?
        };

        let mut fixture_ids: Vec<Uuid> = predictions.iter().map(|p| p.fixture_id).collect();
        fixture_ids.sort_unstable();
        fixture_ids.dedup();
        let fixtures = fixture_db::fixtures_by_ids(&mut *tx, &fixture_ids).await?;

        let plan = persist_scores(&mut tx, &self.pass, &predictions, &fixtures).await?;
        tx.commit().await?;

        tracing::info!("Scoring pass for {} (admin: {}): {}", user_id, is_admin, plan.summary);
        Ok(plan.summary)
    }
}

/// Plan a scoring pass and write its updates on the given connection
pub(crate) async fn persist_scores(
    conn: &mut PgConnection,
    pass: &ScoringPass,
    predictions: &[Prediction],
    fixtures: &[Fixture],
) -> Result<ScoringPlan, LeagueError> {
    let plan = pass.plan(predictions, fixtures).map_err(|e| {
        tracing::error!("Scoring pass aborted: {}", e);
        e
    })?;
    prediction_db::apply_score_updates(conn, &plan.updates).await?;
    Ok(plan)
}
