use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{fixtures as fixture_db, leagues as league_db, predictions as prediction_db};
use crate::league::error::LeagueError;
use crate::league::validation::LeagueValidator;
use crate::models::league::{LeaderboardQuery, LeaderboardResponse};
use crate::scoring::rounds::current_round;
use crate::scoring::LeaderboardAggregator;

/// Service responsible for league leaderboards
#[derive(Debug, Clone)]
pub struct StandingsService {
    pool: PgPool,
    aggregator: LeaderboardAggregator,
    validator: LeagueValidator,
}

impl StandingsService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            aggregator: LeaderboardAggregator::new(),
            validator: LeagueValidator::new(),
        }
    }

    /// Compute a league's leaderboard for one of its members.
    ///
    /// Memberships, fixtures and predictions are read in one repeatable-read
    /// transaction so the standings come from a single consistent snapshot.
    pub async fn get_leaderboard(
        &self,
        user_id: Uuid,
        league_id: Uuid,
        query: &LeaderboardQuery,
    ) -> Result<LeaderboardResponse, LeagueError> {
        if let Some(round) = query.round {
            self.validator.validate_round(round)?;
        }

        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let league = league_db::get_league(&mut *tx, league_id)
            .await?
            .ok_or_else(|| LeagueError::NotFound("League not found".to_string()))?;
        let memberships = league_db::memberships_for_league(&mut *tx, league_id).await?;
        if !memberships.iter().any(|m| m.user_id == user_id) {
            return Err(LeagueError::Forbidden("You are not a member of this league".to_string()));
        }
        let fixtures = fixture_db::list_fixtures(&mut *tx, None).await?;
        let predictions = prediction_db::predictions_for_league(&mut *tx, league_id).await?;
        tx.commit().await?;

        let scope = query.scope.unwrap_or(league.leaderboard_scope);
        let current = current_round(&fixtures);
        let shown_round = query.round.or(current);

        let leaderboard = self
            .aggregator
            .build(&memberships, &fixtures, &predictions, scope, shown_round)
            .map_err(|e| {
                tracing::error!("Leaderboard for league {} failed: {}", league_id, e);
                e
            })?;

        tracing::info!(
            "Leaderboard for league {}: {} rows, scope {}, round {:?}",
            league_id,
            leaderboard.len(),
            scope,
            shown_round
        );

        Ok(LeaderboardResponse {
            leaderboard,
            scope,
            current_round: current,
        })
    }
}
