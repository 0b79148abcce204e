use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::models::prediction::{LeaguePredictionView, Prediction};
use crate::scoring::ScoreUpdate;

const PREDICTION_COLUMNS: &str = r#"
    id, league_id, user_id, fixture_id, home_team_score, away_team_score,
    result, points, created_at, updated_at
"#;

pub async fn get_prediction<'e, E: PgExecutor<'e>>(
    executor: E,
    prediction_id: Uuid,
) -> Result<Option<Prediction>, sqlx::Error> {
    sqlx::query_as::<_, Prediction>(&format!("SELECT {} FROM predictions WHERE id = $1", PREDICTION_COLUMNS))
        .bind(prediction_id)
        .fetch_optional(executor)
        .await
}

/// A user's predictions, optionally limited to one league
pub async fn predictions_for_user<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    league_id: Option<Uuid>,
) -> Result<Vec<Prediction>, sqlx::Error> {
    sqlx::query_as::<_, Prediction>(&format!(
        r#"
        SELECT {} FROM predictions
        WHERE user_id = $1 AND ($2::UUID IS NULL OR league_id = $2)
        ORDER BY created_at, id
        "#,
        PREDICTION_COLUMNS
    ))
    .bind(user_id)
    .bind(league_id)
    .fetch_all(executor)
    .await
}

pub async fn all_predictions<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Prediction>, sqlx::Error> {
    sqlx::query_as::<_, Prediction>(&format!("SELECT {} FROM predictions ORDER BY created_at, id", PREDICTION_COLUMNS))
        .fetch_all(executor)
        .await
}

pub async fn predictions_for_league<'e, E: PgExecutor<'e>>(
    executor: E,
    league_id: Uuid,
) -> Result<Vec<Prediction>, sqlx::Error> {
    sqlx::query_as::<_, Prediction>(&format!("SELECT {} FROM predictions WHERE league_id = $1", PREDICTION_COLUMNS))
        .bind(league_id)
        .fetch_all(executor)
        .await
}

pub async fn predictions_for_fixture<'e, E: PgExecutor<'e>>(
    executor: E,
    fixture_id: Uuid,
) -> Result<Vec<Prediction>, sqlx::Error> {
    sqlx::query_as::<_, Prediction>(&format!("SELECT {} FROM predictions WHERE fixture_id = $1", PREDICTION_COLUMNS))
        .bind(fixture_id)
        .fetch_all(executor)
        .await
}

/// Every member prediction in a league with its fixture, for the admin view
pub async fn league_prediction_views<'e, E: PgExecutor<'e>>(
    executor: E,
    league_id: Uuid,
) -> Result<Vec<LeaguePredictionView>, sqlx::Error> {
    sqlx::query_as::<_, LeaguePredictionView>(
        r#"
        SELECT
            p.id,
            p.user_id,
            lm.display_name,
            p.fixture_id,
            f.fixture_round,
            f.home_team,
            f.away_team,
            f.kickoff,
            p.home_team_score,
            p.away_team_score,
            f.actual_home_score,
            f.actual_away_score,
            p.result,
            p.points
        FROM predictions p
        JOIN league_memberships lm ON lm.league_id = p.league_id AND lm.user_id = p.user_id
        JOIN fixtures f ON f.id = p.fixture_id
        WHERE p.league_id = $1
        ORDER BY f.kickoff, lm.display_name
        "#,
    )
    .bind(league_id)
    .fetch_all(executor)
    .await
}

/// Insert or replace a member's pick. A new pick is always pending again.
pub async fn upsert_prediction<'e, E: PgExecutor<'e>>(
    executor: E,
    league_id: Uuid,
    user_id: Uuid,
    fixture_id: Uuid,
    home_team_score: i32,
    away_team_score: i32,
) -> Result<Prediction, sqlx::Error> {
    sqlx::query_as::<_, Prediction>(&format!(
        r#"
        INSERT INTO predictions (id, league_id, user_id, fixture_id, home_team_score, away_team_score)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (league_id, user_id, fixture_id) DO UPDATE SET
            home_team_score = EXCLUDED.home_team_score,
            away_team_score = EXCLUDED.away_team_score,
            result = NULL,
            points = NULL,
            updated_at = NOW()
        RETURNING {}
        "#,
        PREDICTION_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(league_id)
    .bind(user_id)
    .bind(fixture_id)
    .bind(home_team_score)
    .bind(away_team_score)
    .fetch_one(executor)
    .await
}

pub async fn update_prediction_scores<'e, E: PgExecutor<'e>>(
    executor: E,
    prediction_id: Uuid,
    home_team_score: i32,
    away_team_score: i32,
) -> Result<Prediction, sqlx::Error> {
    sqlx::query_as::<_, Prediction>(&format!(
        r#"
        UPDATE predictions
        SET home_team_score = $2,
            away_team_score = $3,
            result = NULL,
            points = NULL,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        PREDICTION_COLUMNS
    ))
    .bind(prediction_id)
    .bind(home_team_score)
    .bind(away_team_score)
    .fetch_one(executor)
    .await
}

/// Persist computed results. Runs inside the caller's transaction.
pub async fn apply_score_updates(
    conn: &mut PgConnection,
    updates: &[ScoreUpdate],
) -> Result<(), sqlx::Error> {
    for update in updates {
        sqlx::query(
            r#"
            UPDATE predictions
            SET result = $2, points = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(update.prediction_id)
        .bind(update.result)
        .bind(update.points)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
