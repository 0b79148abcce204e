use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::fixture::Fixture;

const FIXTURE_COLUMNS: &str = r#"
    id, fixture_round, kickoff, home_team, away_team,
    actual_home_score, actual_away_score, is_completed, created_at, updated_at
"#;

pub async fn get_fixture<'e, E: PgExecutor<'e>>(
    executor: E,
    fixture_id: Uuid,
) -> Result<Option<Fixture>, sqlx::Error> {
    sqlx::query_as::<_, Fixture>(&format!("SELECT {} FROM fixtures WHERE id = $1", FIXTURE_COLUMNS))
        .bind(fixture_id)
        .fetch_optional(executor)
        .await
}

/// All fixtures, or one round's, in kickoff order
pub async fn list_fixtures<'e, E: PgExecutor<'e>>(
    executor: E,
    round: Option<i32>,
) -> Result<Vec<Fixture>, sqlx::Error> {
    sqlx::query_as::<_, Fixture>(&format!(
        r#"
        SELECT {} FROM fixtures
        WHERE ($1::INTEGER IS NULL OR fixture_round = $1)
        ORDER BY kickoff, id
        "#,
        FIXTURE_COLUMNS
    ))
    .bind(round)
    .fetch_all(executor)
    .await
}

pub async fn fixtures_by_ids<'e, E: PgExecutor<'e>>(
    executor: E,
    fixture_ids: &[Uuid],
) -> Result<Vec<Fixture>, sqlx::Error> {
    sqlx::query_as::<_, Fixture>(&format!(
        "SELECT {} FROM fixtures WHERE id = ANY($1)",
        FIXTURE_COLUMNS
    ))
    .bind(fixture_ids)
    .fetch_all(executor)
    .await
}

/// Set the final score and mark the fixture completed
pub async fn record_result<'e, E: PgExecutor<'e>>(
    executor: E,
    fixture_id: Uuid,
    home_score: i32,
    away_score: i32,
) -> Result<Option<Fixture>, sqlx::Error> {
    sqlx::query_as::<_, Fixture>(&format!(
        r#"
        UPDATE fixtures
        SET actual_home_score = $2,
            actual_away_score = $3,
            is_completed = TRUE,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        FIXTURE_COLUMNS
    ))
    .bind(fixture_id)
    .bind(home_score)
    .bind(away_score)
    .fetch_optional(executor)
    .await
}
