use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::league::{
    League, LeaderboardScope, LeagueMembership, LeagueRole, MemberSummary, OpenLeagueSummary,
};

const LEAGUE_COLUMNS: &str = r#"
    id, name, is_open, invite_code, leaderboard_scope, created_by, created_at, updated_at
"#;

const MEMBERSHIP_COLUMNS: &str = r#"
    user_id, league_id, display_name, role, joined_at,
    backfill_wins, backfill_draws, backfill_losses, backfill_points
"#;

pub async fn get_league<'e, E: PgExecutor<'e>>(
    executor: E,
    league_id: Uuid,
) -> Result<Option<League>, sqlx::Error> {
    sqlx::query_as::<_, League>(&format!("SELECT {} FROM leagues WHERE id = $1", LEAGUE_COLUMNS))
        .bind(league_id)
        .fetch_optional(executor)
        .await
}

pub async fn find_league_by_invite_code<'e, E: PgExecutor<'e>>(
    executor: E,
    invite_code: &str,
) -> Result<Option<League>, sqlx::Error> {
    sqlx::query_as::<_, League>(&format!("SELECT {} FROM leagues WHERE invite_code = $1", LEAGUE_COLUMNS))
        .bind(invite_code)
        .fetch_optional(executor)
        .await
}

pub async fn leagues_for_user<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
) -> Result<Vec<League>, sqlx::Error> {
    sqlx::query_as::<_, League>(&format!(
        r#"
        SELECT {} FROM leagues
        WHERE id IN (SELECT league_id FROM league_memberships WHERE user_id = $1)
        ORDER BY created_at, id
        "#,
        LEAGUE_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Open leagues the user is not already in, filtered by a name fragment.
/// `search` is a LIKE-escaped fragment.
pub async fn open_leagues<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    search: Option<&str>,
) -> Result<Vec<OpenLeagueSummary>, sqlx::Error> {
    sqlx::query_as::<_, OpenLeagueSummary>(
        r#"
        SELECT l.id, l.name, COUNT(lm.user_id) AS member_count, l.leaderboard_scope
        FROM leagues l
        LEFT JOIN league_memberships lm ON lm.league_id = l.id
        WHERE l.is_open
          AND ($2::TEXT IS NULL OR l.name ILIKE '%' || $2 || '%' ESCAPE '\')
          AND NOT EXISTS (
              SELECT 1 FROM league_memberships mine
              WHERE mine.league_id = l.id AND mine.user_id = $1
          )
        GROUP BY l.id, l.name, l.leaderboard_scope
        ORDER BY l.name, l.id
        LIMIT 50
        "#,
    )
    .bind(user_id)
    .bind(search)
    .fetch_all(executor)
    .await
}

pub async fn insert_league<'e, E: PgExecutor<'e>>(
    executor: E,
    name: &str,
    is_open: bool,
    invite_code: &str,
    scope: LeaderboardScope,
    created_by: Uuid,
) -> Result<League, sqlx::Error> {
    sqlx::query_as::<_, League>(&format!(
        r#"
        INSERT INTO leagues (id, name, is_open, invite_code, leaderboard_scope, created_by)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {}
        "#,
        LEAGUE_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(is_open)
    .bind(invite_code)
    .bind(scope)
    .bind(created_by)
    .fetch_one(executor)
    .await
}

pub async fn update_league<'e, E: PgExecutor<'e>>(
    executor: E,
    league_id: Uuid,
    name: Option<&str>,
    is_open: Option<bool>,
    scope: Option<LeaderboardScope>,
) -> Result<League, sqlx::Error> {
    sqlx::query_as::<_, League>(&format!(
        r#"
        UPDATE leagues
        SET name = COALESCE($2, name),
            is_open = COALESCE($3, is_open),
            leaderboard_scope = COALESCE($4, leaderboard_scope),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        LEAGUE_COLUMNS
    ))
    .bind(league_id)
    .bind(name)
    .bind(is_open)
    .bind(scope)
    .fetch_one(executor)
    .await
}

pub async fn insert_membership<'e, E: PgExecutor<'e>>(
    executor: E,
    league_id: Uuid,
    user_id: Uuid,
    display_name: &str,
    role: LeagueRole,
) -> Result<LeagueMembership, sqlx::Error> {
    sqlx::query_as::<_, LeagueMembership>(&format!(
        r#"
        INSERT INTO league_memberships (user_id, league_id, display_name, role)
        VALUES ($1, $2, $3, $4)
        RETURNING {}
        "#,
        MEMBERSHIP_COLUMNS
    ))
    .bind(user_id)
    .bind(league_id)
    .bind(display_name)
    .bind(role)
    .fetch_one(executor)
    .await
}

pub async fn get_membership<'e, E: PgExecutor<'e>>(
    executor: E,
    league_id: Uuid,
    user_id: Uuid,
) -> Result<Option<LeagueMembership>, sqlx::Error> {
    sqlx::query_as::<_, LeagueMembership>(&format!(
        "SELECT {} FROM league_memberships WHERE league_id = $1 AND user_id = $2",
        MEMBERSHIP_COLUMNS
    ))
    .bind(league_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn memberships_for_league<'e, E: PgExecutor<'e>>(
    executor: E,
    league_id: Uuid,
) -> Result<Vec<LeagueMembership>, sqlx::Error> {
    sqlx::query_as::<_, LeagueMembership>(&format!(
        "SELECT {} FROM league_memberships WHERE league_id = $1",
        MEMBERSHIP_COLUMNS
    ))
    .bind(league_id)
    .fetch_all(executor)
    .await
}

pub async fn memberships_for_user<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
) -> Result<Vec<LeagueMembership>, sqlx::Error> {
    sqlx::query_as::<_, LeagueMembership>(&format!(
        "SELECT {} FROM league_memberships WHERE user_id = $1",
        MEMBERSHIP_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Members of a league with their account email, for league listings
pub async fn member_summaries<'e, E: PgExecutor<'e>>(
    executor: E,
    league_id: Uuid,
) -> Result<Vec<MemberSummary>, sqlx::Error> {
    sqlx::query_as::<_, MemberSummary>(
        r#"
        SELECT lm.user_id, lm.display_name, u.email, lm.role, lm.joined_at
        FROM league_memberships lm
        JOIN users u ON u.id = lm.user_id
        WHERE lm.league_id = $1
        ORDER BY lm.joined_at, lm.display_name
        "#,
    )
    .bind(league_id)
    .fetch_all(executor)
    .await
}
