use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::caller_id;
use crate::league::standings::StandingsService;
use crate::middleware::auth::Claims;
use crate::models::league::LeaderboardQuery;
use crate::ok_or_return;

/// Ranked standings for a league the caller belongs to
#[tracing::instrument(
    name = "Get league leaderboard",
    skip(query, pool, claims),
    fields(league_id = %league_id, query = %query.0, user = %claims.email)
)]
pub async fn get_league_leaderboard(
    league_id: Uuid,
    query: web::Query<LeaderboardQuery>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(caller_id(&claims));
    let standings_service = StandingsService::new(pool.get_ref().clone());

    match standings_service.get_leaderboard(user_id, league_id, &query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.to_response()),
    }
}
