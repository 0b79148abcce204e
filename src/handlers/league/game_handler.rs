use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::caller_id;
use crate::league::predictions::PredictionService;
use crate::middleware::auth::Claims;
use crate::models::prediction::UpdatePredictionScoreRequest;
use crate::ok_or_return;

/// Every member prediction in the league. League admins only.
#[tracing::instrument(name = "Get league games", skip(pool, claims), fields(league_id = %league_id, user = %claims.email))]
pub async fn get_league_games(
    league_id: Uuid,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(caller_id(&claims));
    let prediction_service = PredictionService::new(pool.get_ref().clone());

    match prediction_service.league_games(user_id, league_id).await {
        Ok(games) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": games,
            "total_count": games.len()
        }))),
        Err(e) => Ok(e.to_response()),
    }
}

/// League admin correction of one member prediction
#[tracing::instrument(
    name = "Admin update prediction",
    skip(update_request, pool, claims),
    fields(
        league_id = %league_id,
        prediction_id = %prediction_id,
        home = %update_request.home_team_score,
        away = %update_request.away_team_score,
        user = %claims.email
    )
)]
pub async fn update_league_game(
    league_id: Uuid,
    prediction_id: Uuid,
    update_request: web::Json<UpdatePredictionScoreRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(caller_id(&claims));
    let prediction_service = PredictionService::new(pool.get_ref().clone());

    match prediction_service
        .admin_update(user_id, league_id, prediction_id, update_request.into_inner())
        .await
    {
        Ok(prediction) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Prediction updated",
            "data": prediction
        }))),
        Err(e) => Ok(e.to_response()),
    }
}
