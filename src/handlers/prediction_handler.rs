use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;

use crate::handlers::caller_id;
use crate::league::predictions::PredictionService;
use crate::middleware::auth::Claims;
use crate::models::prediction::{PredictionsQuery, SubmitPredictionRequest};
use crate::ok_or_return;

#[tracing::instrument(
    name = "Submit prediction",
    skip(prediction_request, pool, claims),
    fields(
        fixture_id = %prediction_request.fixture_id,
        league_id = ?prediction_request.league_id,
        user = %claims.email
    )
)]
pub async fn submit_prediction(
    prediction_request: web::Json<SubmitPredictionRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(caller_id(&claims));
    let prediction_service = PredictionService::new(pool.get_ref().clone());

    match prediction_service.submit(user_id, prediction_request.into_inner()).await {
        Ok(predictions) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Prediction saved",
            "data": predictions
        }))),
        Err(e) => Ok(e.to_response()),
    }
}

#[tracing::instrument(name = "List my predictions", skip(query, pool, claims), fields(league_id = ?query.league_id, user = %claims.email))]
pub async fn get_my_predictions(
    query: web::Query<PredictionsQuery>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(caller_id(&claims));
    let prediction_service = PredictionService::new(pool.get_ref().clone());

    match prediction_service.list_for_user(user_id, query.league_id).await {
        Ok(predictions) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": predictions,
            "total_count": predictions.len()
        }))),
        Err(e) => Ok(e.to_response()),
    }
}

/// Run a scoring pass over the caller's predictions, or everyone's for a global admin
#[tracing::instrument(name = "Check prediction results", skip(pool, claims), fields(user = %claims.email, admin = %claims.is_admin()))]
pub async fn check_results(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(caller_id(&claims));
    let prediction_service = PredictionService::new(pool.get_ref().clone());

    match prediction_service.check_results(user_id, claims.is_admin()).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": summary.to_string(),
            "data": summary
        }))),
        Err(e) => Ok(e.to_response()),
    }
}
