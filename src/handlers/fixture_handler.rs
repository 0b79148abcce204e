use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::league::fixtures::FixtureService;
use crate::middleware::auth::Claims;
use crate::models::fixture::{FixtureResultRequest, FixturesQuery};

#[tracing::instrument(name = "List fixtures", skip(query, pool), fields(round = ?query.round))]
pub async fn get_fixtures(
    query: web::Query<FixturesQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let fixture_service = FixtureService::new(pool.get_ref().clone());

    match fixture_service.list_fixtures(query.round).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.to_response()),
    }
}

/// Record a final score. Global admins only; the route is behind AdminMiddleware.
#[tracing::instrument(
    name = "Record fixture result",
    skip(result_request, pool, claims),
    fields(
        fixture_id = %fixture_id,
        home_score = %result_request.home_score,
        away_score = %result_request.away_score,
        admin = %claims.email
    )
)]
pub async fn record_fixture_result(
    fixture_id: Uuid,
    result_request: web::Json<FixtureResultRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let fixture_service = FixtureService::new(pool.get_ref().clone());

    match fixture_service.record_result(fixture_id, result_request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Result recorded",
            "data": response
        }))),
        Err(e) => Ok(e.to_response()),
    }
}
