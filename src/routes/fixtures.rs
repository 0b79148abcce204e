use actix_web::{get, put, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::fixture_handler;
use crate::middleware::admin::AdminMiddleware;
use crate::middleware::auth::Claims;
use crate::models::fixture::{FixtureResultRequest, FixturesQuery};

/// Fixtures, optionally one round, with the current round
#[get("")]
async fn get_fixtures(
    query: web::Query<FixturesQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    fixture_handler::get_fixtures(query, pool).await
}

#[put("/{fixture_id}/result", wrap = "AdminMiddleware")]
async fn record_fixture_result(
    path: web::Path<Uuid>,
    result_request: web::Json<FixtureResultRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let fixture_id = path.into_inner();
    fixture_handler::record_fixture_result(fixture_id, result_request, pool, claims).await
}
