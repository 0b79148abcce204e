use actix_web::{get, post, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::prediction_handler;
use crate::middleware::auth::Claims;
use crate::models::prediction::{PredictionsQuery, SubmitPredictionRequest};

#[get("")]
async fn get_my_predictions(
    query: web::Query<PredictionsQuery>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    prediction_handler::get_my_predictions(query, pool, claims).await
}

#[post("")]
async fn submit_prediction(
    prediction_request: web::Json<SubmitPredictionRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    prediction_handler::submit_prediction(prediction_request, pool, claims).await
}

#[post("/check-results")]
async fn check_results(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    prediction_handler::check_results(pool, claims).await
}
