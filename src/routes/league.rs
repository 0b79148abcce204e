// src/routes/league.rs
use actix_web::{get, patch, post, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::league::{game_handler, leaderboard_handler, league_handler};
use crate::middleware::auth::Claims;
use crate::models::league::*;
use crate::models::prediction::UpdatePredictionScoreRequest;

/// Leagues the caller belongs to
#[get("")]
async fn get_my_leagues(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    league_handler::get_my_leagues(pool, claims).await
}

#[post("")]
async fn create_league(
    league_request: web::Json<CreateLeagueRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    league_handler::create_league(league_request, pool, claims).await
}

/// Open leagues, filtered by `?q=`
#[get("/open")]
async fn search_open_leagues(
    query: web::Query<OpenLeaguesQuery>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    league_handler::search_open_leagues(query, pool, claims).await
}

#[post("/join-by-code")]
async fn join_league_by_code(
    join_request: web::Json<JoinByCodeRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    league_handler::join_league_by_code(join_request, pool, claims).await
}

#[post("/{league_id}/join")]
async fn join_open_league(
    path: web::Path<Uuid>,
    join_request: web::Json<JoinLeagueRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let league_id = path.into_inner();
    league_handler::join_open_league(league_id, join_request, pool, claims).await
}

#[patch("/{league_id}")]
async fn update_league(
    path: web::Path<Uuid>,
    update_request: web::Json<UpdateLeagueRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let league_id = path.into_inner();
    league_handler::update_league(league_id, update_request, pool, claims).await
}

/// All member predictions in a league (league admins)
#[get("/{league_id}/games")]
async fn get_league_games(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let league_id = path.into_inner();
    game_handler::get_league_games(league_id, pool, claims).await
}

#[patch("/{league_id}/games/{prediction_id}")]
async fn update_league_game(
    path: web::Path<(Uuid, Uuid)>,
    update_request: web::Json<UpdatePredictionScoreRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let (league_id, prediction_id) = path.into_inner();
    game_handler::update_league_game(league_id, prediction_id, update_request, pool, claims).await
}

#[get("/{league_id}/leaderboard")]
async fn get_league_leaderboard(
    path: web::Path<Uuid>,
    query: web::Query<LeaderboardQuery>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let league_id = path.into_inner();
    leaderboard_handler::get_league_leaderboard(league_id, query, pool, claims).await
}
