use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::caller_id;
use crate::league::league::LeagueService;
use crate::middleware::auth::Claims;
use crate::models::league::*;
use crate::ok_or_return;

/// Create a league; the caller becomes its admin
#[tracing::instrument(
    name = "Create league",
    skip(league_request, pool, claims),
    fields(
        league_name = %league_request.name,
        user = %claims.email
    )
)]
pub async fn create_league(
    league_request: web::Json<CreateLeagueRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(caller_id(&claims));
    let league_service = LeagueService::new(pool.get_ref().clone());

    match league_service.create_league(user_id, league_request.into_inner()).await {
        Ok(league) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "message": "League created successfully",
            "data": league
        }))),
        Err(e) => {
            tracing::warn!("Failed to create league: {}", e);
            Ok(e.to_response())
        }
    }
}

#[tracing::instrument(name = "List my leagues", skip(pool, claims), fields(user = %claims.email))]
pub async fn get_my_leagues(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(caller_id(&claims));
    let league_service = LeagueService::new(pool.get_ref().clone());

    match league_service.leagues_for_user(user_id).await {
        Ok(leagues) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": leagues,
            "total_count": leagues.len()
        }))),
        Err(e) => Ok(e.to_response()),
    }
}

/// Search open leagues by name
#[tracing::instrument(name = "Search open leagues", skip(query, pool, claims), fields(q = ?query.q))]
pub async fn search_open_leagues(
    query: web::Query<OpenLeaguesQuery>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(caller_id(&claims));
    let league_service = LeagueService::new(pool.get_ref().clone());

    match league_service.open_leagues(user_id, query.q.as_deref()).await {
        Ok(leagues) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": leagues
        }))),
        Err(e) => Ok(e.to_response()),
    }
}

#[tracing::instrument(name = "Join league by invite code", skip(join_request, pool, claims), fields(user = %claims.email))]
pub async fn join_league_by_code(
    join_request: web::Json<JoinByCodeRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(caller_id(&claims));
    let league_service = LeagueService::new(pool.get_ref().clone());

    match league_service.join_by_code(user_id, join_request.into_inner()).await {
        Ok(league) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Joined league",
            "data": league
        }))),
        Err(e) => Ok(e.to_response()),
    }
}

#[tracing::instrument(name = "Join open league", skip(join_request, pool, claims), fields(league_id = %league_id, user = %claims.email))]
pub async fn join_open_league(
    league_id: Uuid,
    join_request: web::Json<JoinLeagueRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(caller_id(&claims));
    let league_service = LeagueService::new(pool.get_ref().clone());

    match league_service.join_open_league(user_id, league_id, join_request.into_inner()).await {
        Ok(league) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Joined league",
            "data": league
        }))),
        Err(e) => Ok(e.to_response()),
    }
}

/// Rename a league or change its visibility and scope. League admins only.
#[tracing::instrument(name = "Update league", skip(update_request, pool, claims), fields(league_id = %league_id, user = %claims.email))]
pub async fn update_league(
    league_id: Uuid,
    update_request: web::Json<UpdateLeagueRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(caller_id(&claims));
    let league_service = LeagueService::new(pool.get_ref().clone());

    match league_service.update_league(user_id, league_id, update_request.into_inner()).await {
        Ok(league) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "League updated successfully",
            "data": league
        }))),
        Err(e) => Ok(e.to_response()),
    }
}
