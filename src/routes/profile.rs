use actix_web::{get, patch, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::profile_handler::{get_authorized_user, update_current_user};
use crate::middleware::auth::{AuthMiddleware, Claims};
use crate::models::user::UpdateAccountRequest;

/// The user behind the bearer token
#[get("/authorized", wrap = "AuthMiddleware")]
async fn authorized(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    get_authorized_user(pool, claims).await
}

#[patch("/users/me", wrap = "AuthMiddleware")]
async fn update_account(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    request: web::Json<UpdateAccountRequest>,
) -> Result<HttpResponse> {
    update_current_user(pool, claims, request).await
}
