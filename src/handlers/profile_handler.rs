use actix_web::{web, HttpResponse, Result};
use secrecy::ExposeSecret;
use serde_json::json;
use sqlx::PgPool;

use crate::db::helpers::require_record;
use crate::db::users::{find_credentials_by_id, get_user_profile, update_account};
use crate::handlers::caller_id;
use crate::handlers::registration_handler::normalize_email;
use crate::league::error::conflict_on_unique;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::user::UpdateAccountRequest;
use crate::ok_or_return;
use crate::utils::password::{hash_password, verify_password, MIN_PASSWORD_CHARS};

/// The user behind the bearer token
#[tracing::instrument(
    name = "Get authorized user",
    skip(pool, claims),
    fields(email = %claims.email)
)]
pub async fn get_authorized_user(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(caller_id(&claims));
    let profile = ok_or_return!(require_record(
        get_user_profile(pool.get_ref(), user_id).await,
        "User not found"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success("Authorized", profile)))
}

/// Change the caller's email, username or password after re-checking the
/// current password
#[tracing::instrument(
    name = "Update account",
    skip(pool, claims, request),
    fields(email = %claims.email)
)]
pub async fn update_current_user(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    request: web::Json<UpdateAccountRequest>,
) -> Result<HttpResponse> {
    let user_id = ok_or_return!(caller_id(&claims));
    let request = request.into_inner();

    if request.current_password.expose_secret().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error("Current password is required")));
    }

    let email = match request.email.as_deref() {
        Some(raw) => match normalize_email(raw) {
            Some(email) => Some(email),
            None => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error("A valid email is required")));
            }
        },
        None => None,
    };

    let password_hash = match &request.new_password {
        Some(new_password) => {
            let new_password = new_password.expose_secret();
            let confirmed = request
                .confirm_password
                .as_ref()
                .is_some_and(|c| c.expose_secret() == new_password);
            if !confirmed {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::<()>::error("New password and confirmation do not match")));
            }
            if new_password.chars().count() < MIN_PASSWORD_CHARS {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_CHARS
                ))));
            }
            match hash_password(new_password) {
                Ok(hash) => Some(hash),
                Err(e) => {
                    tracing::error!("Failed to hash password: {:?}", e);
                    return Ok(HttpResponse::InternalServerError()
                        .json(ApiResponse::<()>::error("Failed to update account")));
                }
            }
        }
        None => None,
    };

    let credentials = ok_or_return!(require_record(
        find_credentials_by_id(pool.get_ref(), user_id).await,
        "User not found"
    ));
    if !verify_password(request.current_password.expose_secret(), &credentials.password_hash) {
        tracing::info!("Rejected account update for {}: wrong current password", user_id);
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error("Current password is incorrect")));
    }

    let username = request.username.as_deref().map(|u| Some(u.trim()).filter(|u| !u.is_empty()));
    let profile = match update_account(
        pool.get_ref(),
        user_id,
        email.as_deref(),
        username,
        password_hash.as_deref(),
    )
    .await
    {
        Ok(profile) => profile,
        Err(e) => return Ok(conflict_on_unique(e, "Email already registered").to_response()),
    };

    tracing::info!(
        "User {} updated account (email: {}, username: {}, password: {})",
        user_id,
        email.is_some(),
        username.is_some(),
        password_hash.is_some()
    );
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Account updated",
        "user": profile
    })))
}
