use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::db::users::insert_user;
use crate::models::common::ApiResponse;
use crate::models::user::RegistrationRequest;
use crate::utils::password::{hash_password, MIN_PASSWORD_CHARS};

/// Lowercased, trimmed email, or None when it cannot be an address
pub(crate) fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim().to_lowercase();
    (!email.is_empty() && email.contains('@')).then_some(email)
}

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show arguments
    skip(user_form, pool),
    fields(
        user = %user_form
    )
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>
) -> HttpResponse {
    let Some(email) = normalize_email(&user_form.email) else {
        return HttpResponse::BadRequest().json(ApiResponse::<()>::error("A valid email is required"));
    };
    if user_form.password.expose_secret().chars().count() < MIN_PASSWORD_CHARS {
        return HttpResponse::BadRequest().json(ApiResponse::<()>::error(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_CHARS
        )));
    }

    let password_hash = match hash_password(user_form.password.expose_secret()) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {:?}", e);
            return HttpResponse::InternalServerError().json(ApiResponse::<()>::error("Failed to create user"));
        }
    };

    let username = user_form.username.as_deref().map(str::trim).filter(|u| !u.is_empty());
    match insert_user(pool.get_ref(), &email, username, &password_hash).await {
        Ok(profile) => {
            tracing::info!("Registered user {}", profile.id);
            HttpResponse::Created().json(ApiResponse::success("User registered", profile))
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            HttpResponse::Conflict().json(ApiResponse::<()>::error("Email already registered"))
        }
        Err(e) => {
            tracing::error!("Failed to execute user insert query: {:?}", e);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error("Failed to create user"))
        }
    }
}
