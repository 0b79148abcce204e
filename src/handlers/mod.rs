use actix_web::HttpResponse;
use uuid::Uuid;

use crate::db::helpers::DbResult;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;

pub mod auth_handler;
pub mod backend_health_handler;
pub mod fixture_handler;
pub mod league;
pub mod prediction_handler;
pub mod profile_handler;
pub mod registration_handler;

/// The authenticated caller's user id. The auth middleware already rejects
/// tokens without a valid subject, so this only fails on misrouted requests.
pub fn caller_id(claims: &Claims) -> DbResult<Uuid> {
    claims.user_id().ok_or_else(|| {
        tracing::error!("Token subject is not a user id: {}", claims.sub);
        HttpResponse::Unauthorized().json(ApiResponse::<()>::error("Invalid user ID"))
    })
}
