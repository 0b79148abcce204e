use actix_web::HttpResponse;
use thiserror::Error;

use crate::models::common::ApiResponse;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Predictions for this fixture are locked since kickoff")]
    PredictionLocked,

    #[error("Scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl LeagueError {
    /// Render the error in the API's JSON envelope.
    /// Internal failures are logged and replaced with a generic message.
    pub fn to_response(&self) -> HttpResponse {
        match self {
            LeagueError::NotFound(msg) => HttpResponse::NotFound().json(ApiResponse::<()>::error(msg.clone())),
            LeagueError::Forbidden(msg) => HttpResponse::Forbidden().json(ApiResponse::<()>::error(msg.clone())),
            LeagueError::Conflict(msg) => HttpResponse::Conflict().json(ApiResponse::<()>::error(msg.clone())),
            LeagueError::Validation(msg) => HttpResponse::BadRequest().json(ApiResponse::<()>::error(msg.clone())),
            LeagueError::PredictionLocked => HttpResponse::Forbidden().json(ApiResponse::<()>::error(self.to_string())),
            LeagueError::Scoring(e) => {
                tracing::error!("Scoring failed: {}", e);
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_with_message(
                    "Failed to compute scores",
                    e.to_string(),
                ))
            }
            LeagueError::Database(e) => {
                tracing::error!("Database error: {}", e);
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error("Database error"))
            }
        }
    }
}

/// Map a unique-constraint violation to a conflict, anything else to a database error
pub fn conflict_on_unique(e: sqlx::Error, message: &str) -> LeagueError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => LeagueError::Conflict(message.to_string()),
        _ => LeagueError::Database(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use uuid::Uuid;

    #[test]
    fn test_status_codes() {
        assert_eq!(LeagueError::NotFound("x".into()).to_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(LeagueError::Forbidden("x".into()).to_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(LeagueError::Conflict("x".into()).to_response().status(), StatusCode::CONFLICT);
        assert_eq!(LeagueError::Validation("x".into()).to_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(LeagueError::PredictionLocked.to_response().status(), StatusCode::FORBIDDEN);
        let scoring = LeagueError::from(ScoringError::PartialFixtureScore { fixture_id: Uuid::nil() });
        assert_eq!(scoring.to_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            LeagueError::from(sqlx::Error::RowNotFound).to_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
