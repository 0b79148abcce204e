use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::user::{UserCredentials, UserProfile, UserRole};

pub async fn insert_user<'e, E: PgExecutor<'e>>(
    executor: E,
    email: &str,
    username: Option<&str>,
    password_hash: &str,
) -> Result<UserProfile, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        r#"
        INSERT INTO users (id, email, username, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, email, username, role, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(username)
    .bind(password_hash)
    .bind(UserRole::User)
    .fetch_one(executor)
    .await
}

pub async fn find_credentials_by_email<'e, E: PgExecutor<'e>>(
    executor: E,
    email: &str,
) -> Result<Option<UserCredentials>, sqlx::Error> {
    sqlx::query_as::<_, UserCredentials>(
        "SELECT id, email, role, password_hash FROM users WHERE LOWER(email) = LOWER($1)",
    )
    .bind(email)
    .fetch_optional(executor)
    .await
}

pub async fn get_user_profile<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        "SELECT id, email, username, role, created_at FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_credentials_by_id<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
) -> Result<Option<UserCredentials>, sqlx::Error> {
    sqlx::query_as::<_, UserCredentials>(
        "SELECT id, email, role, password_hash FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

/// Apply an account edit. `None` keeps a field; `Some(None)` clears the username.
pub async fn update_account<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    email: Option<&str>,
    username: Option<Option<&str>>,
    password_hash: Option<&str>,
) -> Result<UserProfile, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        r#"
        UPDATE users SET
            email = COALESCE($2, email),
            username = CASE WHEN $3 THEN $4 ELSE username END,
            password_hash = COALESCE($5, password_hash),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, email, username, role, created_at
        "#,
    )
    .bind(user_id)
    .bind(email)
    .bind(username.is_some())
    .bind(username.flatten())
    .bind(password_hash)
    .fetch_one(executor)
    .await
}
