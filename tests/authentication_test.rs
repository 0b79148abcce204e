use serde_json::json;
use sqlx::Row;

mod common;
use common::utils::{body_json, spawn_app};

#[tokio::test]
async fn register_user_working() {
    let test_app = spawn_app().await;

    let response = test_app.register("Keeper@Example.com", "password123").await;
    assert_eq!(201, response.status().as_u16());

    let saved = sqlx::query("SELECT email, role, password_hash FROM users")
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Failed to fetch saved user.");

    assert_eq!(saved.get::<String, _>("email"), "keeper@example.com");
    assert_eq!(saved.get::<String, _>("role"), "user");
    assert_ne!(saved.get::<String, _>("password_hash"), "password123");
}

#[tokio::test]
async fn register_duplicate_email_conflicts() {
    let test_app = spawn_app().await;

    assert_eq!(201, test_app.register("striker@example.com", "password123").await.status().as_u16());
    let duplicate = test_app.register("striker@example.com", "another-password").await;
    assert_eq!(409, duplicate.status().as_u16());
}

#[tokio::test]
async fn register_rejects_bad_input() {
    let test_app = spawn_app().await;

    assert_eq!(400, test_app.register("not-an-email", "password123").await.status().as_u16());
    assert_eq!(400, test_app.register("short@example.com", "short").await.status().as_u16());
}

#[tokio::test]
async fn login_returns_token_for_valid_credentials() {
    let test_app = spawn_app().await;
    test_app.register("winger@example.com", "password123").await;

    let response = test_app.login("WINGER@example.com", "password123").await;
    assert_eq!(200, response.status().as_u16());
    let body = body_json(response).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let wrong_password = test_app.login("winger@example.com", "password124").await;
    assert_eq!(401, wrong_password.status().as_u16());

    let unknown = test_app.login("nobody@example.com", "password123").await;
    assert_eq!(401, unknown.status().as_u16());
}

#[tokio::test]
async fn authorized_returns_current_user() {
    let test_app = spawn_app().await;
    let user = test_app.create_user_and_login().await;

    let response = test_app.get("/api/v1/authorized", &user.token).await;
    assert_eq!(200, response.status().as_u16());
    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], user.user_id.to_string());
    assert_eq!(body["data"]["email"], user.email);
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let test_app = spawn_app().await;

    let no_token = test_app
        .client
        .get(test_app.url("/api/v1/leagues"))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(401, no_token.status().as_u16());

    let bad_token = test_app.get("/api/v1/authorized", "not-a-jwt").await;
    assert_eq!(401, bad_token.status().as_u16());
}

#[tokio::test]
async fn update_account_changes_email_and_password() {
    let test_app = spawn_app().await;
    let user = test_app.create_user_and_login().await;

    let response = test_app
        .patch(
            "/api/v1/users/me",
            &user.token,
            &json!({
                "current_password": "password123",
                "email": "  New.Keeper@Example.com ",
                "username": "Keeper",
                "new_password": "brand-new-pass",
                "confirm_password": "brand-new-pass"
            }),
        )
        .await;
    assert_eq!(200, response.status().as_u16());
    let body = body_json(response).await;
    assert_eq!(body["message"], "Account updated");
    assert_eq!(body["user"]["id"], user.user_id.to_string());
    assert_eq!(body["user"]["email"], "new.keeper@example.com");
    assert_eq!(body["user"]["username"], "Keeper");

    assert_eq!(401, test_app.login(&user.email, "password123").await.status().as_u16());
    assert_eq!(401, test_app.login("new.keeper@example.com", "password123").await.status().as_u16());
    assert_eq!(200, test_app.login("new.keeper@example.com", "brand-new-pass").await.status().as_u16());

    // An empty username clears it, absent fields stay as they are
    let cleared = test_app
        .patch(
            "/api/v1/users/me",
            &user.token,
            &json!({ "current_password": "brand-new-pass", "username": "" }),
        )
        .await;
    assert_eq!(200, cleared.status().as_u16());
    let body = body_json(cleared).await;
    assert!(body["user"]["username"].is_null());
    assert_eq!(body["user"]["email"], "new.keeper@example.com");
}

#[tokio::test]
async fn update_account_rejects_bad_requests() {
    let test_app = spawn_app().await;
    let user = test_app.create_user_and_login().await;
    let other = test_app.create_user_and_login().await;

    let wrong_password = test_app
        .patch(
            "/api/v1/users/me",
            &user.token,
            &json!({ "current_password": "password124", "email": "taken@example.com" }),
        )
        .await;
    assert_eq!(403, wrong_password.status().as_u16());

    let mismatch = test_app
        .patch(
            "/api/v1/users/me",
            &user.token,
            &json!({
                "current_password": "password123",
                "new_password": "brand-new-pass",
                "confirm_password": "brand-new-typo"
            }),
        )
        .await;
    assert_eq!(400, mismatch.status().as_u16());

    let too_short = test_app
        .patch(
            "/api/v1/users/me",
            &user.token,
            &json!({
                "current_password": "password123",
                "new_password": "short",
                "confirm_password": "short"
            }),
        )
        .await;
    assert_eq!(400, too_short.status().as_u16());

    let clash = test_app
        .patch(
            "/api/v1/users/me",
            &user.token,
            &json!({ "current_password": "password123", "email": other.email.to_uppercase() }),
        )
        .await;
    assert_eq!(409, clash.status().as_u16());

    // Nothing above changed the stored account
    assert_eq!(200, test_app.login(&user.email, "password123").await.status().as_u16());
}
